//! Request and response types for LLM generation.

use crate::{Message, Output, TokenUsageData};
use serde::{Deserialize, Serialize};

/// Generic generation request.
///
/// `model` overrides the driver's configured model for this call; the
/// strict client relies on this for its fallback-model swap.
///
/// # Examples
///
/// ```
/// use quizforge_core::{GenerateRequest, Message, Role};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::new(Role::User, "Count to 3.")])
///     .temperature(Some(0.5))
///     .build()
///     .expect("Valid request");
///
/// assert_eq!(request.messages().len(), 1);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    Default,
    derive_getters::Getters,
    derive_builder::Builder,
)]
pub struct GenerateRequest {
    /// Ordered conversation messages
    messages: Vec<Message>,
    /// Maximum tokens to generate
    #[builder(default)]
    max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(default)]
    temperature: Option<f32>,
    /// Model override for this request
    #[builder(default)]
    model: Option<String>,
    /// Ask the provider for a structured (JSON) response where supported
    #[builder(default)]
    json_mode: bool,
}

impl GenerateRequest {
    /// Returns a builder for constructing a GenerateRequest.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// The unified response object.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
pub struct GenerateResponse {
    /// Outputs produced by the backend
    outputs: Vec<Output>,
    /// Token usage, when the provider reports it
    #[builder(default)]
    usage: Option<TokenUsageData>,
}

impl GenerateResponse {
    /// Returns a builder for constructing a GenerateResponse.
    pub fn builder() -> GenerateResponseBuilder {
        GenerateResponseBuilder::default()
    }

    /// The first output rendered as text, if any output was produced.
    pub fn first_text(&self) -> Option<String> {
        self.outputs.first().map(Output::as_text)
    }
}
