//! Request and result types for strict generation.

use quizforge_core::OutputSchema;
use serde_json::Value;

/// A strict generation request.
///
/// One request drives one logical extraction: a system instruction, one or
/// more user prompts (order-preserving), and the schema the output must
/// conform to. Requests are stateless; nothing persists past the call.
///
/// # Examples
///
/// ```
/// use quizforge_core::{FieldKind, OutputSchema};
/// use quizforge_strict::StrictRequest;
///
/// let schema = OutputSchema::new()
///     .field("question", FieldKind::literal("question"))
///     .field("answer", FieldKind::literal("answer with max length of 15 words"));
///
/// let request = StrictRequest::builder()
///     .system("You are a helpful quiz generator.")
///     .prompts(vec!["Generate a hard question about Rust.".to_string()])
///     .schema(schema)
///     .model("gemini-1.5-flash")
///     .build()
///     .expect("Valid request");
///
/// assert_eq!(*request.max_attempts(), 3);
/// ```
#[derive(Debug, Clone, derive_getters::Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct StrictRequest {
    /// System instruction, before augmentation
    system: String,
    /// User prompts; more than one asks for a JSON array, one object per prompt
    prompts: Vec<String>,
    /// Output schema every record must conform to
    schema: OutputSchema,
    /// Substitute for enumeration values outside the allowed set
    #[builder(default)]
    default_category: Option<String>,
    /// Collapse validated records to bare values in schema order
    #[builder(default)]
    value_only: bool,
    /// Model identifier for the first attempts
    model: String,
    /// Model to swap to when unavailability persists near exhaustion
    #[builder(default)]
    fallback_model: Option<String>,
    /// Sampling temperature
    #[builder(default = "1.0")]
    temperature: f32,
    /// Attempt budget; exhausting it fails the call
    #[builder(default = "3")]
    max_attempts: usize,
    /// Emit composed instructions and raw responses at info level
    #[builder(default)]
    verbose: bool,
}

impl StrictRequest {
    /// Returns a builder for constructing a StrictRequest.
    pub fn builder() -> StrictRequestBuilder {
        StrictRequestBuilder::default()
    }

    /// True when the request carries more than one prompt and therefore
    /// expects an array-shaped response.
    pub fn is_list_input(&self) -> bool {
        self.prompts.len() > 1
    }
}

/// A validated strict generation result.
///
/// Mirrors the request shape: one record for a single prompt, an
/// input-ordered sequence for several. With `value_only` set, each record
/// is already collapsed to its bare value(s).
#[derive(Debug, Clone, PartialEq)]
pub enum StrictOutput {
    /// Result of a single-prompt request.
    One(Value),
    /// Results of a multi-prompt request, preserving prompt order.
    Many(Vec<Value>),
}

impl StrictOutput {
    /// The single record, if this was a single-prompt result.
    pub fn into_one(self) -> Option<Value> {
        match self {
            StrictOutput::One(value) => Some(value),
            StrictOutput::Many(_) => None,
        }
    }

    /// The records as a sequence, wrapping a single record.
    pub fn into_many(self) -> Vec<Value> {
        match self {
            StrictOutput::One(value) => vec![value],
            StrictOutput::Many(values) => values,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        match self {
            StrictOutput::One(_) => 1,
            StrictOutput::Many(values) => values.len(),
        }
    }

    /// True if no records were produced.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
