//! The generation-backend driver trait.

use async_trait::async_trait;
use quizforge_core::{GenerateRequest, GenerateResponse};
use quizforge_error::BackendResult;

/// A text-generation backend.
///
/// Implementations wrap a concrete provider API (Gemini, an
/// OpenAI-compatible endpoint, or a test double). The strict generation
/// client takes the driver as an injected dependency, so policy code
/// never constructs its own network client.
///
/// Errors carry a retryable/non-retryable classification via
/// [`quizforge_error::RetryableError`]; callers use it to distinguish
/// transient backend unavailability from requests the provider rejected.
#[async_trait]
pub trait TextDriver: Send + Sync {
    /// Issues one generation call.
    ///
    /// A `model` set on the request overrides the driver's configured
    /// default for this call only.
    async fn generate(&self, request: &GenerateRequest) -> BackendResult<GenerateResponse>;

    /// The driver's default model identifier.
    fn model_name(&self) -> &str;
}
