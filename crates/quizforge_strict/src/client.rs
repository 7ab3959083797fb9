//! The strict generation client and its retry loop.

use crate::request::{StrictOutput, StrictRequest};
use crate::{augment, clean, repair};
use quizforge_core::{GenerateRequest, Message, Role};
use quizforge_error::{BackendError, GenerationError, GenerationErrorKind, RetryableError};
use quizforge_interface::TextDriver;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

/// Retry configuration for the attempt loop.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Initial backoff duration.
    pub initial_backoff: Duration,
    /// Maximum backoff duration.
    pub max_backoff: Duration,
    /// Backoff multiplier.
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }
}

/// How one attempt failed.
///
/// The loop's policy is a pure function of this class and the attempt
/// index: infrastructure gets backoff (and, near exhaustion, the fallback
/// model); validation gets its description fed back into the next
/// attempt's instruction.
#[derive(Debug)]
enum AttemptFailure {
    /// The backend was transiently unavailable; no output was produced.
    Infrastructure(BackendError),
    /// Output was produced but failed parsing, shape, or field checks.
    Validation(String),
}

/// Drives a text-generation backend until it produces schema-conformant
/// output, or the attempt budget runs out.
///
/// The client holds no state across calls; concurrent calls do not
/// interfere, and backoff suspends only the calling task.
#[derive(Debug, Clone)]
pub struct StrictClient<D> {
    driver: D,
    retry: RetryConfig,
}

impl<D: TextDriver> StrictClient<D> {
    /// Creates a client over the given driver with default retry timing.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            retry: RetryConfig::default(),
        }
    }

    /// Overrides the retry timing.
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// The underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Runs the request to a validated result.
    ///
    /// # Errors
    ///
    /// Fails with [`GenerationErrorKind::ExhaustedAttempts`] after
    /// `max_attempts` attempts without a valid result, and with the
    /// misuse kinds for empty schemas or prompt lists.
    #[instrument(skip(self, request), fields(prompts = request.prompts().len(), max_attempts = request.max_attempts()))]
    pub async fn generate(&self, request: &StrictRequest) -> Result<StrictOutput, GenerationError> {
        if request.schema().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptySchema));
        }
        if request.prompts().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::NoPrompts));
        }

        let list_input = request.is_list_input();
        let format_instruction =
            augment::format_instruction(request.schema(), request.prompts().len());
        let user_prompt = request.prompts().join("\n");
        let max_attempts = *request.max_attempts();

        let mut feedback = String::new();
        let mut active_model = request.model().clone();
        let mut backoff = self.retry.initial_backoff;

        for attempt in 0..max_attempts {
            let system = format!("{}{}{}", request.system(), format_instruction, feedback);

            if *request.verbose() {
                info!(attempt, system = %system, prompt = %user_prompt, "Composed strict request");
            }

            match self
                .attempt(request, &active_model, &system, &user_prompt, list_input)
                .await
            {
                Ok(output) => {
                    debug!(attempt, records = output.len(), "Strict generation succeeded");
                    return Ok(output);
                }
                Err(AttemptFailure::Infrastructure(err)) => {
                    warn!(attempt, error = %err, "Backend unavailable");

                    // Unavailability persisting one attempt before the last
                    // moves the remaining attempts to the fallback model.
                    if attempt + 2 == max_attempts {
                        if let Some(fallback) = request.fallback_model() {
                            warn!(fallback = %fallback, "Switching to fallback model");
                            active_model = fallback.clone();
                        }
                    }

                    if attempt + 1 < max_attempts {
                        debug!(backoff_ms = backoff.as_millis() as u64, "Backing off before retry");
                        sleep(backoff).await;
                        backoff = std::cmp::min(
                            Duration::from_secs_f64(
                                backoff.as_secs_f64() * self.retry.backoff_multiplier,
                            ),
                            self.retry.max_backoff,
                        );
                    }
                }
                Err(AttemptFailure::Validation(message)) => {
                    warn!(attempt, error = %message, "Attempt failed validation");
                    feedback = format!("\n\nError: {}", message);
                }
            }
        }

        Err(GenerationError::new(GenerationErrorKind::ExhaustedAttempts(
            max_attempts,
        )))
    }

    /// One backend invocation plus post-processing.
    async fn attempt(
        &self,
        request: &StrictRequest,
        model: &str,
        system: &str,
        user_prompt: &str,
        list_input: bool,
    ) -> Result<StrictOutput, AttemptFailure> {
        let generate_request = GenerateRequest::builder()
            .messages(vec![
                Message::new(Role::System, system),
                Message::new(Role::User, user_prompt),
            ])
            .temperature(Some(*request.temperature()))
            .model(Some(model.to_string()))
            .json_mode(true)
            .build()
            .map_err(|e| AttemptFailure::Validation(format!("Failed to build request: {}", e)))?;

        let response = match self.driver.generate(&generate_request).await {
            Ok(response) => response,
            Err(err) if err.is_retryable() => return Err(AttemptFailure::Infrastructure(err)),
            // Rejections without an unavailability signal produced no
            // output either, but self-correction may still help.
            Err(err) => return Err(AttemptFailure::Validation(err.kind.to_string())),
        };

        let raw = response.first_text().ok_or_else(|| {
            AttemptFailure::Validation("Backend returned no output".to_string())
        })?;

        if *request.verbose() {
            info!(raw = %raw, "Raw backend response");
        }

        let parsed = clean::parse_lenient(&raw).map_err(AttemptFailure::Validation)?;
        let mut elements =
            repair::coerce_shape(parsed, list_input).map_err(AttemptFailure::Validation)?;
        repair::validate_and_repair(
            &mut elements,
            request.schema(),
            request.default_category().as_deref(),
        )
        .map_err(AttemptFailure::Validation)?;

        let mut elements = if *request.value_only() {
            repair::collapse_values(elements, request.schema())
        } else {
            elements
        };

        if list_input {
            Ok(StrictOutput::Many(elements))
        } else {
            // coerce_shape guarantees exactly one element here
            Ok(StrictOutput::One(elements.remove(0)))
        }
    }
}
