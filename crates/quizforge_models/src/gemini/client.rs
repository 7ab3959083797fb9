//! Client for the Gemini `generateContent` API.

use crate::gemini::{conversions, dto};
use async_trait::async_trait;
use quizforge_core::{GenerateRequest, GenerateResponse};
use quizforge_error::{BackendError, BackendErrorKind, BackendResult};
use quizforge_interface::TextDriver;
use reqwest::Client;
use tracing::{debug, error, instrument};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Client for Google's Gemini generative API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Creates a new Gemini client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - API key for authentication
    /// * `model` - Default model identifier
    #[instrument(skip(api_key), fields(model = %model.as_ref()))]
    pub fn new(api_key: impl Into<String>, model: impl AsRef<str>) -> Self {
        let model = model.as_ref().to_string();

        debug!(model = %model, url = DEFAULT_BASE_URL, "Created Gemini client");

        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Creates a client from `GEMINI_API_KEY` (and optional `GEMINI_MODEL`).
    ///
    /// # Errors
    ///
    /// Returns an error if the API key variable is not set.
    pub fn from_env() -> BackendResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| BackendError::new(BackendErrorKind::MissingApiKey))?;
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self::new(api_key, model))
    }

    /// Overrides the API base URL (tests, regional endpoints).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl TextDriver for GeminiClient {
    /// Generates a response from the API.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    /// Non-success HTTP statuses keep their status code so callers can
    /// classify overload (429/5xx) as retryable.
    #[instrument(skip(self, request))]
    async fn generate(&self, request: &GenerateRequest) -> BackendResult<GenerateResponse> {
        let model = request
            .model()
            .clone()
            .unwrap_or_else(|| self.model.clone());

        let wire_request = conversions::to_gemini_request(request)?;
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        debug!(
            model = %model,
            content_count = wire_request.contents().len(),
            json_mode = *request.json_mode(),
            "Sending request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "HTTP request failed");
                BackendError::new(BackendErrorKind::ApiRequest(format!("Request failed: {}", e)))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = dto::extract_error_message(&body).unwrap_or(body);
            error!(status = %status, error = %message, "API error");

            return Err(BackendError::new(BackendErrorKind::HttpError {
                status_code: status.as_u16(),
                message,
            }));
        }

        let wire_response: dto::GeminiResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse response");
            BackendError::new(BackendErrorKind::ResponseParsing(format!(
                "Failed to parse JSON: {}",
                e
            )))
        })?;

        if let Some(usage) = &wire_response.usage_metadata {
            debug!(
                prompt_tokens = ?usage.prompt_token_count,
                completion_tokens = ?usage.candidates_token_count,
                total_tokens = ?usage.total_token_count,
                "Gemini usage"
            );
        }

        conversions::from_gemini_response(&wire_response)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
