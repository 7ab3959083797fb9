//! Data transfer objects for the Gemini v1beta REST API.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A single text part within a content block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    /// Part text
    #[serde(default)]
    pub text: Option<String>,
}

/// A content block: an optional role plus its parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    /// "user" or "model"; absent for system instructions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Ordered parts
    pub parts: Vec<GeminiPart>,
}

impl GeminiContent {
    /// A content block holding a single text part.
    pub fn text(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![GeminiPart {
                text: Some(text.into()),
            }],
        }
    }
}

/// Generation parameters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GeminiGenerationConfig {
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum output tokens
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Response MIME type; "application/json" requests structured output
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

/// Gemini `generateContent` request.
#[derive(Debug, Clone, Serialize, Builder, Getters)]
#[builder(setter(into))]
pub struct GeminiRequest {
    /// System instruction, separate from conversation contents
    #[builder(default)]
    #[serde(rename = "system_instruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    /// Conversation contents
    contents: Vec<GeminiContent>,
    /// Generation parameters
    #[builder(default)]
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

impl GeminiRequest {
    /// Creates a new builder for `GeminiRequest`.
    pub fn builder() -> GeminiRequestBuilder {
        GeminiRequestBuilder::default()
    }
}

/// A response candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiCandidate {
    /// Candidate content
    #[serde(default)]
    pub content: Option<GeminiContent>,
    /// Why generation stopped
    #[serde(rename = "finishReason", default)]
    pub finish_reason: Option<String>,
}

/// Token accounting reported by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiUsage {
    /// Tokens in the prompt
    #[serde(rename = "promptTokenCount", default)]
    pub prompt_token_count: Option<u64>,
    /// Tokens across candidates
    #[serde(rename = "candidatesTokenCount", default)]
    pub candidates_token_count: Option<u64>,
    /// Total tokens consumed
    #[serde(rename = "totalTokenCount", default)]
    pub total_token_count: Option<u64>,
}

/// Gemini `generateContent` response.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiResponse {
    /// Response candidates
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    /// Token usage
    #[serde(rename = "usageMetadata", default)]
    pub usage_metadata: Option<GeminiUsage>,
}

/// Try to extract a clean error message from a Gemini error body.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct Wrap {
        error: Obj,
    }
    #[derive(Deserialize)]
    struct Obj {
        message: String,
    }
    serde_json::from_str::<Wrap>(body).ok().map(|w| w.error.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parses_candidates_and_usage() {
        let body = r#"{
            "candidates": [
                {
                    "content": {"role": "model", "parts": [{"text": "{\"answer\":\"B\"}"}]},
                    "finishReason": "STOP"
                }
            ],
            "usageMetadata": {
                "promptTokenCount": 12,
                "candidatesTokenCount": 7,
                "totalTokenCount": 19
            }
        }"#;

        let resp: GeminiResponse = serde_json::from_str(body).expect("response parses");
        assert_eq!(resp.candidates.len(), 1);
        let usage = resp.usage_metadata.expect("usage present");
        assert_eq!(usage.total_token_count, Some(19));
    }

    #[test]
    fn request_serializes_wire_names() {
        let request = GeminiRequest::builder()
            .system_instruction(Some(GeminiContent::text(None, "Respond with JSON.")))
            .contents(vec![GeminiContent::text(Some("user"), "Make a question")])
            .generation_config(Some(GeminiGenerationConfig {
                temperature: Some(1.0),
                max_output_tokens: None,
                response_mime_type: Some("application/json".to_string()),
            }))
            .build()
            .expect("valid request");

        let json = serde_json::to_value(&request).expect("serializes");
        assert!(json.get("system_instruction").is_some());
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(json["contents"][0]["role"], "user");
    }

    #[test]
    fn error_message_extraction() {
        let body = r#"{"error": {"code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE"}}"#;
        assert_eq!(
            extract_error_message(body).as_deref(),
            Some("The model is overloaded.")
        );
        assert!(extract_error_message("not json").is_none());
    }
}
