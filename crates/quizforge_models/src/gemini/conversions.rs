//! Type conversions between Quizforge and Gemini formats.

use crate::gemini::{GeminiContent, GeminiGenerationConfig, GeminiRequest, GeminiResponse};
use quizforge_core::{GenerateRequest, GenerateResponse, Output, Role, TokenUsageData};
use quizforge_error::{BackendError, BackendErrorKind};

/// Converts a Quizforge GenerateRequest to Gemini wire format.
///
/// System messages become the request's system instruction; user and
/// assistant messages become "user"/"model" contents in order.
pub fn to_gemini_request(req: &GenerateRequest) -> Result<GeminiRequest, BackendError> {
    let mut system_texts = Vec::new();
    let mut contents = Vec::new();

    for msg in req.messages() {
        match msg.role() {
            Role::System => system_texts.push(msg.content().clone()),
            Role::User => contents.push(GeminiContent::text(Some("user"), msg.content().clone())),
            Role::Assistant => {
                contents.push(GeminiContent::text(Some("model"), msg.content().clone()))
            }
        }
    }

    if contents.is_empty() {
        return Err(BackendError::new(BackendErrorKind::InvalidRequest(
            "At least one user message is required".to_string(),
        )));
    }

    let system_instruction =
        (!system_texts.is_empty()).then(|| GeminiContent::text(None, system_texts.join("\n\n")));

    let generation_config = (req.temperature().is_some()
        || req.max_tokens().is_some()
        || *req.json_mode())
    .then(|| GeminiGenerationConfig {
        temperature: *req.temperature(),
        max_output_tokens: *req.max_tokens(),
        response_mime_type: req.json_mode().then(|| "application/json".to_string()),
    });

    GeminiRequest::builder()
        .system_instruction(system_instruction)
        .contents(contents)
        .generation_config(generation_config)
        .build()
        .map_err(|e| {
            BackendError::new(BackendErrorKind::InvalidRequest(format!(
                "Failed to build request: {}",
                e
            )))
        })
}

/// Converts a Gemini response to a Quizforge GenerateResponse.
pub fn from_gemini_response(response: &GeminiResponse) -> Result<GenerateResponse, BackendError> {
    let text = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect::<Vec<_>>()
                .join("")
        })
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            BackendError::new(BackendErrorKind::ResponseParsing(
                "No candidates in response".to_string(),
            ))
        })?;

    let usage = response.usage_metadata.as_ref().and_then(|u| {
        match (
            u.prompt_token_count,
            u.candidates_token_count,
            u.total_token_count,
        ) {
            (Some(input), Some(output), Some(total)) => {
                Some(TokenUsageData::new(input, output, total))
            }
            _ => None,
        }
    });

    GenerateResponse::builder()
        .outputs(vec![Output::Text(text)])
        .usage(usage)
        .build()
        .map_err(|e| {
            BackendError::new(BackendErrorKind::ResponseParsing(format!(
                "Failed to build response: {}",
                e
            )))
        })
}
