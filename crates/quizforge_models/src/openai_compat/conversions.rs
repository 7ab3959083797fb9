//! Type conversions between Quizforge and OpenAI formats.

use crate::openai_compat::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat};
use quizforge_core::{GenerateRequest, GenerateResponse, Output, Role, TokenUsageData};
use quizforge_error::{BackendError, BackendErrorKind};

/// Converts a Quizforge GenerateRequest to OpenAI chat format.
pub fn to_chat_request(req: &GenerateRequest, model: &str) -> Result<ChatRequest, BackendError> {
    let messages = req
        .messages()
        .iter()
        .map(|msg| {
            let role = match msg.role() {
                Role::User => "user",
                Role::Assistant => "assistant",
                Role::System => "system",
            };
            ChatMessage {
                role: role.to_string(),
                content: Some(msg.content().clone()),
            }
        })
        .collect::<Vec<_>>();

    let mut builder = ChatRequest::builder();
    builder.model(model.to_string()).messages(messages);

    if let Some(max_tokens) = req.max_tokens() {
        builder.max_tokens(*max_tokens);
    }

    if let Some(temp) = req.temperature() {
        builder.temperature(*temp);
    }

    if *req.json_mode() {
        builder.response_format(Some(ResponseFormat::json_object()));
    }

    builder.build().map_err(|e| {
        BackendError::new(BackendErrorKind::InvalidRequest(format!(
            "Failed to build request: {}",
            e
        )))
    })
}

/// Converts an OpenAI chat response to a Quizforge GenerateResponse.
pub fn from_chat_response(response: &ChatResponse) -> Result<GenerateResponse, BackendError> {
    let content = response
        .choices
        .first()
        .and_then(|choice| choice.message.content.clone())
        .ok_or_else(|| {
            BackendError::new(BackendErrorKind::ResponseParsing(
                "No choices in response".to_string(),
            ))
        })?;

    let usage = response.usage.as_ref().and_then(|u| {
        match (u.prompt_tokens, u.completion_tokens, u.total_tokens) {
            (Some(input), Some(output), Some(total)) => {
                Some(TokenUsageData::new(input, output, total))
            }
            _ => None,
        }
    });

    GenerateResponse::builder()
        .outputs(vec![Output::Text(content)])
        .usage(usage)
        .build()
        .map_err(|e| {
            BackendError::new(BackendErrorKind::ResponseParsing(format!(
                "Failed to build response: {}",
                e
            )))
        })
}
