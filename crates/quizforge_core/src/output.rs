//! Output types from LLM responses.

use serde::{Deserialize, Serialize};

/// Supported output types from generation backends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output.
    Text(String),

    /// Structured JSON output.
    Json(serde_json::Value),
}

impl Output {
    /// Returns the output as text.
    ///
    /// JSON payloads are re-serialized, so downstream normalization sees a
    /// single textual form regardless of what the provider handed back.
    pub fn as_text(&self) -> String {
        match self {
            Output::Text(text) => text.clone(),
            Output::Json(value) => value.to_string(),
        }
    }
}
