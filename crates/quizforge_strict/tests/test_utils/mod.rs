//! Test utilities for strict generation tests.
//!
//! This module provides a scripted mock driver and request helpers.

use quizforge_core::{FieldKind, OutputSchema};
use quizforge_strict::{StrictRequest, StrictRequestBuilder};

pub mod mock_driver;

#[allow(unused_imports)]
pub use mock_driver::{MockBehavior, MockDriver};

pub const PRIMARY_MODEL: &str = "gemini-1.5-flash";
pub const FALLBACK_MODEL: &str = "gemini-1.5-flash-8b";

/// The multiple-choice question schema the quiz workflow supplies.
pub fn mcq_schema() -> OutputSchema {
    OutputSchema::new()
        .field("question", FieldKind::literal("question"))
        .field("answer", FieldKind::literal("answer with max length of 15 words"))
        .field("options", FieldKind::literal("array of 4 answer options"))
}

/// A single-prompt request over the MCQ schema with defaults.
pub fn mcq_request() -> StrictRequest {
    mcq_request_builder()
        .build()
        .expect("valid request")
}

/// Builder pre-filled for a single-prompt MCQ request.
pub fn mcq_request_builder() -> StrictRequestBuilder {
    let mut builder = StrictRequestBuilder::default();
    builder
        .system("You are a helpful AI that generates mcq questions and answers.")
        .prompts(vec![
            "Generate a random hard mcq question about Rust.".to_string(),
        ])
        .schema(mcq_schema())
        .model(PRIMARY_MODEL);
    builder
}
