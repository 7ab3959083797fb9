//! Quizforge: AI quiz question generation over strict structured output.
//!
//! The strict generation client ([`StrictClient`]) turns an unreliable
//! text-generation backend into a source of schema-conformant JSON
//! records; the quiz workflow ([`QuizGenerator`]) uses it to produce
//! multiple-choice and open-ended questions for a topic.

mod config;
mod quiz;
pub mod telemetry;

pub use config::{QuizConfig, QuizPrompts};
pub use quiz::{
    GameType, McqQuestion, OpenEndedQuestion, QuizGenerator, QuizQuestions, QuizRequest,
};

// Re-exports of the member crates' public API.
pub use quizforge_core::{
    FieldKind, GenerateRequest, GenerateResponse, Message, Output, OutputSchema, Role,
    SchemaField, TokenUsageData,
};
pub use quizforge_error::{
    BackendError, BackendErrorKind, ConfigError, GenerationError, GenerationErrorKind,
    QuizforgeError, QuizforgeErrorKind, QuizforgeResult, RetryableError,
};
pub use quizforge_interface::TextDriver;
pub use quizforge_models::GeminiClient;
pub use quizforge_strict::{RetryConfig, StrictClient, StrictOutput, StrictRequest};
