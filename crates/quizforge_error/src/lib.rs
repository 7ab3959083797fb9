//! Error types for the Quizforge generation library.
//!
//! This crate provides the foundation error types used throughout the
//! Quizforge ecosystem.

mod backend;
mod config;
mod generation;

pub use backend::{BackendError, BackendErrorKind, BackendResult, RetryableError};
pub use config::ConfigError;
pub use generation::{GenerationError, GenerationErrorKind};

/// Crate-level error variants.
#[derive(Debug, derive_more::From)]
pub enum QuizforgeErrorKind {
    /// Generation backend error
    Backend(BackendError),
    /// Strict generation error
    Generation(GenerationError),
    /// Configuration error
    Config(ConfigError),
}

impl std::fmt::Display for QuizforgeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizforgeErrorKind::Backend(e) => write!(f, "{}", e),
            QuizforgeErrorKind::Generation(e) => write!(f, "{}", e),
            QuizforgeErrorKind::Config(e) => write!(f, "{}", e),
        }
    }
}

/// Quizforge error with kind discrimination.
#[derive(Debug)]
pub struct QuizforgeError(Box<QuizforgeErrorKind>);

impl QuizforgeError {
    /// Create a new error from a kind.
    pub fn new(kind: QuizforgeErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &QuizforgeErrorKind {
        &self.0
    }
}

impl std::fmt::Display for QuizforgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Quizforge Error: {}", self.0)
    }
}

impl std::error::Error for QuizforgeError {}

// Generic From implementation for any type that converts to QuizforgeErrorKind
impl<T> From<T> for QuizforgeError
where
    T: Into<QuizforgeErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Quizforge operations.
pub type QuizforgeResult<T> = std::result::Result<T, QuizforgeError>;
