//! Error types for strict structured generation.

use derive_more::{Display, Error};

/// Specific error conditions for the strict generation client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub enum GenerationErrorKind {
    /// Every attempt failed; carries the number of attempts consumed.
    #[display("Failed to get valid output after {} attempts", _0)]
    ExhaustedAttempts(usize),

    /// The request declared no output fields.
    #[display("Output schema has no fields")]
    EmptySchema,

    /// The request carried no user prompts.
    #[display("Request has no user prompts")]
    NoPrompts,

    /// A validated record did not map onto the caller's typed shape.
    #[display("Malformed record: {}", _0)]
    MalformedRecord(String),
}

/// Strict generation error with location tracking.
///
/// # Examples
///
/// ```
/// use quizforge_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::ExhaustedAttempts(3));
/// assert!(format!("{}", err).contains("after 3 attempts"));
/// ```
#[derive(Debug, Clone, Display, Error)]
#[display("Generation Error: {} at {}:{}", kind, file, line)]
pub struct GenerationError {
    /// The specific error kind.
    pub kind: GenerationErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// File where error occurred.
    pub file: &'static str,
}

impl GenerationError {
    /// Creates a new error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
