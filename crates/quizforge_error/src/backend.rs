//! Backend error types and retry classification.

use derive_more::{Display, Error};

/// Specific error conditions reported by a generation backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub enum BackendErrorKind {
    /// API key not found in environment.
    #[display("API key environment variable not set")]
    MissingApiKey,

    /// Failed to construct the HTTP client.
    #[display("Failed to create backend client: {}", _0)]
    ClientCreation(String),

    /// Request never produced an HTTP response (connect, timeout, DNS).
    #[display("Backend request failed: {}", _0)]
    ApiRequest(String),

    /// Backend answered with a non-success HTTP status.
    #[display("HTTP {} error: {}", status_code, message)]
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Error message extracted from the response body
        message: String,
    },

    /// Response body could not be read in the expected wire format.
    #[display("Response parsing failed: {}", _0)]
    ResponseParsing(String),

    /// Request was rejected before reaching the model.
    #[display("Invalid request: {}", _0)]
    InvalidRequest(String),
}

impl BackendErrorKind {
    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            BackendErrorKind::HttpError { status_code, .. } => {
                matches!(*status_code, 408 | 429 | 500 | 502 | 503 | 504)
            }
            BackendErrorKind::ApiRequest(_) => true,
            _ => false,
        }
    }

    /// Get retry strategy parameters for this error type.
    ///
    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    pub fn retry_strategy_params(&self) -> (u64, usize, u64) {
        match self {
            BackendErrorKind::HttpError { status_code, .. } => match *status_code {
                429 => (5000, 3, 40),
                503 => (2000, 5, 60),
                500 | 502 | 504 => (1000, 3, 8),
                408 => (2000, 4, 30),
                _ => (2000, 5, 60),
            },
            BackendErrorKind::ApiRequest(_) => (2000, 5, 60),
            _ => (2000, 5, 60),
        }
    }
}

/// Backend error with source location tracking.
///
/// # Examples
///
/// ```
/// use quizforge_error::{BackendError, BackendErrorKind, RetryableError};
///
/// let err = BackendError::new(BackendErrorKind::HttpError {
///     status_code: 503,
///     message: "The model is overloaded".to_string(),
/// });
/// assert!(err.is_retryable());
/// ```
#[derive(Debug, Clone, Display, Error)]
#[display("Backend Error: {} at {}:{}", kind, file, line)]
pub struct BackendError {
    /// The specific error kind.
    pub kind: BackendErrorKind,
    /// Line number where error was created.
    pub line: u32,
    /// File where error was created.
    pub file: &'static str,
}

impl BackendError {
    /// Creates a new error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: BackendErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Trait for errors that support retry logic.
///
/// Transient errors like 503 (service unavailable), 429 (rate limit), or
/// network timeouts should report retryable; permanent errors like 401
/// (unauthorized) or 400 (bad request) should not.
///
/// # Examples
///
/// ```
/// use quizforge_error::{BackendError, BackendErrorKind, RetryableError};
///
/// let err = BackendError::new(BackendErrorKind::HttpError {
///     status_code: 503,
///     message: "Service unavailable".to_string(),
/// });
///
/// assert!(err.is_retryable());
/// let (backoff, retries, max_delay) = err.retry_strategy_params();
/// assert_eq!(backoff, 2000);
/// assert_eq!(retries, 5);
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;

    /// Get retry strategy parameters for this error.
    ///
    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        (2000, 5, 60)
    }
}

impl RetryableError for BackendError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        self.kind.retry_strategy_params()
    }
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;
