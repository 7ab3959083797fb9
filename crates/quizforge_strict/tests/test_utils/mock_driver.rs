//! A scripted text driver for exercising the strict client offline.

use async_trait::async_trait;
use quizforge_core::{GenerateRequest, GenerateResponse, Output};
use quizforge_error::{BackendError, BackendErrorKind, BackendResult};
use quizforge_interface::TextDriver;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::time::Instant;

/// Scripted behavior for one driver call.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return this body as the response text.
    Respond(String),
    /// Fail with HTTP 503 (retryable overload).
    Overloaded,
    /// Fail with HTTP 400 (not retryable).
    Rejected,
}

/// Test double that replays a script and records every request it saw,
/// with the (tokio) instant at which it saw it.
pub struct MockDriver {
    script: Mutex<VecDeque<MockBehavior>>,
    requests: Mutex<Vec<(Instant, GenerateRequest)>>,
}

impl MockDriver {
    pub fn new(script: impl IntoIterator<Item = MockBehavior>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests observed so far, in call order.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests
            .lock()
            .expect("requests lock")
            .iter()
            .map(|(_, request)| request.clone())
            .collect()
    }

    /// Instants at which calls arrived, in call order.
    pub fn call_instants(&self) -> Vec<Instant> {
        self.requests
            .lock()
            .expect("requests lock")
            .iter()
            .map(|(instant, _)| *instant)
            .collect()
    }

    /// Number of calls made.
    pub fn calls(&self) -> usize {
        self.requests.lock().expect("requests lock").len()
    }
}

#[async_trait]
impl TextDriver for MockDriver {
    async fn generate(&self, request: &GenerateRequest) -> BackendResult<GenerateResponse> {
        self.requests
            .lock()
            .expect("requests lock")
            .push((Instant::now(), request.clone()));

        let behavior = self
            .script
            .lock()
            .expect("script lock")
            .pop_front()
            .unwrap_or(MockBehavior::Rejected);

        match behavior {
            MockBehavior::Respond(body) => Ok(GenerateResponse::builder()
                .outputs(vec![Output::Text(body)])
                .build()
                .expect("valid response")),
            MockBehavior::Overloaded => Err(BackendError::new(BackendErrorKind::HttpError {
                status_code: 503,
                message: "The model is overloaded. Please try again later.".to_string(),
            })),
            MockBehavior::Rejected => Err(BackendError::new(BackendErrorKind::HttpError {
                status_code: 400,
                message: "Bad request".to_string(),
            })),
        }
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
