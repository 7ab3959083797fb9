use async_trait::async_trait;
use quizforge::{
    GameType, QuizConfig, QuizGenerator, QuizRequest, TextDriver,
};
use quizforge_core::{GenerateRequest, GenerateResponse, Output};
use quizforge_error::{BackendError, BackendErrorKind, BackendResult};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays scripted bodies (or a 503 for `None`) and records requests.
struct ScriptedDriver {
    script: Mutex<VecDeque<Option<String>>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedDriver {
    fn new(script: impl IntoIterator<Item = Option<String>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

#[async_trait]
impl TextDriver for ScriptedDriver {
    async fn generate(&self, request: &GenerateRequest) -> BackendResult<GenerateResponse> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());

        match self.script.lock().expect("script lock").pop_front().flatten() {
            Some(body) => Ok(GenerateResponse::builder()
                .outputs(vec![Output::Text(body)])
                .build()
                .expect("valid response")),
            None => Err(BackendError::new(BackendErrorKind::HttpError {
                status_code: 503,
                message: "The model is overloaded.".to_string(),
            })),
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

fn mcq_batch(n: usize) -> String {
    let records: Vec<_> = (0..n)
        .map(|i| {
            json!({
                "question": format!("Question {}", i + 1),
                "answer": format!("Answer {}", i + 1),
                // Deliberately sparse; the strict client pads to four.
                "options": [format!("Answer {}", i + 1), "Decoy"]
            })
        })
        .collect();
    json!(records).to_string()
}

#[tokio::test]
async fn mcq_generation_produces_four_option_questions() {
    let driver = ScriptedDriver::new([Some(mcq_batch(3))]);
    let generator = QuizGenerator::new(driver, QuizConfig::default());
    let request = QuizRequest::builder()
        .topic("Roman history")
        .amount(3)
        .game_type(GameType::Mcq)
        .build();

    let questions = generator
        .generate(&request)
        .await
        .expect("generation succeeds")
        .into_mcq()
        .expect("mcq batch");

    assert_eq!(questions.len(), 3);
    for question in &questions {
        assert_eq!(question.options().len(), 4);
        assert!(question.options().contains(question.answer()));
    }
}

#[tokio::test]
async fn open_ended_generation_maps_records() {
    let body = json!({
        "question": "What year did the western Roman empire fall?",
        "answer": "476 AD"
    });
    let driver = ScriptedDriver::new([Some(body.to_string())]);
    let generator = QuizGenerator::new(driver, QuizConfig::default());
    let request = QuizRequest::builder()
        .topic("Roman history")
        .amount(1)
        .game_type(GameType::OpenEnded)
        .build();

    let questions = generator
        .generate(&request)
        .await
        .expect("generation succeeds")
        .into_open_ended()
        .expect("open-ended batch");

    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].answer(), "476 AD");
}

#[tokio::test]
async fn prompts_carry_the_topic_and_system_text() {
    let driver = ScriptedDriver::new([Some(mcq_batch(2))]);
    let generator = QuizGenerator::new(driver, QuizConfig::default());
    let request = QuizRequest::builder()
        .topic("Rust lifetimes")
        .amount(2)
        .game_type(GameType::Mcq)
        .build();

    generator.generate(&request).await.expect("generation succeeds");

    let requests = generator.client().driver().requests();
    assert_eq!(requests.len(), 1);
    let system = requests[0].messages()[0].content().clone();
    let user = requests[0].messages()[1].content().clone();
    assert!(system.contains("generate mcq questions"));
    assert!(system.contains("output the following in JSON format"));
    assert!(user.contains("about Rust lifetimes"));
    assert_eq!(requests[0].model().as_deref(), Some("gemini-1.5-flash"));
}

#[tokio::test]
async fn amount_is_clamped_to_at_least_one() {
    let body = json!({
        "question": "Q", "answer": "A", "options": ["A", "B", "C", "D"]
    });
    let driver = ScriptedDriver::new([Some(body.to_string())]);
    let generator = QuizGenerator::new(driver, QuizConfig::default());
    let request = QuizRequest::builder()
        .topic("anything")
        .amount(0)
        .game_type(GameType::Mcq)
        .build();

    let questions = generator.generate(&request).await.expect("generation succeeds");
    assert_eq!(questions.len(), 1);
}

#[tokio::test]
async fn overload_retries_then_succeeds() {
    let driver = ScriptedDriver::new([None, Some(mcq_batch(2))]);
    let generator = QuizGenerator::new(driver, QuizConfig::default());
    let request = QuizRequest::builder()
        .topic("Roman history")
        .amount(2)
        .game_type(GameType::Mcq)
        .build();

    let questions = generator.generate(&request).await.expect("second attempt succeeds");
    assert_eq!(questions.len(), 2);
    assert_eq!(generator.client().driver().requests().len(), 2);
}
