//! The quiz-creation workflow.
//!
//! Builds the question schema and prompt batch for a requested topic,
//! drives the strict generation client, and maps the validated records
//! onto typed questions.

use crate::config::QuizConfig;
use quizforge_core::{FieldKind, OutputSchema};
use quizforge_error::{GenerationError, GenerationErrorKind, QuizforgeResult};
use quizforge_interface::TextDriver;
use quizforge_strict::{StrictClient, StrictRequest};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};
use typed_builder::TypedBuilder;

/// Most questions a single request may ask for.
const MAX_AMOUNT: usize = 10;

/// The two supported question formats.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    /// Multiple choice: four options, answer among them.
    Mcq,
    /// Open ended: free-text answer.
    OpenEnded,
}

/// A request for a batch of quiz questions.
#[derive(Debug, Clone, derive_getters::Getters, TypedBuilder)]
pub struct QuizRequest {
    /// Quiz topic, verbatim from the user
    #[builder(setter(into))]
    topic: String,
    /// How many questions to generate (clamped to 1..=10)
    amount: usize,
    /// Question format
    game_type: GameType,
}

/// A generated multiple-choice question.
///
/// Options always hold exactly four entries and always include the
/// answer; the strict client repairs anything the backend under- or
/// over-delivers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct McqQuestion {
    /// Question text
    question: String,
    /// The correct answer
    answer: String,
    /// Exactly four options including the answer
    options: Vec<String>,
}

impl McqQuestion {
    /// The options in randomized presentation order.
    pub fn shuffled_options(&self) -> Vec<String> {
        let mut options = self.options.clone();
        options.shuffle(&mut rand::thread_rng());
        options
    }
}

/// A generated open-ended question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct OpenEndedQuestion {
    /// Question text
    question: String,
    /// Reference answer
    answer: String,
}

/// Questions produced by one generation call, grouped by format.
#[derive(Debug, Clone, PartialEq)]
pub enum QuizQuestions {
    /// Multiple-choice questions.
    Mcq(Vec<McqQuestion>),
    /// Open-ended questions.
    OpenEnded(Vec<OpenEndedQuestion>),
}

impl QuizQuestions {
    /// Number of questions generated.
    pub fn len(&self) -> usize {
        match self {
            QuizQuestions::Mcq(questions) => questions.len(),
            QuizQuestions::OpenEnded(questions) => questions.len(),
        }
    }

    /// True if the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The multiple-choice questions, if this batch holds that format.
    pub fn into_mcq(self) -> Option<Vec<McqQuestion>> {
        match self {
            QuizQuestions::Mcq(questions) => Some(questions),
            QuizQuestions::OpenEnded(_) => None,
        }
    }

    /// The open-ended questions, if this batch holds that format.
    pub fn into_open_ended(self) -> Option<Vec<OpenEndedQuestion>> {
        match self {
            QuizQuestions::OpenEnded(questions) => Some(questions),
            QuizQuestions::Mcq(_) => None,
        }
    }
}

/// Generates quiz questions through a strict generation client.
#[derive(Debug, Clone)]
pub struct QuizGenerator<D> {
    client: StrictClient<D>,
    config: QuizConfig,
}

impl<D: TextDriver> QuizGenerator<D> {
    /// Creates a generator over the given driver.
    pub fn new(driver: D, config: QuizConfig) -> Self {
        Self {
            client: StrictClient::new(driver),
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// The underlying strict client.
    pub fn client(&self) -> &StrictClient<D> {
        &self.client
    }

    /// Generates a batch of questions for the requested topic.
    #[instrument(skip(self, request), fields(topic = %request.topic(), game_type = %request.game_type()))]
    pub async fn generate(&self, request: &QuizRequest) -> QuizforgeResult<QuizQuestions> {
        let amount = (*request.amount()).clamp(1, MAX_AMOUNT);
        let prompts = self.config.prompts();

        match request.game_type() {
            GameType::Mcq => {
                let schema = OutputSchema::new()
                    .field("question", FieldKind::literal("question"))
                    .field(
                        "answer",
                        FieldKind::literal("answer with max length of 15 words"),
                    )
                    .field(
                        "options",
                        FieldKind::literal(
                            "array of 4 answer options, each with max length of 15 words",
                        ),
                    );
                let records = self
                    .generate_records(
                        prompts.mcq_system(),
                        prompts.mcq_user_template(),
                        request.topic(),
                        amount,
                        schema,
                    )
                    .await?;
                Ok(QuizQuestions::Mcq(into_questions(records)?))
            }
            GameType::OpenEnded => {
                let schema = OutputSchema::new()
                    .field("question", FieldKind::literal("question"))
                    .field(
                        "answer",
                        FieldKind::literal("answer with max length of 15 words"),
                    );
                let records = self
                    .generate_records(
                        prompts.open_ended_system(),
                        prompts.open_ended_user_template(),
                        request.topic(),
                        amount,
                        schema,
                    )
                    .await?;
                Ok(QuizQuestions::OpenEnded(into_questions(records)?))
            }
        }
    }

    async fn generate_records(
        &self,
        system: &str,
        user_template: &str,
        topic: &str,
        amount: usize,
        schema: OutputSchema,
    ) -> QuizforgeResult<Vec<Value>> {
        let prompt = fill_template(user_template, &[("topic", topic)]);
        let prompts = vec![prompt; amount];

        let mut builder = StrictRequest::builder();
        builder
            .system(system)
            .prompts(prompts)
            .schema(schema)
            .model(self.config.model())
            .fallback_model(self.config.fallback_model().clone())
            .temperature(*self.config.temperature())
            .max_attempts(*self.config.max_attempts());
        let strict_request = builder.build().map_err(|e| {
            GenerationError::new(GenerationErrorKind::MalformedRecord(format!(
                "Failed to build strict request: {}",
                e
            )))
        })?;

        let output = self.client.generate(&strict_request).await?;
        let records = output.into_many();
        debug!(records = records.len(), "Quiz records generated");
        Ok(records)
    }
}

fn into_questions<T: serde::de::DeserializeOwned>(records: Vec<Value>) -> QuizforgeResult<Vec<T>> {
    records
        .into_iter()
        .map(|record| {
            serde_json::from_value(record).map_err(|e| {
                GenerationError::new(GenerationErrorKind::MalformedRecord(e.to_string())).into()
            })
        })
        .collect()
}

/// Replaces `{key}` markers in a template with provided values.
fn fill_template(template: &str, pairs: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in pairs {
        let needle = format!("{{{}}}", key);
        out = out.replace(&needle, value);
    }
    out
}
