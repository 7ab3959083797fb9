//! Quiz generation configuration.

use quizforge_error::{ConfigError, QuizforgeResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use typed_builder::TypedBuilder;

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_fallback_model() -> Option<String> {
    Some("gemini-1.5-flash-8b".to_string())
}

fn default_temperature() -> f32 {
    1.0
}

fn default_max_attempts() -> usize {
    3
}

/// Configuration for the quiz generation workflow.
///
/// Everything has a usable default; a TOML file can override any subset.
#[derive(Debug, Clone, Serialize, Deserialize, derive_getters::Getters, TypedBuilder)]
pub struct QuizConfig {
    /// Model used for the first attempts
    #[serde(default = "default_model")]
    #[builder(default = default_model(), setter(into))]
    model: String,
    /// Model used when unavailability persists near attempt exhaustion
    #[serde(default = "default_fallback_model")]
    #[builder(default = default_fallback_model())]
    fallback_model: Option<String>,
    /// Sampling temperature for question generation
    #[serde(default = "default_temperature")]
    #[builder(default = default_temperature())]
    temperature: f32,
    /// Attempt budget per generation call
    #[serde(default = "default_max_attempts")]
    #[builder(default = default_max_attempts())]
    max_attempts: usize,
    /// Prompt templates
    #[serde(default)]
    #[builder(default)]
    prompts: QuizPrompts,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl QuizConfig {
    /// Load configuration from a TOML file.
    #[tracing::instrument(skip(path))]
    pub fn from_file(path: impl AsRef<Path>) -> QuizforgeResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)).into())
    }
}

/// Prompts used by the quiz generation workflow.
///
/// Defaults match the production prompt texts; override them in TOML to
/// tune tone or difficulty phrasing. User templates take a `{topic}`
/// placeholder.
#[derive(Debug, Clone, Serialize, Deserialize, derive_getters::Getters, TypedBuilder)]
pub struct QuizPrompts {
    /// System instruction for multiple-choice generation
    #[builder(setter(into))]
    mcq_system: String,
    /// System instruction for open-ended generation
    #[builder(setter(into))]
    open_ended_system: String,
    /// Per-question user prompt for multiple-choice generation
    #[builder(setter(into))]
    mcq_user_template: String,
    /// Per-question user prompt for open-ended generation
    #[builder(setter(into))]
    open_ended_user_template: String,
}

impl Default for QuizPrompts {
    fn default() -> Self {
        Self {
            mcq_system: "You are a helpful AI that is able to generate mcq questions and answers, the length of each answer should not be more than 15 words".into(),
            open_ended_system: "You are a helpful AI that is able to generate a pair of question and answers, the length of each answer should not be more than 15 words".into(),
            mcq_user_template: "You are to generate a random hard mcq question about {topic}".into(),
            open_ended_user_template: "You are to generate a random hard open-ended question about {topic}".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_production_prompts() {
        let config = QuizConfig::default();
        assert_eq!(config.model(), "gemini-1.5-flash");
        assert_eq!(*config.max_attempts(), 3);
        assert!(config.prompts().mcq_system().contains("mcq questions"));
        assert!(config.prompts().mcq_user_template().contains("{topic}"));
    }

    #[test]
    fn toml_overrides_a_subset() {
        let config: QuizConfig = toml::from_str(
            r#"
            model = "gemini-1.5-pro"
            max_attempts = 5
            "#,
        )
        .expect("config parses");

        assert_eq!(config.model(), "gemini-1.5-pro");
        assert_eq!(*config.max_attempts(), 5);
        // Untouched fields keep their defaults.
        assert_eq!(config.fallback_model().as_deref(), Some("gemini-1.5-flash-8b"));
        assert!(config.prompts().open_ended_system().contains("pair of question"));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = QuizConfig::from_file("/nonexistent/quizforge.toml").expect_err("missing file");
        assert!(format!("{}", err).contains("Failed to read config file"));
    }
}
