//! LLM provider integrations for Quizforge.
//!
//! Each provider module wraps one wire API behind the
//! [`quizforge_interface::TextDriver`] trait, so the strict generation
//! client and the quiz workflow never depend on a concrete backend.

#[cfg(feature = "gemini")]
pub mod gemini;

#[cfg(feature = "openai-compat")]
pub mod openai_compat;

#[cfg(feature = "gemini")]
pub use gemini::GeminiClient;

#[cfg(feature = "openai-compat")]
pub use openai_compat::OpenAICompatibleClient;
