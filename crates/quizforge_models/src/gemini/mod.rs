//! Google Gemini `generateContent` integration.
//!
//! This is the backend the quiz product runs on. The client speaks the
//! v1beta REST surface directly so structured (JSON) response mode and
//! per-request model overrides stay under our control.

mod client;
mod conversions;
mod dto;

pub use client::GeminiClient;
pub use dto::{
    GeminiCandidate, GeminiContent, GeminiGenerationConfig, GeminiPart, GeminiRequest,
    GeminiRequestBuilder, GeminiResponse, GeminiUsage,
};
