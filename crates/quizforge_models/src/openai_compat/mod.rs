//! Generic OpenAI-compatible API client.
//!
//! This module provides a reusable client for any API that follows the
//! OpenAI chat completions format (Groq, HuggingFace router, OpenAI itself).

mod client;
mod conversions;
mod dto;

pub use client::OpenAICompatibleClient;
pub use dto::{ChatMessage, ChatRequest, ChatRequestBuilder, ChatResponse, ResponseFormat};
