//! Core data types for the Quizforge generation library.
//!
//! This crate provides the foundation data types used across all Quizforge
//! interfaces.

mod message;
mod output;
mod request;
mod role;
mod schema;
mod token_usage;

pub use message::{Message, MessageBuilder};
pub use output::Output;
pub use request::{
    GenerateRequest, GenerateRequestBuilder, GenerateResponse, GenerateResponseBuilder,
};
pub use role::Role;
pub use schema::{FieldKind, OutputSchema, SchemaField};
pub use token_usage::{TokenUsageData, TokenUsageDataBuilder};
