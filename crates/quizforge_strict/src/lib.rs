//! Strict structured generation on top of an unreliable text backend.
//!
//! [`StrictClient`] drives a [`quizforge_interface::TextDriver`] through a
//! bounded number of attempts, augmenting the system instruction with the
//! output schema, cleaning and parsing the raw response, repairing fields,
//! and feeding validation failures back into the next attempt. Transient
//! backend unavailability gets exponential backoff and a late fallback to a
//! second model; everything else is treated as content to correct.

mod augment;
mod clean;
mod client;
mod repair;
mod request;

pub use client::{RetryConfig, StrictClient};
pub use request::{StrictOutput, StrictRequest, StrictRequestBuilder};
