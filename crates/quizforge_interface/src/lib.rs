//! Trait definitions for the Quizforge generation library.

mod driver;

pub use driver::TextDriver;
