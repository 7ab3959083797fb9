//! Telemetry initialization (tracing/tracing-subscriber).
//!
//! `QUIZFORGE_LOG` controls the filter (e.g. "debug" or full directives
//! like "info,quizforge=debug,quizforge_strict=debug"); `LOG_FORMAT=json`
//! selects structured output.

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("QUIZFORGE_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info,quizforge=debug,quizforge_strict=debug"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}
