//! Response normalization.
//!
//! Strict parse first; if that fails, one bounded cleanup pass and one
//! re-parse. Anything still unparseable is a validation failure whose
//! message becomes feedback for the next attempt.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

/// A comma left dangling before a closing brace or bracket.
static TRAILING_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("trailing comma pattern compiles"));

/// A double quote sandwiched between word characters: an apostrophe that
/// the blanket quote normalization clobbered.
static INNER_QUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w)"(\w)"#).expect("inner quote pattern compiles"));

/// Parses the raw backend output, applying the bounded textual repairs on
/// a first failure.
pub(crate) fn parse_lenient(raw: &str) -> Result<Value, String> {
    let trimmed = raw.trim();
    match serde_json::from_str(trimmed) {
        Ok(value) => Ok(value),
        Err(_) => {
            let cleaned = cleanup(trimmed);
            debug!(cleaned = %cleaned, "Strict parse failed; retrying after cleanup");
            serde_json::from_str(&cleaned)
                .map_err(|e| format!("Response is not valid JSON: {}", e))
        }
    }
}

/// The bounded repair set: strip trailing commas, collapse line breaks,
/// normalize quote characters.
fn cleanup(text: &str) -> String {
    let no_trailing = TRAILING_COMMA_RE.replace_all(text, "$1");

    let collapsed: String = no_trailing
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();

    // Curly quotes to straight, then all singles to doubles; quotes that
    // land between word characters were apostrophes, so restore those.
    let straightened = collapsed
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{201C}', '\u{201D}'], "\"")
        .replace('\'', "\"");
    INNER_QUOTE_RE.replace_all(&straightened, "$1'$2").into_owned()
}
