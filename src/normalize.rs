//! Whitespace normalization for text extracted from markup.

use regex::Regex;
use std::sync::OnceLock;

fn whitespace_run() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// Trim the text and collapse every whitespace run to a single space.
///
/// Returns `None` when nothing but whitespace remains.
pub fn normalize(text: &str) -> Option<String> {
    condense(text.trim())
}

/// Collapse every whitespace run (newlines included) to a single space
/// without trimming the ends.
///
/// Returns `None` for empty input. A whitespace-only input condenses to a
/// single space.
pub fn condense(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    Some(whitespace_run().replace_all(text, " ").into_owned())
}
