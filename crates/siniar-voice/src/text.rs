use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Characters that are read aloud or garble prosody when sent to the TTS
/// engine: emphasis markers and quotes.
const STRIPPED_CHARS: &[char] = &['*', '"', '\u{201C}', '\u{201D}'];

/// Normalizes a dialogue line for synthesis.
///
/// Removes emphasis and quote characters, collapses whitespace runs to a
/// single space, and trims. Cleaning cleaned text is a no-op.
pub fn clean_text(text: &str) -> String {
    let stripped: String = text.chars().filter(|c| !STRIPPED_CHARS.contains(c)).collect();
    WHITESPACE_RUN.replace_all(&stripped, " ").trim().to_string()
}
