use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Canonical form of an email body before it is classified.
///
/// Lowercases, drops every character that is not a letter, digit, underscore
/// or whitespace, collapses whitespace runs (newlines included) into one space
/// and trims the ends. Uppercase letters without a lowercase mapping are
/// dropped as well. Applying it twice yields the same string.
pub fn normalize_email_text(raw: &str) -> String {
    let kept: String = raw
        .to_lowercase()
        .chars()
        .filter(|ch| {
            (ch.is_alphanumeric() && !ch.is_uppercase()) || *ch == '_' || ch.is_whitespace()
        })
        .collect();

    WHITESPACE_RUN.replace_all(&kept, " ").trim().to_string()
}
