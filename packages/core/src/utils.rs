// ABOUTME: Shared utility functions for ShopX
// ABOUTME: Slug generation, URL checks, id allocation and text helpers

use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9 -]").expect("static slug regex"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static slug regex"));
static HYPHEN_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("static slug regex"));

/// Derives a URL-safe slug from a display name.
///
/// Lowercases, drops everything outside `[a-z0-9 -]`, turns whitespace runs
/// into a single hyphen, collapses repeated hyphens and trims hyphens from
/// both ends.
pub fn slugify(value: &str) -> String {
    let lowered = value.to_lowercase();
    let stripped = DISALLOWED_SLUG_CHARS.replace_all(&lowered, "");
    let hyphenated = WHITESPACE_RUN.replace_all(&stripped, "-");
    let collapsed = HYPHEN_RUN.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

/// Whether `value` parses as an absolute URL
pub fn is_valid_url(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}

/// Loose email shape check: something before the `@`, a dotted domain after it
pub fn is_valid_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Next id for an in-memory collection: max existing id + 1, or 1 when empty
pub fn next_id(existing: impl IntoIterator<Item = u64>) -> u64 {
    existing.into_iter().max().map_or(1, |max| max + 1)
}

/// Trims a string, mapping blank input to `None`
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Truncates a string to a maximum length (in characters) with ellipsis
pub fn truncate(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
