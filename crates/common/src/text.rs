//! Text utilities for article slugs and summaries.

use once_cell::sync::Lazy;
use regex::Regex;

#[allow(clippy::expect_used)]
static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"));

#[allow(clippy::expect_used)]
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

#[allow(clippy::expect_used)]
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Maximum length of a derived article summary.
pub const SUMMARY_MAX_CHARS: usize = 150;

/// Derive a URL slug from a title.
///
/// Lowercases the input and collapses every run of non-alphanumeric
/// characters into a single hyphen. The derivation is a pure function:
/// the same title always yields the same slug.
#[must_use]
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let slug = NON_SLUG_CHARS.replace_all(&lowered, "-");
    slug.trim_matches('-').to_string()
}

/// Strip HTML tags and collapse whitespace.
#[must_use]
pub fn strip_html(html: &str) -> String {
    let text = HTML_TAG.replace_all(html, " ");
    WHITESPACE_RUN.replace_all(&text, " ").trim().to_string()
}

/// Derive a plain-text summary from an HTML body.
///
/// Strips tags, then truncates to at most [`SUMMARY_MAX_CHARS`] characters
/// without splitting a word, appending an ellipsis when truncated.
#[must_use]
pub fn summarize_html(html: &str) -> String {
    let text = strip_html(html);

    if text.chars().count() <= SUMMARY_MAX_CHARS {
        return text;
    }

    let truncated: String = text.chars().take(SUMMARY_MAX_CHARS).collect();
    let cut = truncated
        .rfind(char::is_whitespace)
        .unwrap_or(truncated.len());

    format!("{}...", truncated[..cut].trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Breaking: Markets Fall!  "), "breaking-markets-fall");
        assert_eq!(slugify("Rust 1.85 Released"), "rust-1-85-released");
    }

    #[test]
    fn test_slugify_is_idempotent_for_same_title() {
        let title = "Election Night Coverage 2026";
        assert_eq!(slugify(title), slugify(title));
        assert_eq!(slugify(title), "election-night-coverage-2026");
    }

    #[test]
    fn test_slugify_already_slugged() {
        assert_eq!(slugify("already-a-slug"), "already-a-slug");
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(
            strip_html("<p>Hello <strong>world</strong></p>"),
            "Hello world"
        );
        assert_eq!(strip_html("no tags here"), "no tags here");
    }

    #[test]
    fn test_summarize_short_content_untouched() {
        let html = "<p>Short body.</p>";
        assert_eq!(summarize_html(html), "Short body.");
    }

    #[test]
    fn test_summarize_truncates_on_word_boundary() {
        let word = "word ";
        let html = format!("<p>{}</p>", word.repeat(60));
        let summary = summarize_html(&html);

        assert!(summary.ends_with("..."));
        // No split word: everything before the ellipsis is whole words.
        let body = summary.trim_end_matches("...");
        assert!(body.split(' ').all(|w| w == "word"));
        assert!(body.chars().count() <= SUMMARY_MAX_CHARS);
    }
}
