//! Finding URL-shaped substrings in free text.
//!
//! These are plain pattern scans. Matches are returned as written; run them
//! through [`crate::normalize_str`] to compare or deduplicate them.

use std::sync::LazyLock;

use regex::Regex;

/// `http(s)://` or `www.`, a dotted hostname, then an optional trailer of
/// URL-safe characters that does not end in punctuation.
static URL_IN_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:https?://|www\.)[a-z0-9](?:[a-z0-9-]*[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]*[a-z0-9])?)+(?:[:/?#](?:[-a-z0-9._~:/?#\[\]@!$&'()*+,;=%]*[-a-z0-9_~/#=&%+])?)?",
    )
    .unwrap()
});

/// Returns up to `max_matches` URL-shaped substrings in order of appearance.
///
/// # Examples
///
/// ```
/// let text = "See https://example.com/docs and www.rust-lang.org.";
/// assert_eq!(
///     urlnorm::extract(text, 10),
///     vec!["https://example.com/docs", "www.rust-lang.org"]
/// );
/// ```
pub fn extract(text: &str, max_matches: usize) -> Vec<&str> {
    URL_IN_TEXT
        .find_iter(text)
        .take(max_matches)
        .map(|m| m.as_str())
        .collect()
}

/// Wraps every URL-shaped substring in an anchor tag.
///
/// ```
/// assert_eq!(
///     urlnorm::linkify("go to www.example.com now"),
///     r#"go to <a href="www.example.com">www.example.com</a> now"#
/// );
/// ```
pub fn linkify(text: &str) -> String {
    URL_IN_TEXT
        .replace_all(text, r#"<a href="$0">$0</a>"#)
        .into_owned()
}
