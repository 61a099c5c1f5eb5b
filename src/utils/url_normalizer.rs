//! URL normalization: one ordered rule pipeline producing a canonical string.
//!
//! Two URLs are considered equivalent when they normalize to the same
//! string. Scheme and host are always lowercased; everything else is governed
//! by [`NormalizationFlags`].

use tracing::debug;

use crate::domain::entities::{NormalizationFlags, ParsedUrl, Rule};
use crate::error::{NormalizeError, UrlError};
use crate::utils::host_numeric::decode_numeric_host;
use crate::utils::percent_escape::{self, normalize_escapes};
use crate::utils::url_parser::parse;

/// Normalizes a parsed URL to its canonical string.
///
/// # Normalization Rules
///
/// Applied in this order when enabled:
///
/// 1. **Host dots**: `example.com.` → `example.com`
/// 2. **Numeric hosts**: `0x7f000001` → `127.0.0.1`
/// 3. **Default ports**: removed (80 for HTTP, 443 for HTTPS)
/// 4. **Duplicate slashes**: `/a//b` → `/a/b`
/// 5. **Dot segments**: `/a/./b/../c` → `/a/c`
/// 6. **Escapes**: `%7e` → `~`, `%2f` → `%2F`, ` ` → `%20`
/// 7. **Query order**: `b=2&a=1` → `a=1&b=2` (raw text order)
///
/// # Errors
///
/// Returns [`NormalizeError::EncodingError`] if escape normalization meets a
/// `%` that does not start a valid escape.
///
/// # Examples
///
/// ```
/// use urlnorm::{NormalizationFlags, normalize, parse};
///
/// let url = parse("HTTP://Example.COM:80///x//../y?b=2&a=1").unwrap();
/// assert_eq!(
///     normalize(url, NormalizationFlags::all()).unwrap(),
///     "http://example.com/y?a=1&b=2"
/// );
/// ```
pub fn normalize(mut url: ParsedUrl, flags: NormalizationFlags) -> Result<String, NormalizeError> {
    url.scheme.make_ascii_lowercase();
    if url.scheme.is_empty() {
        url.scheme.push_str("http");
    }
    url.host = url.host.to_lowercase();

    for rule in flags.iter() {
        apply_rule(rule, &mut url, flags)?;
    }

    Ok(url.render(false))
}

/// Parses and normalizes with every rule enabled.
///
/// # Errors
///
/// Returns [`UrlError::Parse`] or [`UrlError::Normalize`] from the failing
/// stage.
pub fn normalize_str(raw: &str) -> Result<String, UrlError> {
    let parsed = parse(raw)?;
    Ok(normalize(parsed, NormalizationFlags::all())?)
}

fn apply_rule(
    rule: Rule,
    url: &mut ParsedUrl,
    flags: NormalizationFlags,
) -> Result<(), NormalizeError> {
    match rule {
        Rule::RemoveUnnecessaryHostDots => {
            let trimmed = url.host.trim_matches('.');
            if !trimmed.is_empty() && trimmed.len() != url.host.len() {
                url.host = trimmed.to_string();
            }
        }
        Rule::DecodeHostNumeric => {
            if let Some(ip) = decode_numeric_host(&url.host) {
                debug!(host = %url.host, decoded = %ip, "decoded numeric host");
                url.host = ip.to_string();
            }
        }
        Rule::RemoveDefaultPort => {
            if url.has_default_port() {
                url.port = None;
            }
        }
        Rule::RemoveDuplicateSlashes => {
            if url.path.contains("//") {
                url.path = collapse_slashes(&url.path);
            }
        }
        Rule::RemoveDotSegments => {
            if !url.path.is_empty() {
                url.path = remove_dot_segments(&url.path);
            }
        }
        Rule::EscapeNormalization => {
            url.path = normalize_escapes(&url.path, percent_escape::PATH, "path")?;
            url.query = normalize_escapes(&url.query, percent_escape::QUERY, "query")?;
            url.fragment = normalize_escapes(&url.fragment, percent_escape::FRAGMENT, "fragment")?;

            // Decoding `%2E` can expose new dot segments.
            if flags.contains(Rule::RemoveDotSegments) && has_dot_segment(&url.path) {
                url.path = remove_dot_segments(&url.path);
            }
        }
        Rule::SortQuery => {
            if !url.query.is_empty() {
                url.query = sort_query(&url.query);
            }
        }
    }
    Ok(())
}

fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_slash = false;
    for c in path.chars() {
        if c == '/' && previous_slash {
            continue;
        }
        previous_slash = c == '/';
        out.push(c);
    }
    out
}

fn has_dot_segment(path: &str) -> bool {
    path.split('/').any(|segment| segment == "." || segment == "..")
}

/// Resolves `.` and `..` segments.
///
/// `..` above the root is dropped. A path whose last segment was a dot
/// segment keeps its trailing slash, and the result always starts with `/`.
fn remove_dot_segments(path: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut last_was_dot = false;

    for segment in path.split('/') {
        match segment {
            ".." => {
                kept.pop();
            }
            "." => {}
            _ => kept.push(segment),
        }
        last_was_dot = segment == "." || segment == "..";
    }

    let mut out = kept.join("/");
    if !out.starts_with('/') {
        out.insert(0, '/');
    }
    if last_was_dot && !out.ends_with('/') {
        out.push('/');
    }
    out
}

/// Sorts `&`-separated tokens by their raw text; no decoding happens first.
fn sort_query(query: &str) -> String {
    let mut tokens: Vec<&str> = query.split('&').collect();
    tokens.sort();
    tokens.join("&")
}
