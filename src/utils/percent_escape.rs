//! Percent-escape checks and escape normalization.
//!
//! Escapes of unreserved characters (`A-Z a-z 0-9 - . _ ~`) are decoded,
//! every other escape is kept with uppercase hex digits, and characters that
//! may not appear literally in a component are encoded as UTF-8 escapes.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::error::NormalizeError;

/// Characters encoded in every component. `%` is absent: existing escapes
/// are handled separately.
const ALWAYS: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

pub(crate) const PATH: &AsciiSet = &ALWAYS.add(b'#').add(b'?');
pub(crate) const QUERY: &AsciiSet = &ALWAYS.add(b'#');
pub(crate) const FRAGMENT: &AsciiSet = &ALWAYS.add(b'#');

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}

/// Returns the two hex digits following a `%` at `pos`, if well formed.
fn escape_at(s: &str, pos: usize) -> Option<&str> {
    s.get(pos + 1..pos + 3)
        .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
}

fn malformed_at(s: &str, pos: usize) -> String {
    s[pos..].chars().take(3).collect()
}

/// Returns the first malformed escape sequence in `s`, if any.
pub fn find_malformed_escape(s: &str) -> Option<String> {
    s.match_indices('%')
        .map(|(pos, _)| pos)
        .find(|&pos| escape_at(s, pos).is_none())
        .map(|pos| malformed_at(s, pos))
}

/// Normalizes the escapes of one URL component.
///
/// # Errors
///
/// Returns [`NormalizeError::EncodingError`] when a `%` is not followed by
/// two hex digits.
pub fn normalize_escapes(
    input: &str,
    encode_set: &'static AsciiSet,
    component: &'static str,
) -> Result<String, NormalizeError> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('%') {
        out.extend(utf8_percent_encode(&rest[..pos], encode_set));

        let hex = escape_at(rest, pos).ok_or_else(|| NormalizeError::EncodingError {
            component,
            sequence: malformed_at(rest, pos),
        })?;
        let byte = u8::from_str_radix(hex, 16).map_err(|_| NormalizeError::EncodingError {
            component,
            sequence: malformed_at(rest, pos),
        })?;

        if is_unreserved(byte) {
            out.push(char::from(byte));
        } else {
            out.push('%');
            out.push_str(&hex.to_ascii_uppercase());
        }

        rest = &rest[pos + 3..];
    }

    out.extend(utf8_percent_encode(rest, encode_set));
    Ok(out)
}
