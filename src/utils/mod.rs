//! Parsing, normalization and scanning helpers.
//!
//! - [`url_parser`] - Lenient parsing into [`crate::domain::entities::ParsedUrl`]
//! - [`url_normalizer`] - The normalization rule pipeline
//! - [`percent_escape`] - Percent-escape canonicalization
//! - [`host_numeric`] - Decimal, octal and hex IPv4 host decoding
//! - [`host_check`] - Hostname shape check used by validation
//! - [`text_scan`] - Finding URLs in free text

pub mod host_check;
pub mod host_numeric;
pub mod percent_escape;
pub mod text_scan;
pub mod url_normalizer;
pub mod url_parser;
