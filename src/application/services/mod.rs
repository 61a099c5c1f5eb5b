//! Services composing parsing, normalization and resolution.

pub mod url_service;

pub use url_service::{UrlService, validate};
