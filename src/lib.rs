//! # urlnorm
//!
//! Lenient URL parsing and configurable normalization for user-typed web
//! addresses.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - [`ParsedUrl`], the rule set and the
//!   [`Resolver`] trait
//! - **Utilities** ([`utils`]) - Parser, normalization pipeline, escape and
//!   host helpers, text scanning
//! - **Application Layer** ([`application`]) - [`UrlService`] tying rules and
//!   a resolver together
//! - **Infrastructure Layer** ([`infrastructure`]) - System DNS resolver
//!
//! ## Features
//!
//! - Scheme repair (`example.com`, `//example.com`, `localhost:3000`)
//! - Seven independently toggled normalization rules
//! - Decimal, octal and hex IPv4 host decoding
//! - Hostname resolution with a timeout
//! - URL extraction from free text
//!
//! ## Quick Start
//!
//! ```
//! use urlnorm::{NormalizationFlags, Rule, normalize, normalize_str, parse};
//!
//! assert_eq!(
//!     normalize_str("HTTP://www.Example.com:80/a/./b/../c?z=1&a=2").unwrap(),
//!     "http://www.example.com/a/c?a=2&z=1"
//! );
//!
//! let url = parse("0x7f000001:8080//x").unwrap();
//! let flags = NormalizationFlags::all().without(Rule::RemoveDuplicateSlashes);
//! assert_eq!(normalize(url, flags).unwrap(), "http://127.0.0.1:8080//x");
//! ```
//!
//! ## Configuration
//!
//! Defaults for [`UrlService`] and logging are loaded from environment
//! variables via [`config::Config`].

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod telemetry;
pub mod utils;

pub use application::services::{UrlService, validate};
pub use domain::Resolver;
pub use domain::entities::{NormalizationFlags, ParsedUrl, Rule};
pub use error::{NormalizeError, ParseError, ResolutionError, UnknownRule, UrlError, ValidationError};
pub use infrastructure::dns::{SystemResolver, resolve_host};
pub use utils::host_check::is_valid_hostname;
pub use utils::text_scan::{extract, linkify};
pub use utils::url_normalizer::{normalize, normalize_str};
pub use utils::url_parser::parse;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::UrlService;
    pub use crate::domain::Resolver;
    pub use crate::domain::entities::{NormalizationFlags, ParsedUrl, Rule};
    pub use crate::error::{NormalizeError, ParseError, ResolutionError, UrlError, ValidationError};
    pub use crate::infrastructure::dns::SystemResolver;
    pub use crate::utils::url_normalizer::{normalize, normalize_str};
    pub use crate::utils::url_parser::parse;
}
