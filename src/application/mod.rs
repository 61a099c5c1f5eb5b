//! Application layer services.
//!
//! Services hold a [`crate::domain::Resolver`] and a rule set and expose the
//! parse, canonicalize and validate workflow used by callers.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Canonicalization, resolution and validation

pub mod services;
