//! Core domain entities.
//!
//! - [`ParsedUrl`] - A URL split into its syntactic fields
//! - [`NormalizationFlags`] / [`Rule`] - The canonicalization rule set
//!
//! Entities are plain data: parsing lives in [`crate::utils::url_parser`]
//! and the rule pipeline in [`crate::utils::url_normalizer`].

pub mod normalization_flags;
pub mod parsed_url;

pub use normalization_flags::{NormalizationFlags, Rule};
pub use parsed_url::{ParsedUrl, default_port, ip_literal};
