//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`dns`] - Hostname resolution through the operating system

pub mod dns;
