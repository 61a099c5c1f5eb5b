//! Hostname resolution backed by the operating system resolver.
//!
//! Provides [`SystemResolver`], the production [`crate::domain::Resolver`],
//! and [`resolve_host`] for one-off lookups.

mod system_resolver;

pub use system_resolver::{DEFAULT_RESOLVE_TIMEOUT, SystemResolver, resolve_host};
