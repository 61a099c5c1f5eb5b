//! Resolver trait for hostname lookups.

use std::net::IpAddr;

use async_trait::async_trait;

use crate::error::ResolutionError;

/// Hostname → address lookup.
///
/// The engine treats resolution as an opaque, fallible and possibly slow
/// operation. Parsing and normalization never call it.
///
/// # Implementations
///
/// - [`crate::infrastructure::dns::SystemResolver`] - system resolver with a timeout
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Resolves `host` to one IP address.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::NoAddress`] if the lookup succeeded without
    /// results, [`ResolutionError::Lookup`] if it failed, and
    /// [`ResolutionError::Timeout`] if it did not finish in time.
    async fn resolve(&self, host: &str) -> Result<IpAddr, ResolutionError>;
}
