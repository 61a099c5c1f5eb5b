//! System resolver implementation.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::lookup_host;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::domain::Resolver;
use crate::domain::entities::ip_literal;
use crate::error::ResolutionError;

/// Lookup timeout used by [`SystemResolver::default`].
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolves hostnames through the operating system (`getaddrinfo`).
///
/// Each lookup is bounded by a timeout; expiry is reported as
/// [`ResolutionError::Timeout`] so callers can retry. IP literals are
/// returned without a lookup.
#[derive(Debug, Clone)]
pub struct SystemResolver {
    timeout: Duration,
}

impl SystemResolver {
    /// Creates a resolver with the given per-lookup timeout.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self::new(DEFAULT_RESOLVE_TIMEOUT)
    }
}

#[async_trait]
impl Resolver for SystemResolver {
    async fn resolve(&self, host: &str) -> Result<IpAddr, ResolutionError> {
        if let Some(ip) = ip_literal(host) {
            return Ok(ip);
        }

        let mut addrs = match timeout(self.timeout, lookup_host((host, 0))).await {
            Ok(Ok(addrs)) => addrs,
            Ok(Err(e)) => {
                warn!(host, error = %e, "hostname lookup failed");
                return Err(ResolutionError::Lookup {
                    host: host.to_string(),
                    reason: e.to_string(),
                });
            }
            Err(_) => {
                warn!(host, timeout_ms = self.timeout.as_millis() as u64, "hostname lookup timed out");
                return Err(ResolutionError::Timeout {
                    host: host.to_string(),
                    timeout_ms: self.timeout.as_millis() as u64,
                });
            }
        };

        let ip = addrs
            .next()
            .map(|addr| addr.ip())
            .ok_or_else(|| ResolutionError::NoAddress(host.to_string()))?;
        debug!(host, %ip, "resolved hostname");
        Ok(ip)
    }
}

/// Resolves `host` with a default [`SystemResolver`].
///
/// # Errors
///
/// See [`Resolver::resolve`].
pub async fn resolve_host(host: &str) -> Result<IpAddr, ResolutionError> {
    SystemResolver::default().resolve(host).await
}
