//! Parsed URL entity produced by the lenient parser.

use std::fmt;
use std::net::{IpAddr, Ipv6Addr};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::resolver::Resolver;
use crate::error::{ParseError, ResolutionError};

/// Returns the default port for a scheme, if it has one.
pub fn default_port(scheme: &str) -> Option<&'static str> {
    match scheme {
        "http" => Some("80"),
        "https" => Some("443"),
        _ => None,
    }
}

/// Interprets a host as an IP literal, accepting bracketed IPv6.
pub fn ip_literal(host: &str) -> Option<IpAddr> {
    if let Some(inner) = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
        return inner.parse::<Ipv6Addr>().ok().map(IpAddr::V6);
    }
    host.parse::<IpAddr>().ok()
}

/// A URL split into its syntactic fields.
///
/// Created by [`crate::parse`]; the host is always non-empty and lowercase,
/// and `port` holds the scheme default when the input did not name one.
/// `query` and `fragment` are empty when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedUrl {
    pub scheme: String,
    pub userinfo: Option<String>,
    pub host: String,
    pub port: Option<String>,
    pub path: String,
    pub query: String,
    pub fragment: String,
}

impl ParsedUrl {
    /// Returns true if `port` equals the scheme's default port.
    pub fn has_default_port(&self) -> bool {
        match (self.port.as_deref(), default_port(&self.scheme)) {
            (Some(port), Some(default)) => port == default,
            _ => false,
        }
    }

    /// Human-readable reconstruction without canonicalization.
    ///
    /// The port is left out when it is the scheme default, so
    /// `http://example.com:80` displays as `http://example.com`.
    pub fn serialize(&self) -> String {
        self.render(true)
    }

    /// Converts into a [`Url`] for handing off to a network client.
    ///
    /// # Errors
    ///
    /// Returns the `url` crate's error if the reconstruction is not a valid
    /// WHATWG URL (e.g. a port above 65535).
    pub fn to_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.serialize())
    }

    /// Resolves the host to an IP address.
    ///
    /// IP-literal hosts are returned directly without a lookup.
    ///
    /// # Errors
    ///
    /// Propagates the resolver's [`ResolutionError`].
    pub async fn resolve<R: Resolver + ?Sized>(
        &self,
        resolver: &R,
    ) -> Result<IpAddr, ResolutionError> {
        match ip_literal(&self.host) {
            Some(ip) => Ok(ip),
            None => resolver.resolve(&self.host).await,
        }
    }

    /// Writes `scheme://[userinfo@]host[:port]path[?query][#fragment]`.
    pub(crate) fn render(&self, omit_default_port: bool) -> String {
        let mut out = String::with_capacity(
            self.scheme.len() + self.host.len() + self.path.len() + self.query.len() + 16,
        );
        out.push_str(&self.scheme);
        out.push_str("://");

        if let Some(userinfo) = &self.userinfo {
            out.push_str(userinfo);
            out.push('@');
        }

        out.push_str(&self.host);

        if let Some(port) = &self.port
            && !(omit_default_port && self.has_default_port())
        {
            out.push(':');
            out.push_str(port);
        }

        out.push_str(&self.path);

        if !self.query.is_empty() {
            out.push('?');
            out.push_str(&self.query);
        }

        if !self.fragment.is_empty() {
            out.push('#');
            out.push_str(&self.fragment);
        }

        out
    }
}

impl fmt::Display for ParsedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl FromStr for ParsedUrl {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::utils::url_parser::parse(s)
    }
}
