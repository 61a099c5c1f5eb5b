//! URL canonicalization, resolution and validation service.

use std::net::IpAddr;
use std::sync::Arc;

use anyhow::Result as AnyResult;
use tracing::debug;

use crate::config::Config;
use crate::domain::Resolver;
use crate::domain::entities::{NormalizationFlags, ParsedUrl};
use crate::error::{NormalizeError, ParseError, ResolutionError, UrlError, ValidationError};
use crate::infrastructure::dns::SystemResolver;
use crate::utils::host_check::is_valid_hostname;
use crate::utils::url_normalizer::normalize;
use crate::utils::url_parser::parse;

/// Service bundling a rule set and a resolver.
///
/// Parsing and normalization are synchronous and hold no state between
/// calls; only [`Self::resolve`] and DNS-checked validation touch the
/// network. Safe to share across tasks behind an `Arc`.
pub struct UrlService<R: Resolver> {
    resolver: Arc<R>,
    flags: NormalizationFlags,
    dns_check: bool,
}

impl<R: Resolver> UrlService<R> {
    /// Creates a new service. DNS checks are off by default.
    pub fn new(resolver: Arc<R>, flags: NormalizationFlags) -> Self {
        Self {
            resolver,
            flags,
            dns_check: false,
        }
    }

    /// Sets whether [`Self::validate_default`] resolves hosts.
    #[must_use]
    pub fn with_dns_check(mut self, dns_check: bool) -> Self {
        self.dns_check = dns_check;
        self
    }

    pub fn flags(&self) -> NormalizationFlags {
        self.flags
    }

    pub fn parse(&self, raw: &str) -> Result<ParsedUrl, ParseError> {
        parse(raw)
    }

    /// Normalizes an already parsed URL with the service's rule set.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::EncodingError`] for malformed escapes.
    pub fn normalize(&self, url: ParsedUrl) -> Result<String, NormalizeError> {
        normalize(url, self.flags)
    }

    /// Parses and normalizes `raw` with the service's rule set.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError::Parse`] for unparseable input and
    /// [`UrlError::Normalize`] for malformed escapes.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let service = UrlService::new(Arc::new(SystemResolver::default()), NormalizationFlags::all());
    /// assert_eq!(service.canonicalize("Example.com:80/a/../b")?, "http://example.com/b");
    /// ```
    pub fn canonicalize(&self, raw: &str) -> Result<String, UrlError> {
        let parsed = parse(raw)?;
        Ok(self.normalize(parsed)?)
    }

    /// Returns true if both strings canonicalize to the same URL.
    ///
    /// # Errors
    ///
    /// Fails if either input cannot be canonicalized.
    pub fn same_url(&self, a: &str, b: &str) -> Result<bool, UrlError> {
        Ok(self.canonicalize(a)? == self.canonicalize(b)?)
    }

    /// Resolves the host of a parsed URL.
    ///
    /// # Errors
    ///
    /// Propagates the resolver's [`ResolutionError`].
    pub async fn resolve(&self, url: &ParsedUrl) -> Result<IpAddr, ResolutionError> {
        url.resolve(self.resolver.as_ref()).await
    }

    /// Validates `raw` as a dispatchable URL.
    ///
    /// # Checks
    ///
    /// 1. Parses leniently
    /// 2. Host shape: labels of 2-64 characters and a 2-64 letter TLD
    ///    (IP literals and `localhost` pass)
    /// 3. The serialized URL is accepted by the `url` crate
    /// 4. With `perform_dns_check`, the host resolves
    ///
    /// # Errors
    ///
    /// - [`ValidationError::InvalidUrl`] if parsing or step 3 fails
    /// - [`ValidationError::InvalidHost`] if the host shape is wrong
    /// - [`ValidationError::Resolution`] if the lookup fails
    pub async fn validate(&self, raw: &str, perform_dns_check: bool) -> Result<(), ValidationError> {
        let parsed = parse(raw)?;

        if !is_valid_hostname(&parsed.host) {
            debug!(host = %parsed.host, "hostname failed shape check");
            return Err(ValidationError::InvalidHost(parsed.host));
        }

        parsed.to_url()?;

        if perform_dns_check {
            self.resolve(&parsed).await?;
        }

        Ok(())
    }

    /// [`Self::validate`] using the service's DNS check setting.
    ///
    /// # Errors
    ///
    /// See [`Self::validate`].
    pub async fn validate_default(&self, raw: &str) -> Result<(), ValidationError> {
        self.validate(raw, self.dns_check).await
    }
}

impl UrlService<SystemResolver> {
    /// Builds a service backed by the system resolver from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration names an unknown rule.
    pub fn from_config(config: &Config) -> AnyResult<Self> {
        let resolver = SystemResolver::new(config.resolve_timeout());
        Ok(Self::new(Arc::new(resolver), config.flags()?).with_dns_check(config.dns_check))
    }
}

/// Validates `raw` with the system resolver and all rules.
///
/// # Errors
///
/// See [`UrlService::validate`].
pub async fn validate(raw: &str, perform_dns_check: bool) -> Result<(), ValidationError> {
    UrlService::new(Arc::new(SystemResolver::default()), NormalizationFlags::all())
        .validate(raw, perform_dns_check)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockResolver;
    use crate::domain::entities::Rule;

    fn service(resolver: MockResolver) -> UrlService<MockResolver> {
        UrlService::new(Arc::new(resolver), NormalizationFlags::all())
    }

    #[test]
    fn test_canonicalize() {
        let service = service(MockResolver::new());
        assert_eq!(
            service.canonicalize("HTTP://Example.COM:80//a/./b?z=1&a=2").unwrap(),
            "http://example.com/a/b?a=2&z=1"
        );
    }

    #[test]
    fn test_canonicalize_with_custom_flags() {
        let service = UrlService::new(
            Arc::new(MockResolver::new()),
            NormalizationFlags::all().without(Rule::SortQuery),
        );
        assert_eq!(
            service.canonicalize("example.com?z=1&a=2").unwrap(),
            "http://example.com?z=1&a=2"
        );
    }

    #[test]
    fn test_normalize_parsed() {
        let service = UrlService::new(
            Arc::new(MockResolver::new()),
            NormalizationFlags::empty().with(Rule::RemoveDefaultPort),
        );
        let url = service.parse("HTTPS://A.com:443//x").unwrap();
        assert_eq!(service.normalize(url).unwrap(), "https://a.com//x");
    }

    #[test]
    fn test_canonicalize_errors() {
        let service = service(MockResolver::new());
        assert!(matches!(
            service.canonicalize("ftp://example.com"),
            Err(UrlError::Parse(ParseError::InvalidScheme(_)))
        ));
        assert!(matches!(
            service.canonicalize("example.com/?q=%zz"),
            Err(UrlError::Normalize(_))
        ));
    }

    #[test]
    fn test_same_url() {
        let service = service(MockResolver::new());
        assert!(service.same_url("example.com", "HTTP://EXAMPLE.COM:80").unwrap());
        assert!(service.same_url("//a.com/x?b=1&a=2", "http://a.com/y/../x?a=2&b=1").unwrap());
        assert!(!service.same_url("http://a.com", "https://a.com").unwrap());
    }

    #[tokio::test]
    async fn test_resolve_uses_resolver() {
        let mut resolver = MockResolver::new();
        resolver
            .expect_resolve()
            .withf(|host| host == "example.com")
            .times(1)
            .returning(|_| Ok("93.184.216.34".parse().unwrap()));

        let service = service(resolver);
        let url = service.parse("example.com").unwrap();
        assert_eq!(
            service.resolve(&url).await.unwrap(),
            "93.184.216.34".parse::<IpAddr>().unwrap()
        );
    }

    #[tokio::test]
    async fn test_resolve_ip_literal_skips_resolver() {
        let mut resolver = MockResolver::new();
        resolver.expect_resolve().times(0);

        let service = service(resolver);
        let url = service.parse("http://10.1.2.3:8080/").unwrap();
        assert_eq!(
            service.resolve(&url).await.unwrap(),
            "10.1.2.3".parse::<IpAddr>().unwrap()
        );
    }

    #[tokio::test]
    async fn test_validate_without_dns() {
        let mut resolver = MockResolver::new();
        resolver.expect_resolve().times(0);

        let service = service(resolver);
        assert!(service.validate("example.com/path", false).await.is_ok());
        assert!(service.validate("localhost:3000", false).await.is_ok());
    }

    #[tokio::test]
    async fn test_validate_invalid_url() {
        let service = service(MockResolver::new());
        assert!(matches!(
            service.validate("mailto://user@example.com", false).await,
            Err(ValidationError::InvalidUrl(ParseError::InvalidScheme(_)))
        ));
        assert!(matches!(
            service.validate("example.com:99999", false).await,
            Err(ValidationError::InvalidUrl(ParseError::SyntaxError(_)))
        ));
    }

    #[tokio::test]
    async fn test_validate_invalid_host() {
        let service = service(MockResolver::new());
        assert_eq!(
            service.validate("http://intranet/", false).await,
            Err(ValidationError::InvalidHost("intranet".to_string()))
        );
        assert_eq!(
            service.validate("http://x.com/", false).await,
            Err(ValidationError::InvalidHost("x.com".to_string()))
        );
    }

    #[tokio::test]
    async fn test_validate_with_dns_failure() {
        let mut resolver = MockResolver::new();
        resolver.expect_resolve().times(1).returning(|host| {
            Err(ResolutionError::NoAddress(host.to_string()))
        });

        let service = service(resolver);
        let err = service.validate("unknown-host.example", true).await.unwrap_err();
        assert_eq!(
            err,
            ValidationError::Resolution(ResolutionError::NoAddress(
                "unknown-host.example".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_validate_default_uses_configured_dns_check() {
        let mut resolver = MockResolver::new();
        resolver
            .expect_resolve()
            .times(1)
            .returning(|_| Ok("127.0.0.1".parse().unwrap()));

        let service = service(resolver).with_dns_check(true);
        assert!(service.validate_default("example.com").await.is_ok());
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            disabled_rules: vec!["sort-query".to_string()],
            dns_check: true,
            ..Config::default()
        };
        let service = UrlService::from_config(&config).unwrap();
        assert!(!service.flags().contains(Rule::SortQuery));

        let bad = Config {
            disabled_rules: vec!["nope".to_string()],
            ..Config::default()
        };
        assert!(UrlService::from_config(&bad).is_err());
    }
}
