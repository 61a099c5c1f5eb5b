//! Error types for parsing, normalization, resolution and validation.
//!
//! Each stage reports its own error kind so callers can tell a permanently
//! malformed input ([`ParseError`], [`NormalizeError`]) from a network
//! condition that may clear up on retry ([`ResolutionError`]).

use thiserror::Error;

/// Errors produced by the lenient parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No usable hostname could be found in the input.
    #[error("empty hostname")]
    EmptyHost,

    /// The recovered host candidate is too short to be a hostname.
    #[error("invalid hostname: {0:?}")]
    InvalidHost(String),

    /// An explicit scheme other than `http` or `https`.
    #[error("unsupported scheme {0:?}: only http and https are allowed")]
    InvalidScheme(String),

    /// The URL splitter rejected the string.
    #[error("malformed URL: {0}")]
    SyntaxError(String),
}

/// Errors produced by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("malformed percent-encoding {sequence:?} in {component}")]
    EncodingError {
        component: &'static str,
        sequence: String,
    },
}

/// Either stage of the parse → normalize pipeline failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// Hostname resolution failures.
///
/// Kept apart from [`ParseError`]: a resolution failure says nothing about
/// whether the URL itself is well formed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("no address found for {0:?}")]
    NoAddress(String),

    #[error("unable to resolve {host:?}: {reason}")]
    Lookup { host: String, reason: String },

    #[error("resolving {host:?} timed out after {timeout_ms}ms")]
    Timeout { host: String, timeout_ms: u64 },
}

impl ResolutionError {
    /// Whether retrying the lookup later could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Lookup { .. } | Self::Timeout { .. })
    }
}

/// Errors returned by URL validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] ParseError),

    /// The host does not look like a public hostname.
    #[error("invalid hostname: {0:?}")]
    InvalidHost(String),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

impl From<url::ParseError> for ValidationError {
    fn from(err: url::ParseError) -> Self {
        ValidationError::InvalidUrl(ParseError::SyntaxError(err.to_string()))
    }
}

/// An unrecognised normalization rule name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown normalization rule: {0:?}")]
pub struct UnknownRule(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(ParseError::EmptyHost.to_string(), "empty hostname");
        assert_eq!(
            ParseError::InvalidScheme("ftp".to_string()).to_string(),
            "unsupported scheme \"ftp\": only http and https are allowed"
        );
        assert_eq!(
            NormalizeError::EncodingError {
                component: "query",
                sequence: "%zz".to_string(),
            }
            .to_string(),
            "malformed percent-encoding \"%zz\" in query"
        );
    }

    #[test]
    fn test_resolution_error_is_transient() {
        assert!(!ResolutionError::NoAddress("example.com".to_string()).is_transient());
        assert!(
            ResolutionError::Timeout {
                host: "example.com".to_string(),
                timeout_ms: 100,
            }
            .is_transient()
        );
    }

    #[test]
    fn test_parse_and_resolution_errors_stay_distinct() {
        let from_parse: ValidationError = ParseError::EmptyHost.into();
        let from_dns: ValidationError = ResolutionError::NoAddress("a.com".to_string()).into();

        assert!(matches!(from_parse, ValidationError::InvalidUrl(_)));
        assert!(matches!(from_dns, ValidationError::Resolution(_)));
    }

    #[test]
    fn test_url_parse_error_conversion() {
        let err: ValidationError = url::ParseError::InvalidPort.into();
        assert!(matches!(
            err,
            ValidationError::InvalidUrl(ParseError::SyntaxError(_))
        ));
    }
}
