//! Hostname shape check used by URL validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::entities::ip_literal;

/// Dot-separated labels of 2-64 characters followed by a 2-64 letter TLD.
static HOSTNAME_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[a-z0-9](?:[a-z0-9-]{0,62}[a-z0-9])\.)+[a-z]{2,64}$").unwrap()
});

/// Checks that `host` looks like a routable hostname.
///
/// Independent of normalization: it only inspects the shape of the name.
/// IP literals and `localhost` are accepted as they are.
///
/// # Examples
///
/// ```
/// use urlnorm::is_valid_hostname;
///
/// assert!(is_valid_hostname("example.com"));
/// assert!(is_valid_hostname("127.0.0.1"));
/// assert!(!is_valid_hostname("example"));      // No TLD
/// assert!(!is_valid_hostname("example.c"));    // TLD too short
/// assert!(!is_valid_hostname("-bad.com"));     // Leading hyphen
/// ```
pub fn is_valid_hostname(host: &str) -> bool {
    if host == "localhost" || ip_literal(host).is_some() {
        return true;
    }
    HOSTNAME_SHAPE.is_match(&host.to_ascii_lowercase())
}
