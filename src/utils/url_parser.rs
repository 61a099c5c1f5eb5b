//! Lenient parsing of user-supplied URL strings.
//!
//! Accepts strings such as `example.com/path`, `//example.com` or
//! `localhost:8080` that a strict URL parser would read as relative
//! references, and splits them into a [`ParsedUrl`].

use std::borrow::Cow;
use std::net::Ipv6Addr;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::domain::entities::{ParsedUrl, default_port};
use crate::error::ParseError;
use crate::utils::percent_escape::find_malformed_escape;

/// RFC 3986 Appendix B: scheme, authority, path, query, fragment.
static URI_SPLITTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?:([^:/?#]+):)?(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$").unwrap()
});

static SCHEME_SYNTAX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*$").unwrap());

/// Recovered host candidates shorter than this are rejected.
const MIN_RECOVERED_HOST_LEN: usize = 3;

/// Syntactic fields as reported by the splitter, before any repair.
#[derive(Debug, Default)]
struct RawParts<'a> {
    scheme: Option<&'a str>,
    userinfo: Option<&'a str>,
    hostport: &'a str,
    path: &'a str,
    query: &'a str,
    fragment: &'a str,
}

/// Parses a raw, possibly incomplete URL string.
///
/// # Steps
///
/// 1. **Scheme repair**: `//host` becomes `http://host`; input without `://`
///    (and bare `localhost`) gets an `http://` prefix
/// 2. **Split** into scheme, authority, path, query and fragment
/// 3. **Host recovery**: an empty authority takes its host from the first
///    path segment
/// 4. **Scheme check**: only `http` and `https`, defaulting to `http`
/// 5. **Host/port split** on the last `:` outside IPv6 brackets; host is
///    lowercased
/// 6. **Default port** filled from the scheme
///
/// # Errors
///
/// - [`ParseError::SyntaxError`] if the string cannot be split
/// - [`ParseError::EmptyHost`] if no host can be found
/// - [`ParseError::InvalidHost`] if the recovered host is too short
/// - [`ParseError::InvalidScheme`] for any scheme but `http`/`https`
///
/// # Examples
///
/// ```
/// let url = urlnorm::parse("Example.com/path").unwrap();
/// assert_eq!(url.scheme, "http");
/// assert_eq!(url.host, "example.com");
/// assert_eq!(url.port.as_deref(), Some("80"));
/// assert_eq!(url.path, "/path");
/// ```
pub fn parse(raw: &str) -> Result<ParsedUrl, ParseError> {
    let result = parse_inner(raw.trim());
    if let Err(e) = &result {
        debug!(raw, error = %e, "failed to parse URL");
    }
    result
}

fn parse_inner(raw: &str) -> Result<ParsedUrl, ParseError> {
    let repaired = repair_scheme(raw);
    if let Cow::Owned(fixed) = &repaired {
        debug!(raw, repaired = %fixed, "added missing scheme");
    }

    let mut parts = split(&repaired)?;

    if parts.hostport.is_empty() && parts.userinfo.is_none() {
        let (authority, rest) = recover_host(parts.path)?;
        debug!(authority, path = rest, "recovered host from path");
        let (userinfo, hostport) = split_authority(authority)?;
        parts.userinfo = userinfo;
        parts.hostport = hostport;
        parts.path = rest;
    }

    let scheme = check_scheme(parts.scheme)?;
    let (host, port) = split_host_port(parts.hostport)?;
    if host.is_empty() {
        return Err(ParseError::EmptyHost);
    }

    let port = port
        .map(str::to_string)
        .or_else(|| default_port(&scheme).map(str::to_string));

    Ok(ParsedUrl {
        host: host.to_lowercase(),
        port,
        scheme,
        userinfo: parts.userinfo.map(str::to_string),
        path: parts.path.to_string(),
        query: parts.query.to_string(),
        fragment: parts.fragment.to_string(),
    })
}

/// Returns true for `localhost`, `localhost/...` and `localhost:<port>...`.
fn is_bare_localhost(raw: &str) -> bool {
    let Some(rest) = raw
        .get(..9)
        .filter(|head| head.eq_ignore_ascii_case("localhost"))
        .map(|_| &raw[9..])
    else {
        return false;
    };

    if rest.is_empty() || rest.starts_with('/') {
        return true;
    }

    match rest.strip_prefix(':') {
        Some(after) => {
            let port_end = after.find(['/', '?', '#']).unwrap_or(after.len());
            after[..port_end].bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

fn repair_scheme(raw: &str) -> Cow<'_, str> {
    if raw.starts_with("//") {
        return Cow::Owned(format!("http:{raw}"));
    }
    if is_bare_localhost(raw) || !raw.contains("://") {
        return Cow::Owned(format!("http://{raw}"));
    }
    Cow::Borrowed(raw)
}

fn split(input: &str) -> Result<RawParts<'_>, ParseError> {
    if input.chars().any(|c| c.is_ascii_control()) {
        return Err(ParseError::SyntaxError(
            "control character in URL".to_string(),
        ));
    }

    let caps = URI_SPLITTER
        .captures(input)
        .ok_or_else(|| ParseError::SyntaxError(format!("cannot split {input:?}")))?;
    let group = |i: usize| caps.get(i).map(|m| m.as_str());

    let scheme = group(1);
    if let Some(scheme) = scheme
        && !SCHEME_SYNTAX.is_match(scheme)
    {
        return Err(ParseError::SyntaxError(format!(
            "invalid scheme syntax {scheme:?}"
        )));
    }

    let (userinfo, hostport) = split_authority(group(2).unwrap_or(""))?;

    let parts = RawParts {
        scheme,
        userinfo,
        hostport,
        path: group(3).unwrap_or(""),
        query: group(4).unwrap_or(""),
        fragment: group(5).unwrap_or(""),
    };

    for (component, value) in [
        ("userinfo", parts.userinfo.unwrap_or("")),
        ("host", parts.hostport),
        ("path", parts.path),
        ("fragment", parts.fragment),
    ] {
        if let Some(bad) = find_malformed_escape(value) {
            return Err(ParseError::SyntaxError(format!(
                "invalid escape {bad:?} in {component}"
            )));
        }
    }

    Ok(parts)
}

/// Splits `[userinfo@]host[:port]` at the last `@`.
///
/// Applies to both a split authority and one recovered from the path.
fn split_authority(authority: &str) -> Result<(Option<&str>, &str), ParseError> {
    if authority.contains(char::is_whitespace) {
        return Err(ParseError::SyntaxError(
            "whitespace in authority".to_string(),
        ));
    }
    Ok(match authority.rfind('@') {
        Some(at) => (Some(&authority[..at]), &authority[at + 1..]),
        None => (None, authority),
    })
}

/// Takes the host from the leading path segment: `"example.com/a"` gives
/// `("example.com", "/a")`.
fn recover_host(path: &str) -> Result<(&str, &str), ParseError> {
    let end = path.find('/').unwrap_or(path.len());
    let (candidate, rest) = path.split_at(end);

    if candidate.is_empty() {
        return Err(ParseError::EmptyHost);
    }
    if candidate.chars().count() < MIN_RECOVERED_HOST_LEN {
        return Err(ParseError::InvalidHost(candidate.to_string()));
    }
    Ok((candidate, rest))
}

fn check_scheme(scheme: Option<&str>) -> Result<String, ParseError> {
    let scheme = scheme.unwrap_or("").to_ascii_lowercase();
    match scheme.as_str() {
        "" => Ok("http".to_string()),
        "http" | "https" => Ok(scheme),
        _ => Err(ParseError::InvalidScheme(scheme)),
    }
}

/// Splits `host:port` on the last colon outside `[...]`.
///
/// Brackets stay on IPv6 hosts. An empty port (`example.com:`) is `None`.
fn split_host_port(hostport: &str) -> Result<(&str, Option<&str>), ParseError> {
    let (host, port) = match hostport.rfind(':') {
        Some(i) if !hostport[i..].contains(']') => (&hostport[..i], Some(&hostport[i + 1..])),
        _ => (hostport, None),
    };

    if host.contains('[') || host.contains(']') {
        let literal = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .ok_or_else(|| ParseError::SyntaxError(format!("unbalanced brackets in host {host:?}")))?;
        literal.parse::<Ipv6Addr>().map_err(|_| {
            ParseError::SyntaxError(format!("invalid IPv6 literal {literal:?}"))
        })?;
    }

    let port = port.filter(|p| !p.is_empty());
    if let Some(port) = port
        && !port.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ParseError::SyntaxError(format!("invalid port {port:?}")));
    }

    Ok((host, port))
}
