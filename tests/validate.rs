mod common;

use std::net::IpAddr;

use common::{FakeResolver, create_test_service};
use urlnorm::error::{ParseError, ResolutionError, ValidationError};

#[tokio::test]
async fn test_validate_without_dns_check() {
    let (service, resolver) = create_test_service(FakeResolver::default());

    assert!(service.validate("example.com", false).await.is_ok());
    assert!(service.validate("https://sub.example.co.uk/a?b=c", false).await.is_ok());
    assert!(service.validate("http://192.168.0.1:8080/", false).await.is_ok());
    assert!(service.validate("localhost:3000", false).await.is_ok());
    assert_eq!(resolver.calls(), 0);
}

#[tokio::test]
async fn test_validate_rejects_bad_host_shapes() {
    let (service, _) = create_test_service(FakeResolver::default());

    for (raw, host) in [
        ("http://intranet/", "intranet"),
        ("http://example.c/", "example.c"),
        ("http://a.example.com/", "a.example.com"),
        ("http://-bad.com/", "-bad.com"),
    ] {
        assert_eq!(
            service.validate(raw, false).await,
            Err(ValidationError::InvalidHost(host.to_string())),
            "{raw}"
        );
    }
}

#[tokio::test]
async fn test_validate_reports_parse_errors_as_invalid_url() {
    let (service, _) = create_test_service(FakeResolver::default());

    assert_eq!(
        service.validate("", false).await,
        Err(ValidationError::InvalidUrl(ParseError::EmptyHost))
    );
    assert!(matches!(
        service.validate("ftp://example.com", false).await,
        Err(ValidationError::InvalidUrl(ParseError::InvalidScheme(_)))
    ));
    assert!(matches!(
        service.validate("example.com:70000", false).await,
        Err(ValidationError::InvalidUrl(ParseError::SyntaxError(_)))
    ));
}

#[tokio::test]
async fn test_validate_with_dns_check() {
    let (service, resolver) =
        create_test_service(FakeResolver::default().with_record("example.com", "93.184.216.34"));

    assert!(service.validate("https://example.com/x", true).await.is_ok());
    assert_eq!(resolver.calls(), 1);

    assert_eq!(
        service.validate("missing.example.org", true).await,
        Err(ValidationError::Resolution(ResolutionError::NoAddress(
            "missing.example.org".to_string()
        )))
    );
    assert_eq!(resolver.calls(), 2);
}

#[tokio::test]
async fn test_validate_ip_literal_skips_lookup() {
    let (service, resolver) = create_test_service(FakeResolver::default());

    assert!(service.validate("http://10.0.0.1/", true).await.is_ok());
    assert!(service.validate("http://[::1]:8080/", true).await.is_ok());
    assert_eq!(resolver.calls(), 0);
}

#[tokio::test]
async fn test_resolution_errors_are_retryable_only_when_transient() {
    let (service, _) = create_test_service(FakeResolver::default().with_timeout("slow.example.com"));

    let err = service.validate("slow.example.com", true).await.unwrap_err();
    match err {
        ValidationError::Resolution(e) => assert!(e.is_transient()),
        other => panic!("expected resolution error, got {other:?}"),
    }

    let err = service.validate("gone.example.com", true).await.unwrap_err();
    match err {
        ValidationError::Resolution(e) => assert!(!e.is_transient()),
        other => panic!("expected resolution error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_validate_default_follows_dns_setting() {
    let resolver = FakeResolver::default().with_record("example.com", "127.0.0.1");
    let (service, resolver) = create_test_service(resolver);

    assert!(service.validate_default("unknown.example.net").await.is_ok());
    assert_eq!(resolver.calls(), 0);

    let service = service.with_dns_check(true);
    assert!(service.validate_default("unknown.example.net").await.is_err());
    assert!(service.validate_default("example.com").await.is_ok());
    assert_eq!(resolver.calls(), 2);
}

#[tokio::test]
async fn test_resolve_parsed_url() {
    let (service, _) =
        create_test_service(FakeResolver::default().with_record("example.com", "93.184.216.34"));

    let url = service.parse("EXAMPLE.com/path").unwrap();
    assert_eq!(
        service.resolve(&url).await.unwrap(),
        "93.184.216.34".parse::<IpAddr>().unwrap()
    );
}

#[test]
fn test_canonicalize_and_same_url() {
    let (service, _) = create_test_service(FakeResolver::default());

    assert_eq!(
        service.canonicalize("WWW.Example.com.:80/a//b/../c?y=2&x=1").unwrap(),
        "http://www.example.com/a/c?x=1&y=2"
    );
    assert!(service.same_url("example.com/%7euser", "http://EXAMPLE.COM:80/~user").unwrap());
    assert!(!service.same_url("example.com/a", "example.com/A").unwrap());
}
