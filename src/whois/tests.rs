// WHOIS normalization and client tests.

use super::*;
use crate::error_handling::{ErrorType, InfoType, ProcessingStats};
use crate::test_support::FakeWhois;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

fn client(fake: FakeWhois) -> (WhoisClient<FakeWhois>, Arc<ProcessingStats>) {
    let stats = Arc::new(ProcessingStats::new());
    (
        WhoisClient::new(fake, Duration::from_millis(50), Arc::clone(&stats)),
        stats,
    )
}

fn answering(answer: Value) -> FakeWhois {
    FakeWhois::default().with("example.com", answer)
}

#[test]
fn test_normalize_registrar_strips_parenthetical() {
    assert_eq!(
        normalize_registrar("ACME Registrar (R999-LROR)").as_deref(),
        Some("ACME Registrar")
    );
    assert_eq!(
        normalize_registrar("  Example Registrar (R1-EX)  ").as_deref(),
        Some("Example Registrar")
    );
    assert_eq!(
        normalize_registrar("MarkMonitor Inc.").as_deref(),
        Some("MarkMonitor Inc.")
    );
    assert_eq!(normalize_registrar("(R1-EX)"), None);
    assert_eq!(normalize_registrar("   "), None);
}

#[test]
fn test_parse_date_string_formats() {
    let expected = Utc.with_ymd_and_hms(1995, 8, 14, 4, 0, 0).unwrap();
    assert_eq!(parse_date_string("1995-08-14T04:00:00Z"), Some(expected));
    assert_eq!(parse_date_string("1995-08-14T04:00:00+00:00"), Some(expected));
    assert_eq!(parse_date_string("1995-08-14 04:00:00"), Some(expected));
    assert_eq!(
        parse_date_string("1995-08-14"),
        Some(Utc.with_ymd_and_hms(1995, 8, 14, 0, 0, 0).unwrap())
    );
    assert_eq!(
        parse_date_string("14-aug-1995"),
        Some(Utc.with_ymd_and_hms(1995, 8, 14, 0, 0, 0).unwrap())
    );
    assert_eq!(parse_date_string("not a date"), None);
    assert_eq!(parse_date_string(""), None);
}

#[test]
fn test_normalize_takes_first_date_of_list() {
    let raw = json!({
        "creation_date": ["1995-08-14T04:00:00Z", "1995-08-13T04:00:00Z"],
        "expiration_date": "2030-08-13T04:00:00Z",
    });
    let info = normalize_whois("example.com", &raw).unwrap();
    assert_eq!(
        info.creation_date,
        Some(Utc.with_ymd_and_hms(1995, 8, 14, 4, 0, 0).unwrap())
    );
    assert_eq!(
        info.expiration_date,
        Some(Utc.with_ymd_and_hms(2030, 8, 13, 4, 0, 0).unwrap())
    );
    assert_eq!(info.updated_date, None);
}

#[test]
fn test_normalize_unparsable_date_is_null() {
    let raw = json!({"registrar": "Foo", "updated_date": "sometime last year"});
    let info = normalize_whois("example.com", &raw).unwrap();
    assert_eq!(info.updated_date, None);
    assert_eq!(info.registrar.as_deref(), Some("Foo"));
}

#[test]
fn test_normalize_emails_across_both_keys() {
    let raw = json!({
        "emails": ["hostmaster@example.com", null, "abuse@example.com"],
        "email": "abuse@example.com",
    });
    let info = normalize_whois("example.com", &raw).unwrap();
    assert_eq!(
        info.emails,
        vec![
            "hostmaster@example.com".to_string(),
            "abuse@example.com".to_string()
        ]
    );
}

#[test]
fn test_normalize_emails_case_sensitive_dedup() {
    let raw = json!({"emails": "Admin@Example.com", "email": ["admin@example.com"]});
    let info = normalize_whois("example.com", &raw).unwrap();
    assert_eq!(info.emails.len(), 2);
}

#[test]
fn test_normalize_no_emails_is_empty() {
    let raw = json!({"emails": [null, null, null], "email": null, "registrar": "Foo"});
    let info = normalize_whois("example.com", &raw).unwrap();
    assert!(info.emails.is_empty());
}

#[test]
fn test_normalize_name_servers_scalar_or_list() {
    let raw = json!({"name_servers": ["A.IANA-SERVERS.NET.", "b.iana-servers.net"]});
    let info = normalize_whois("example.com", &raw).unwrap();
    assert_eq!(
        info.name_servers,
        vec![
            "A.IANA-SERVERS.NET".to_string(),
            "b.iana-servers.net".to_string()
        ]
    );

    let raw = json!({"name_servers": "ns1.example.net."});
    let info = normalize_whois("example.com", &raw).unwrap();
    assert_eq!(info.name_servers, vec!["ns1.example.net".to_string()]);
}

#[test]
fn test_normalize_dnssec_passthrough() {
    let info = normalize_whois("example.com", &json!({"dnssec": "signedDelegation"})).unwrap();
    assert_eq!(info.dnssec.as_deref(), Some("signedDelegation"));

    let info = normalize_whois("example.com", &json!({"dnssec": ["unsigned", "Unsigned"]})).unwrap();
    assert_eq!(info.dnssec.as_deref(), Some("unsigned / Unsigned"));

    let info = normalize_whois("example.com", &json!({"dnssec": false})).unwrap();
    assert_eq!(info.dnssec.as_deref(), Some("false"));

    let info = normalize_whois("example.com", &json!({"dnssec": null})).unwrap();
    assert_eq!(info.dnssec, None);
}

#[test]
fn test_normalize_rejects_non_object() {
    let err = normalize_whois("example.com", &json!("No match for \"EXAMPLE.INVALID\".")).unwrap_err();
    assert_eq!(err, ShapeError::NotAnObject("a string"));
    assert!(normalize_whois("example.com", &json!([1, 2])).is_err());
    assert!(normalize_whois("example.com", &Value::Null).is_err());
}

#[tokio::test]
async fn test_client_success() {
    let (client, stats) = client(answering(json!({
        "registrar": "Example Registrar (R1-EX)",
        "creation_date": "1995-08-14T04:00:00Z",
        "name_servers": ["a.iana-servers.net."],
    })));
    let info = client.query("example.com").await.expect("whois info");
    assert_eq!(info.registrar.as_deref(), Some("Example Registrar"));
    assert_eq!(info.name_servers, vec!["a.iana-servers.net".to_string()]);
    assert_eq!(stats.total_errors(), 0);
}

#[tokio::test]
async fn test_client_failure_is_none() {
    let (client, stats) = client(FakeWhois::default());
    assert!(client.query("example.com").await.is_none());
    assert_eq!(stats.get_error_count(ErrorType::WhoisLookupError), 1);
}

#[tokio::test]
async fn test_client_timeout_is_none() {
    let (client, stats) = client(FakeWhois::default().stalling_on("example.com"));
    assert!(client.query("example.com").await.is_none());
    assert_eq!(stats.get_error_count(ErrorType::WhoisTimeout), 1);
}

#[tokio::test]
async fn test_client_unexpected_shape_is_none() {
    let (client, stats) = client(answering(json!("Socket not responding")));
    assert!(client.query("example.com").await.is_none());
    assert_eq!(stats.get_error_count(ErrorType::WhoisUnexpectedShape), 1);
}

#[tokio::test]
async fn test_client_empty_object_is_none() {
    let (client, stats) = client(answering(json!({"status": ["active"]})));
    assert!(client.query("example.com").await.is_none());
    assert_eq!(stats.get_info_count(InfoType::WhoisEmpty), 1);
    assert_eq!(stats.total_errors(), 0);
}

#[tokio::test]
#[ignore] // Requires network access
async fn test_service_whois_live() {
    let source = ServiceWhois::new().await.expect("whois client");
    let raw = source.query("example.com").await.expect("whois answer");
    let info = normalize_whois("example.com", &raw).expect("object response");
    assert!(!info.is_empty());
}
