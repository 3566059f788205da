//! The WHOIS source seam and its `whois-service` implementation.

use std::sync::LazyLock;

use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use serde_json::{json, Value};
use whois_service::WhoisResponse;

use crate::error_handling::InitializationError;

/// A WHOIS-like provider returning raw, loosely-typed registration data.
///
/// Implementations may return any JSON shape; [`super::WhoisClient`] is
/// responsible for checking and normalizing it.
#[async_trait]
pub trait WhoisSource: Send + Sync {
    async fn query(&self, domain: &str) -> Result<Value>;
}

static ABUSE_EMAIL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*Registrar Abuse Contact Email:[ \t]*(\S+@\S+)[ \t\r]*$").ok()
});

static DNSSEC: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?im)^[ \t]*DNSSEC:[ \t]*(\S.*?)[ \t\r]*$").ok());

/// [`WhoisSource`] backed by the `whois-service` crate.
///
/// The service tries RDAP first and falls back to port-43 WHOIS, discovering
/// the authoritative server through the IANA bootstrap. The client is built
/// once and shared; no lookups are cached.
#[derive(Clone)]
pub struct ServiceWhois {
    client: whois_service::WhoisClient,
}

impl ServiceWhois {
    pub async fn new() -> Result<Self, InitializationError> {
        let client = whois_service::WhoisClient::new_without_cache()
            .await
            .map_err(|e| InitializationError::WhoisClientError(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl WhoisSource for ServiceWhois {
    async fn query(&self, domain: &str) -> Result<Value> {
        let response = self
            .client
            .lookup(domain)
            .await
            .map_err(|e| anyhow::anyhow!("WHOIS query failed: {}", e))?;
        log::debug!(
            "WHOIS answer for {} from {} in {}ms",
            domain,
            response.whois_server,
            response.query_time_ms
        );
        Ok(response_to_value(&response))
    }
}

/// Flattens a `whois-service` response into the loosely-typed field map.
///
/// A response the service could not parse is passed through as its raw text,
/// which the client rejects as an unexpected shape.
pub(crate) fn response_to_value(response: &WhoisResponse) -> Value {
    let Some(parsed) = &response.parsed_data else {
        return Value::String(response.raw_data.clone());
    };

    json!({
        "registrar": parsed.registrar,
        "creation_date": parsed.creation_date,
        "expiration_date": parsed.expiration_date,
        "updated_date": parsed.updated_date,
        "name_servers": parsed.name_servers,
        "emails": [parsed.registrant_email, parsed.admin_email, parsed.tech_email],
        "email": capture(&ABUSE_EMAIL, &response.raw_data),
        "dnssec": capture(&DNSSEC, &response.raw_data),
    })
}

fn capture(pattern: &LazyLock<Option<Regex>>, text: &str) -> Option<String> {
    let re = pattern.as_ref()?;
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
