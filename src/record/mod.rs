//! The flat per-domain output record.
//!
//! Every column is present in every record. Lists are flattened to a single
//! `" / "`-delimited string, and anything that could not be determined is
//! `None` (an empty CSV cell, a JSON `null`).

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::config::LIST_DELIMITER;

/// Rendering of WHOIS timestamps in output.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Output columns, in order. Matches the serialized field names of
/// [`DomainRecord`].
pub const COLUMNS: [&str; 20] = [
    "domain",
    "creation_date",
    "expiration_date",
    "updated_date",
    "dnssec",
    "emails",
    "name_servers",
    "registrar",
    "registrar_country",
    "ip_addresses",
    "ASN",
    "ASN_Country",
    "ASN_Description",
    "TXT",
    "SPF",
    "MX",
    "MX_IP",
    "MX_ASN#",
    "MX_ASN_Country",
    "MX_ASN_Description",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DomainRecord {
    /// Registrable base domain
    pub domain: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub creation_date: Option<DateTime<Utc>>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub expiration_date: Option<DateTime<Utc>>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub updated_date: Option<DateTime<Utc>>,
    pub dnssec: Option<String>,
    pub emails: Option<String>,
    pub name_servers: Option<String>,
    pub registrar: Option<String>,
    pub registrar_country: Option<String>,
    pub ip_addresses: Option<String>,
    #[serde(rename = "ASN")]
    pub asn: Option<String>,
    #[serde(rename = "ASN_Country")]
    pub asn_country: Option<String>,
    #[serde(rename = "ASN_Description")]
    pub asn_description: Option<String>,
    #[serde(rename = "TXT")]
    pub txt: Option<String>,
    #[serde(rename = "SPF")]
    pub spf: Option<String>,
    #[serde(rename = "MX")]
    pub mx: Option<String>,
    #[serde(rename = "MX_IP")]
    pub mx_ip: Option<String>,
    #[serde(rename = "MX_ASN#")]
    pub mx_asn: Option<String>,
    #[serde(rename = "MX_ASN_Country")]
    pub mx_asn_country: Option<String>,
    #[serde(rename = "MX_ASN_Description")]
    pub mx_asn_description: Option<String>,
}

impl DomainRecord {
    /// A record with only the domain set.
    pub fn new(domain: impl Into<String>) -> Self {
        DomainRecord {
            domain: domain.into(),
            ..Default::default()
        }
    }
}

/// Joins list values with `" / "`; an empty list becomes `None`, never `""`.
pub fn join_list<S: AsRef<str>>(items: &[S]) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    Some(
        items
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(LIST_DELIMITER),
    )
}

fn serialize_timestamp<S: Serializer>(
    value: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(dt) => serializer.serialize_some(&dt.format(TIMESTAMP_FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}
