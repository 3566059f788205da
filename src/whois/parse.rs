//! Normalization of loosely-typed WHOIS responses.
//!
//! Providers disagree on field shapes: dates may be a string or a list of
//! strings, emails may live under `emails` or `email` as a scalar or a list,
//! and so on. Everything is resolved here so nothing downstream sees a
//! `serde_json::Value`.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::types::{ShapeError, WhoisInfo};
use crate::config::LIST_DELIMITER;
use crate::dns::strip_trailing_dot;

/// Keys that may carry contact emails, in precedence order.
const EMAIL_KEYS: [&str; 2] = ["emails", "email"];

/// Normalizes a raw WHOIS response into [`WhoisInfo`].
///
/// # Errors
///
/// Returns [`ShapeError`] if `raw` is not a JSON object.
pub fn normalize_whois(domain: &str, raw: &Value) -> Result<WhoisInfo, ShapeError> {
    let fields = match raw {
        Value::Object(fields) => fields,
        other => return Err(ShapeError::NotAnObject(value_kind(other))),
    };

    Ok(WhoisInfo {
        creation_date: date_field(domain, fields, "creation_date"),
        expiration_date: date_field(domain, fields, "expiration_date"),
        updated_date: date_field(domain, fields, "updated_date"),
        dnssec: fields.get("dnssec").and_then(dnssec_value),
        emails: collect_emails(fields),
        name_servers: fields
            .get("name_servers")
            .map(|value| {
                strings(value)
                    .map(|ns| strip_trailing_dot(ns).to_string())
                    .filter(|ns| !ns.is_empty())
                    .collect()
            })
            .unwrap_or_default(),
        registrar: fields
            .get("registrar")
            .and_then(|value| strings(value).next())
            .and_then(normalize_registrar),
    })
}

/// Strips a trailing `"(...)"` annotation from a registrar name.
///
/// `"ACME Registrar (R999-LROR)"` becomes `"ACME Registrar"`. A name that is
/// empty after stripping yields `None`.
pub fn normalize_registrar(raw: &str) -> Option<String> {
    let name = raw.split('(').next().unwrap_or_default().trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Parses a WHOIS date in any of the formats registries commonly use.
pub fn parse_date_string(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    let formats = [
        "%Y-%m-%dT%H:%M:%S%.fZ",
        "%Y-%m-%dT%H:%M:%SZ",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d",
        "%Y.%m.%d",
        "%d-%b-%Y",
        "%d.%m.%Y",
        "%d/%m/%Y",
    ];

    for format in &formats {
        if let Ok(dt) = DateTime::parse_from_str(date_str, format) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive_dt) = chrono::NaiveDateTime::parse_from_str(date_str, format) {
            return Some(naive_dt.and_utc());
        }
        if let Ok(naive_date) = chrono::NaiveDate::parse_from_str(date_str, format) {
            return Some(naive_date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}

/// First date of a scalar-or-list field.
fn date_field(domain: &str, fields: &Map<String, Value>, key: &str) -> Option<DateTime<Utc>> {
    let raw = strings(fields.get(key)?).next()?;
    let parsed = parse_date_string(raw);
    if parsed.is_none() {
        log::debug!("Unparsable WHOIS {} for {}: '{}'", key, domain, raw);
    }
    parsed
}

fn collect_emails(fields: &Map<String, Value>) -> Vec<String> {
    let mut emails: Vec<String> = Vec::new();
    for value in EMAIL_KEYS.iter().filter_map(|key| fields.get(*key)) {
        for email in strings(value).map(str::trim).filter(|e| !e.is_empty()) {
            if !emails.iter().any(|seen| seen == email) {
                emails.push(email.to_string());
            }
        }
    }
    emails
}

fn dnssec_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter(|item| !item.is_null())
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(LIST_DELIMITER))
            }
        }
        other => Some(other.to_string()),
    }
}

/// Non-null string values of a scalar-or-list field, in order.
fn strings(value: &Value) -> Box<dyn Iterator<Item = &str> + '_> {
    match value {
        Value::String(s) => Box::new(std::iter::once(s.as_str())),
        Value::Array(items) => Box::new(items.iter().filter_map(Value::as_str)),
        _ => Box::new(std::iter::empty()),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
