//! WHOIS data types.

use chrono::{DateTime, Utc};

/// Registration data for one domain, normalized to a fixed shape.
///
/// Built only by [`super::normalize_whois`]; every loosely-typed provider
/// field has been resolved by the time a value of this type exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhoisInfo {
    pub creation_date: Option<DateTime<Utc>>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub updated_date: Option<DateTime<Utc>>,
    /// Opaque passthrough of the provider's DNSSEC value
    pub dnssec: Option<String>,
    /// Deduplicated, first-seen order
    pub emails: Vec<String>,
    /// Trailing dots stripped
    pub name_servers: Vec<String>,
    /// Trailing parenthetical annotation stripped
    pub registrar: Option<String>,
}

impl WhoisInfo {
    /// True if the response carried none of the fields the record uses.
    pub fn is_empty(&self) -> bool {
        self.creation_date.is_none()
            && self.expiration_date.is_none()
            && self.updated_date.is_none()
            && self.dnssec.is_none()
            && self.emails.is_empty()
            && self.name_servers.is_empty()
            && self.registrar.is_none()
    }
}

/// Why a raw response could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    /// The provider answered with something other than a JSON object,
    /// typically a bare string carrying an error message or unparsed text.
    #[error("expected an object, got {0}")]
    NotAnObject(&'static str),
}
