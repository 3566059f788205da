//! ASN lookup for a resolved IPv4 address.
//!
//! Used from two places in the pipeline (the domain's own address and the
//! primary MX host's address) with identical semantics: a miss, a malformed
//! address or an absent table all produce an all-null [`AsnInfo`].

use std::sync::Arc;

use crate::error_handling::{InfoType, ProcessingStats};
use crate::reference::ReferenceTables;

/// ASN fields for one address. All three are set together or all are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AsnInfo {
    pub asn: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
}

pub struct AsnLookup {
    tables: Arc<ReferenceTables>,
    stats: Arc<ProcessingStats>,
}

impl AsnLookup {
    pub fn new(tables: Arc<ReferenceTables>, stats: Arc<ProcessingStats>) -> Self {
        Self { tables, stats }
    }

    pub fn lookup(&self, ip: &str) -> AsnInfo {
        match self.tables.lookup_asn(ip) {
            Some(range) => AsnInfo {
                asn: Some(range.asn.clone()),
                country: Some(range.country.clone()),
                description: Some(range.description.clone()),
            },
            None => {
                if self.tables.has_asn() {
                    log::debug!("No ASN range contains {ip}");
                    self.stats.increment_info(InfoType::AsnNoMatch);
                }
                AsnInfo::default()
            }
        }
    }
}
