//! DNS record queries (A, MX, TXT, NS).
//!
//! Thin wrappers over `hickory-resolver` that translate resolver errors into
//! [`DnsLookupError`]. "No records" and NXDOMAIN both surface as
//! [`DnsLookupError::NoData`].

use std::net::Ipv4Addr;

use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;

use crate::error_handling::DnsLookupError;

/// Maps a resolver error onto the lookup error taxonomy.
pub(crate) fn classify_resolve_error(e: &ResolveError) -> DnsLookupError {
    match e.kind() {
        ResolveErrorKind::NoRecordsFound { .. } => DnsLookupError::NoData,
        ResolveErrorKind::Timeout => DnsLookupError::Timeout,
        _ => {
            let error_msg = e.to_string();
            // Transport timeouts surface as proto errors
            if error_msg.contains("timed out") || error_msg.contains("timeout") {
                DnsLookupError::Timeout
            } else {
                DnsLookupError::Failed(error_msg)
            }
        }
    }
}

/// Queries A records for a hostname.
pub async fn lookup_a_records(
    host: &str,
    resolver: &TokioAsyncResolver,
) -> Result<Vec<Ipv4Addr>, DnsLookupError> {
    let lookup = resolver
        .lookup(host, RecordType::A)
        .await
        .map_err(|e| classify_resolve_error(&e))?;
    Ok(lookup
        .iter()
        .filter_map(|rdata| match rdata {
            RData::A(a) => Some(a.0),
            _ => None,
        })
        .collect())
}

/// Queries MX records for a domain.
///
/// Exchanges are returned in the order the resolver produced them, with
/// their trailing dots intact.
pub async fn lookup_mx_records(
    domain: &str,
    resolver: &TokioAsyncResolver,
) -> Result<Vec<String>, DnsLookupError> {
    let lookup = resolver
        .lookup(domain, RecordType::MX)
        .await
        .map_err(|e| classify_resolve_error(&e))?;
    Ok(lookup
        .iter()
        .filter_map(|rdata| match rdata {
            RData::MX(mx) => Some(mx.exchange().to_utf8()),
            _ => None,
        })
        .collect())
}

/// Queries TXT records for a domain.
pub async fn lookup_txt_records(
    domain: &str,
    resolver: &TokioAsyncResolver,
) -> Result<Vec<String>, DnsLookupError> {
    let lookup = resolver
        .lookup(domain, RecordType::TXT)
        .await
        .map_err(|e| classify_resolve_error(&e))?;
    Ok(txt_strings(lookup.iter()))
}

/// Flattens TXT answers into one entry per character-string.
///
/// A record split into several character-strings yields several entries, so
/// an SPF policy chunked across strings only matches on its first chunk.
pub(crate) fn txt_strings<'a>(answers: impl IntoIterator<Item = &'a RData>) -> Vec<String> {
    answers
        .into_iter()
        .filter_map(|rdata| match rdata {
            RData::TXT(txt) => Some(txt.iter()),
            _ => None,
        })
        .flatten()
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        .collect()
}

/// Queries NS (nameserver) records for a domain.
pub async fn lookup_ns_records(
    domain: &str,
    resolver: &TokioAsyncResolver,
) -> Result<Vec<String>, DnsLookupError> {
    let lookup = resolver
        .lookup(domain, RecordType::NS)
        .await
        .map_err(|e| classify_resolve_error(&e))?;
    Ok(lookup
        .iter()
        .filter_map(|rdata| match rdata {
            RData::NS(ns) => Some(ns.to_utf8()),
            _ => None,
        })
        .collect())
}
