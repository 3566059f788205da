//! Host address resolution.

use std::net::{IpAddr, Ipv4Addr};

use hickory_resolver::TokioAsyncResolver;

use super::records::classify_resolve_error;
use crate::error_handling::DnsLookupError;

/// Resolves a hostname to its first IPv4 address.
///
/// This is a host-address lookup (like `gethostbyname`), not a raw A-record
/// query: CNAME chains are followed and only the first IPv4 answer is kept.
///
/// # Errors
///
/// Returns [`DnsLookupError::NoData`] if the name has no IPv4 address.
pub async fn resolve_host_to_ip(
    host: &str,
    resolver: &TokioAsyncResolver,
) -> Result<Ipv4Addr, DnsLookupError> {
    let response = resolver
        .lookup_ip(host)
        .await
        .map_err(|e| classify_resolve_error(&e))?;
    response
        .iter()
        .find_map(|ip| match ip {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        })
        .ok_or(DnsLookupError::NoData)
}
