//! The DNS source seam.
//!
//! [`DnsSource`] is what the enrichment pipeline talks to. The production
//! implementation is [`HickoryDns`]; tests substitute scripted fakes.

use std::net::Ipv4Addr;
use std::sync::Arc;

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;

use super::records::{lookup_a_records, lookup_mx_records, lookup_ns_records, lookup_txt_records};
use super::resolution::resolve_host_to_ip;
use crate::error_handling::DnsLookupError;

/// Raw DNS queries for one record type each.
///
/// Implementations report failures as [`DnsLookupError`]; degrading those to
/// empty results is the job of [`super::DnsResolver`].
#[async_trait]
pub trait DnsSource: Send + Sync {
    async fn lookup_a(&self, host: &str) -> Result<Vec<Ipv4Addr>, DnsLookupError>;

    /// MX exchanges in answer order, trailing dots included.
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<String>, DnsLookupError>;

    /// One string per TXT character-string, in answer order. A record made
    /// of several character-strings contributes several entries.
    async fn lookup_txt(&self, domain: &str) -> Result<Vec<String>, DnsLookupError>;

    async fn lookup_ns(&self, domain: &str) -> Result<Vec<String>, DnsLookupError>;

    /// Host-address resolution of an arbitrary hostname to one IPv4 address.
    async fn resolve_host(&self, host: &str) -> Result<Ipv4Addr, DnsLookupError>;
}

/// [`DnsSource`] backed by a shared `hickory-resolver` instance.
#[derive(Clone)]
pub struct HickoryDns {
    resolver: Arc<TokioAsyncResolver>,
}

impl HickoryDns {
    pub fn new(resolver: Arc<TokioAsyncResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl DnsSource for HickoryDns {
    async fn lookup_a(&self, host: &str) -> Result<Vec<Ipv4Addr>, DnsLookupError> {
        lookup_a_records(host, &self.resolver).await
    }

    async fn lookup_mx(&self, domain: &str) -> Result<Vec<String>, DnsLookupError> {
        lookup_mx_records(domain, &self.resolver).await
    }

    async fn lookup_txt(&self, domain: &str) -> Result<Vec<String>, DnsLookupError> {
        lookup_txt_records(domain, &self.resolver).await
    }

    async fn lookup_ns(&self, domain: &str) -> Result<Vec<String>, DnsLookupError> {
        lookup_ns_records(domain, &self.resolver).await
    }

    async fn resolve_host(&self, host: &str) -> Result<Ipv4Addr, DnsLookupError> {
        resolve_host_to_ip(host, &self.resolver).await
    }
}
