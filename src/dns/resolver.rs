//! Degrading DNS resolver.
//!
//! Every query is bounded by a timeout. Failures never propagate: "no
//! records" is logged at debug level and counted as info, anything else is
//! logged as a warning and counted as an error. The caller always gets a
//! (possibly empty) result.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use super::extract::{clean_hostnames, extract_spf_records};
use super::source::DnsSource;
use crate::error_handling::{DnsLookupError, ErrorType, InfoType, ProcessingStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueryKind {
    A,
    Mx,
    Txt,
    Ns,
    Host,
}

impl QueryKind {
    fn label(self) -> &'static str {
        match self {
            QueryKind::A => "A",
            QueryKind::Mx => "MX",
            QueryKind::Txt => "TXT",
            QueryKind::Ns => "NS",
            QueryKind::Host => "host address",
        }
    }

    fn error_type(self) -> ErrorType {
        match self {
            QueryKind::A => ErrorType::DnsALookupError,
            QueryKind::Mx => ErrorType::DnsMxLookupError,
            QueryKind::Txt => ErrorType::DnsTxtLookupError,
            QueryKind::Ns => ErrorType::DnsNsLookupError,
            QueryKind::Host => ErrorType::MxHostResolveError,
        }
    }
}

/// TXT records for a domain and the SPF subset of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxtRecords {
    pub txt: Vec<String>,
    pub spf: Vec<String>,
}

pub struct DnsResolver<D> {
    source: D,
    timeout: Duration,
    stats: Arc<ProcessingStats>,
}

impl<D: DnsSource> DnsResolver<D> {
    pub fn new(source: D, timeout: Duration, stats: Arc<ProcessingStats>) -> Self {
        Self {
            source,
            timeout,
            stats,
        }
    }

    pub fn source(&self) -> &D {
        &self.source
    }

    /// IPv4 addresses from the domain's A records, as dotted quads.
    pub async fn resolve_a(&self, domain: &str) -> Vec<String> {
        let addrs = self
            .degrade(domain, QueryKind::A, self.source.lookup_a(domain))
            .await;
        addrs.iter().map(ToString::to_string).collect()
    }

    /// MX exchange hostnames without trailing dots, in answer order.
    pub async fn resolve_mx(&self, domain: &str) -> Vec<String> {
        let exchanges = self
            .degrade(domain, QueryKind::Mx, self.source.lookup_mx(domain))
            .await;
        clean_hostnames(exchanges)
    }

    pub async fn resolve_txt(&self, domain: &str) -> TxtRecords {
        let txt = self
            .degrade(domain, QueryKind::Txt, self.source.lookup_txt(domain))
            .await;
        let spf = extract_spf_records(&txt);
        TxtRecords { txt, spf }
    }

    /// Name server hostnames without trailing dots.
    pub async fn resolve_ns(&self, domain: &str) -> Vec<String> {
        let names = self
            .degrade(domain, QueryKind::Ns, self.source.lookup_ns(domain))
            .await;
        clean_hostnames(names)
    }

    /// First IPv4 address of an arbitrary hostname (e.g. an MX exchange).
    pub async fn resolve_host_ip(&self, host: &str) -> Option<String> {
        let query = async { self.source.resolve_host(host).await.map(Some) };
        self.degrade(host, QueryKind::Host, query)
            .await
            .map(|ip| ip.to_string())
    }

    async fn degrade<T, F>(&self, name: &str, kind: QueryKind, query: F) -> T
    where
        T: Default,
        F: Future<Output = Result<T, DnsLookupError>>,
    {
        let outcome = tokio::time::timeout(self.timeout, query)
            .await
            .unwrap_or(Err(DnsLookupError::Timeout));

        match outcome {
            Ok(value) => value,
            Err(DnsLookupError::NoData) => {
                debug!("No {} records for {}", kind.label(), name);
                self.stats.increment_info(InfoType::DnsNoRecords);
                T::default()
            }
            Err(DnsLookupError::Timeout) => {
                warn!(
                    "{} lookup for {} timed out after {:?}",
                    kind.label(),
                    name,
                    self.timeout
                );
                self.stats.increment_error(ErrorType::DnsTimeout);
                T::default()
            }
            Err(DnsLookupError::Failed(reason)) => {
                warn!("{} lookup for {} failed: {}", kind.label(), name, reason);
                self.stats.increment_error(kind.error_type());
                T::default()
            }
        }
    }
}
