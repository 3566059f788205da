// Shared offline fakes for integration tests.
//
// Each test file declares `mod helpers;` and builds a pipeline from these, so
// no test in this directory touches the network.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use domain_enrich::{
    ipv4_to_u32, AsnRange, AsnTable, DnsLookupError, DnsResolver, DnsSource, EnrichmentPipeline,
    ProcessingStats, ReferenceTables, RegistrarCountries, WhoisClient, WhoisSource,
};

/// In-memory DNS zone. Missing entries answer "no records".
#[derive(Default)]
pub struct FakeDns {
    a: HashMap<String, Vec<Ipv4Addr>>,
    mx: HashMap<String, Vec<String>>,
    txt: HashMap<String, Vec<String>>,
    ns: HashMap<String, Vec<String>>,
    hosts: HashMap<String, Ipv4Addr>,
    queries: Mutex<Vec<String>>,
}

#[allow(dead_code)] // Not every test file uses every builder
impl FakeDns {
    pub fn with_a(mut self, domain: &str, ips: &[Ipv4Addr]) -> Self {
        self.a.insert(domain.to_string(), ips.to_vec());
        self
    }

    pub fn with_mx(mut self, domain: &str, exchanges: &[&str]) -> Self {
        self.mx
            .insert(domain.to_string(), exchanges.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_txt(mut self, domain: &str, records: &[&str]) -> Self {
        self.txt
            .insert(domain.to_string(), records.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_ns(mut self, domain: &str, names: &[&str]) -> Self {
        self.ns
            .insert(domain.to_string(), names.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_host(mut self, host: &str, ip: Ipv4Addr) -> Self {
        self.hosts.insert(host.to_string(), ip);
        self
    }

    /// True if a query of `kind` ("A", "MX", "TXT", "NS", "HOST") was made for `name`.
    pub fn was_queried(&self, kind: &str, name: &str) -> bool {
        let wanted = format!("{kind} {name}");
        self.queries.lock().unwrap().iter().any(|q| *q == wanted)
    }

    fn record(&self, kind: &str, name: &str) {
        self.queries.lock().unwrap().push(format!("{kind} {name}"));
    }
}

fn answer<T: Clone>(map: &HashMap<String, Vec<T>>, name: &str) -> Result<Vec<T>, DnsLookupError> {
    match map.get(name) {
        Some(values) if !values.is_empty() => Ok(values.clone()),
        _ => Err(DnsLookupError::NoData),
    }
}

#[async_trait]
impl DnsSource for FakeDns {
    async fn lookup_a(&self, host: &str) -> Result<Vec<Ipv4Addr>, DnsLookupError> {
        self.record("A", host);
        answer(&self.a, host)
    }

    async fn lookup_mx(&self, domain: &str) -> Result<Vec<String>, DnsLookupError> {
        self.record("MX", domain);
        answer(&self.mx, domain)
    }

    async fn lookup_txt(&self, domain: &str) -> Result<Vec<String>, DnsLookupError> {
        self.record("TXT", domain);
        answer(&self.txt, domain)
    }

    async fn lookup_ns(&self, domain: &str) -> Result<Vec<String>, DnsLookupError> {
        self.record("NS", domain);
        answer(&self.ns, domain)
    }

    async fn resolve_host(&self, host: &str) -> Result<Ipv4Addr, DnsLookupError> {
        self.record("HOST", host);
        self.hosts.get(host).copied().ok_or(DnsLookupError::NoData)
    }
}

/// WHOIS answers keyed by domain. Unknown domains fail like an unreachable server.
#[derive(Default)]
pub struct FakeWhois {
    answers: HashMap<String, Value>,
}

#[allow(dead_code)]
impl FakeWhois {
    pub fn with(mut self, domain: &str, answer: Value) -> Self {
        self.answers.insert(domain.to_string(), answer);
        self
    }
}

#[async_trait]
impl WhoisSource for FakeWhois {
    async fn query(&self, domain: &str) -> anyhow::Result<Value> {
        self.answers
            .get(domain)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("connection refused by whois server for {domain}"))
    }
}

/// Registrar table with "Example Registrar" and an ASN table covering
/// 93.184.216.0/24 (EDGECAST) and 192.0.2.0/24 (TEST-NET-1).
pub fn example_tables() -> ReferenceTables {
    let registrars = RegistrarCountries::from_pairs([("Example Registrar", "United States")]);
    let asn = AsnTable::new(vec![
        AsnRange {
            start_ip: ipv4_to_u32("93.184.216.0").unwrap(),
            end_ip: ipv4_to_u32("93.184.216.255").unwrap(),
            asn: "15133".into(),
            country: "US".into(),
            description: "EDGECAST".into(),
        },
        AsnRange {
            start_ip: ipv4_to_u32("192.0.2.0").unwrap(),
            end_ip: ipv4_to_u32("192.0.2.255").unwrap(),
            asn: "64496".into(),
            country: "ZZ".into(),
            description: "TEST-NET-1".into(),
        },
    ]);
    ReferenceTables::from_parts(Some(registrars), Some(asn))
}

/// Builds a pipeline over the fakes with generous per-source timeouts.
pub fn build_pipeline(
    whois: Option<FakeWhois>,
    dns: FakeDns,
    tables: ReferenceTables,
) -> Arc<EnrichmentPipeline<FakeWhois, FakeDns>> {
    let stats = Arc::new(ProcessingStats::new());
    let whois = whois.map(|source| WhoisClient::new(source, Duration::from_secs(5), Arc::clone(&stats)));
    let dns = DnsResolver::new(dns, Duration::from_secs(5), Arc::clone(&stats));
    Arc::new(EnrichmentPipeline::new(
        whois,
        dns,
        Arc::new(tables),
        stats,
    ))
}
