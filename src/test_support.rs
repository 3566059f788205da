// Scripted DNS and WHOIS sources shared by the unit tests.
//
// Integration tests under tests/ cannot see this module and carry their own
// copy in tests/helpers.rs.

use std::collections::{HashMap, HashSet};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::dns::DnsSource;
use crate::error_handling::DnsLookupError;
use crate::whois::WhoisSource;

/// Name that matches every query of a record type.
pub(crate) const ANY: &str = "*";

/// In-memory DNS zone. Missing entries answer "no records".
///
/// Every query is logged as `"KIND name"` with KIND one of A, MX, TXT, NS or
/// HOST. The same key scripts a failure with [`FakeDns::failing`].
#[derive(Default)]
pub(crate) struct FakeDns {
    pub(crate) a: HashMap<String, Vec<Ipv4Addr>>,
    pub(crate) mx: HashMap<String, Vec<String>>,
    pub(crate) txt: HashMap<String, Vec<String>>,
    pub(crate) ns: HashMap<String, Vec<String>>,
    pub(crate) hosts: HashMap<String, Ipv4Addr>,
    failures: HashMap<String, DnsLookupError>,
    panicking: HashSet<String>,
    stalled: HashSet<String>,
    delay: Option<Duration>,
    queries: Mutex<Vec<String>>,
    in_flight: Mutex<HashMap<String, usize>>,
    peak: Arc<AtomicUsize>,
}

impl FakeDns {
    pub(crate) fn with_a(mut self, name: &str, ips: &[Ipv4Addr]) -> Self {
        self.a.insert(name.to_string(), ips.to_vec());
        self
    }

    pub(crate) fn with_mx(mut self, name: &str, exchanges: &[&str]) -> Self {
        self.mx.insert(name.to_string(), owned(exchanges));
        self
    }

    pub(crate) fn with_txt(mut self, name: &str, records: &[&str]) -> Self {
        self.txt.insert(name.to_string(), owned(records));
        self
    }

    pub(crate) fn with_ns(mut self, name: &str, servers: &[&str]) -> Self {
        self.ns.insert(name.to_string(), owned(servers));
        self
    }

    pub(crate) fn with_host(mut self, host: &str, ip: Ipv4Addr) -> Self {
        self.hosts.insert(host.to_string(), ip);
        self
    }

    pub(crate) fn failing(mut self, kind: &str, name: &str, error: DnsLookupError) -> Self {
        self.failures.insert(format!("{kind} {name}"), error);
        self
    }

    /// Any query for `name` panics.
    pub(crate) fn panicking_on(mut self, name: &str) -> Self {
        self.panicking.insert(name.to_string());
        self
    }

    /// Any query for `name` sleeps for 30 seconds before answering.
    pub(crate) fn stalling_on(mut self, name: &str) -> Self {
        self.stalled.insert(name.to_string());
        self
    }

    /// Every query sleeps this long before answering.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn was_queried(&self, query: &str) -> bool {
        self.queries.lock().unwrap().iter().any(|q| q == query)
    }

    pub(crate) fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    /// Highest number of distinct names with a query in flight at the same
    /// time. The handle stays readable after the fake moves into a pipeline.
    pub(crate) fn peak_in_flight(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.peak)
    }

    fn enter(&self, name: &str) {
        let mut in_flight = self.in_flight.lock().unwrap();
        *in_flight.entry(name.to_string()).or_default() += 1;
        self.peak.fetch_max(in_flight.len(), Ordering::SeqCst);
    }

    fn leave(&self, name: &str) {
        let mut in_flight = self.in_flight.lock().unwrap();
        if let Some(count) = in_flight.get_mut(name) {
            *count -= 1;
            if *count == 0 {
                in_flight.remove(name);
            }
        }
    }

    async fn answer<T: Clone>(
        &self,
        kind: &str,
        map: &HashMap<String, T>,
        name: &str,
    ) -> Result<T, DnsLookupError> {
        let key = format!("{kind} {name}");
        self.queries.lock().unwrap().push(key.clone());
        if self.panicking.contains(name) {
            panic!("resolver bug on {name}");
        }

        self.enter(name);
        if self.stalled.contains(name) {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.leave(name);

        if let Some(error) = self.failures.get(&key) {
            return Err(error.clone());
        }
        map.get(name)
            .or_else(|| map.get(ANY))
            .cloned()
            .ok_or(DnsLookupError::NoData)
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[async_trait]
impl DnsSource for FakeDns {
    async fn lookup_a(&self, host: &str) -> Result<Vec<Ipv4Addr>, DnsLookupError> {
        self.answer("A", &self.a, host).await
    }

    async fn lookup_mx(&self, domain: &str) -> Result<Vec<String>, DnsLookupError> {
        self.answer("MX", &self.mx, domain).await
    }

    async fn lookup_txt(&self, domain: &str) -> Result<Vec<String>, DnsLookupError> {
        self.answer("TXT", &self.txt, domain).await
    }

    async fn lookup_ns(&self, domain: &str) -> Result<Vec<String>, DnsLookupError> {
        self.answer("NS", &self.ns, domain).await
    }

    async fn resolve_host(&self, host: &str) -> Result<Ipv4Addr, DnsLookupError> {
        self.answer("HOST", &self.hosts, host).await
    }
}

/// WHOIS answers keyed by domain. Unknown domains fail like an unreachable
/// server; stalled domains sleep for 5 seconds.
#[derive(Default)]
pub(crate) struct FakeWhois {
    answers: HashMap<String, Value>,
    stalled: HashSet<String>,
}

impl FakeWhois {
    pub(crate) fn with(mut self, domain: &str, answer: Value) -> Self {
        self.answers.insert(domain.to_string(), answer);
        self
    }

    pub(crate) fn stalling_on(mut self, domain: &str) -> Self {
        self.stalled.insert(domain.to_string());
        self
    }
}

#[async_trait]
impl WhoisSource for FakeWhois {
    async fn query(&self, domain: &str) -> anyhow::Result<Value> {
        if self.stalled.contains(domain) {
            tokio::time::sleep(Duration::from_secs(5)).await;
        }
        self.answers
            .get(domain)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("connection reset by peer"))
    }
}
