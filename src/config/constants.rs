//! Configuration constants.
//!
//! This module defines the defaults and fixed parameters used throughout the
//! application: timeouts, worker pool size, reference data locations, and the
//! output list delimiter.

use std::time::Duration;

/// Separator used whenever a list is flattened into a single output field.
pub const LIST_DELIMITER: &str = " / ";

/// Maximum concurrent per-domain enrichments (semaphore limit).
pub const DEFAULT_MAX_CONCURRENCY: usize = 20;

/// Interval between progress log lines, in seconds.
pub const LOGGING_INTERVAL: u64 = 5;

// Network operation timeouts
/// DNS query timeout in seconds.
/// Applied both to the resolver itself and as an outer ceiling on each query.
pub const DNS_TIMEOUT_SECS: u64 = 5;
/// Number of attempts the resolver makes per query before giving up.
pub const DNS_ATTEMPTS: usize = 2;
/// WHOIS/RDAP lookup timeout in seconds.
/// Some registries answer slowly; anything past this is treated as no answer.
pub const WHOIS_TIMEOUT_SECS: u64 = 10;
/// Hard ceiling for a single domain's enrichment, in seconds.
/// WHOIS (10s) + A/TXT/MX in parallel (5s) + MX host and NS fallback (10s) + buffer.
pub const DOMAIN_TIMEOUT_SECS: u64 = 45;

/// Default per-domain timeout as a `Duration`.
pub const DOMAIN_PROCESSING_TIMEOUT: Duration = Duration::from_secs(DOMAIN_TIMEOUT_SECS);

// Reference data
/// ICANN accredited registrar list (https://www.icann.org/en/accredited-registrars).
pub const DEFAULT_REGISTRARS_PATH: &str = "data/Accredited-Registrars.csv";
/// iptoasn.com IPv4 range table (https://iptoasn.com).
pub const DEFAULT_ASN_TABLE_PATH: &str = "data/ip2asn-v4.tsv";
/// Registrar table column holding the display name.
pub const REGISTRAR_NAME_COLUMN: &str = "Registrar Name";
/// Registrar table column holding the country.
pub const REGISTRAR_COUNTRY_COLUMN: &str = "Country/Territory";

/// Default output file.
pub const DEFAULT_OUTPUT_PATH: &str = "domains_enriched.csv";

/// Marker in a TXT string that identifies an SPF policy.
pub const SPF_MARKER: &str = "v=spf1";
