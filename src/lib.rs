//! domain_enrich library: bulk domain enrichment
//!
//! This library turns a list of domain names (or URLs) into one flat record per
//! registrable domain, combining WHOIS registration data, DNS A/MX/TXT/NS
//! records, the registrar's country and the ASN that announces each resolved
//! address.
//!
//! # Example
//!
//! ```no_run
//! use domain_enrich::{run_enrichment, Config};
//! use tokio;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: std::path::PathBuf::from("domains.txt"),
//!     output: std::path::PathBuf::from("enriched.csv"),
//!     max_concurrency: 50,
//!     ..Default::default()
//! };
//!
//! let report = run_enrichment(config).await?;
//! println!("Enriched {} of {} domains ({} failed)",
//!          report.enriched, report.total, report.failures.len());
//! # Ok(())
//! # }
//! ```
//!
//! Individual domains can be enriched without the batch driver by building an
//! [`EnrichmentPipeline`] directly, with any [`DnsSource`] and [`WhoisSource`].
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
mod asn;
pub mod config;
mod dns;
mod domain;
mod enrich;
mod error_handling;
pub mod export;
pub mod initialization;
mod record;
mod reference;
mod run;
#[cfg(test)]
mod test_support;
mod whois;

// Re-export public API
pub use app::lines_of;
pub use asn::{AsnInfo, AsnLookup};
pub use config::{Config, LogFormat, LogLevel, OutputFormat};
pub use dns::{DnsResolver, DnsSource, HickoryDns, TxtRecords};
pub use domain::extract_base_domain;
pub use enrich::EnrichmentPipeline;
pub use error_handling::{
    DnsLookupError, EnrichError, ErrorType, InfoType, InitializationError, ProcessingStats,
    ReferenceDataError,
};
pub use export::{CsvSink, JsonlSink, RecordSink};
pub use record::{DomainRecord, COLUMNS};
pub use reference::{ipv4_to_u32, AsnRange, AsnTable, ReferenceTables, RegistrarCountries};
pub use run::{
    init_pipeline, run_batch, run_enrichment, BatchOptions, DomainFailure, EnrichmentReport,
    ServicePipeline,
};
pub use whois::{ServiceWhois, WhoisClient, WhoisInfo, WhoisSource};
