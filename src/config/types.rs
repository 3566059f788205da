//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_ASN_TABLE_PATH, DEFAULT_MAX_CONCURRENCY, DEFAULT_OUTPUT_PATH,
    DEFAULT_REGISTRARS_PATH, DNS_TIMEOUT_SECS, DOMAIN_TIMEOUT_SECS, WHOIS_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Record output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One header row, one row per domain
    Csv,
    /// One JSON object per line
    Jsonl,
}

/// Library and CLI configuration.
///
/// Parsed from the command line by the binary, or constructed programmatically
/// by library callers.
///
/// # Examples
///
/// ```no_run
/// use domain_enrich::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     file: PathBuf::from("domains.txt"),
///     max_concurrency: 50,
///     ..Default::default()
/// };
/// ```
///
/// ```bash
/// # Basic usage
/// domain_enrich domains.txt
///
/// # Custom reference data and JSONL output on stdout
/// domain_enrich domains.txt --asn-table ./ip2asn-v4.tsv --format jsonl --output -
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "domain_enrich",
    about = "Enriches a list of domains with WHOIS, DNS, registrar-country and ASN data."
)]
pub struct Config {
    /// File with one domain per line (use '-' for stdin)
    #[arg(value_parser)]
    pub file: PathBuf,

    /// Output file (use '-' for stdout)
    #[arg(long, value_parser, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Output format: csv|jsonl
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Registrar to country table (CSV with 'Registrar Name' and 'Country/Territory' columns)
    #[arg(long, value_parser, default_value = DEFAULT_REGISTRARS_PATH)]
    pub registrars: PathBuf,

    /// IP range to ASN table (iptoasn TSV: start, end, asn, country, description)
    #[arg(long, value_parser, default_value = DEFAULT_ASN_TABLE_PATH)]
    pub asn_table: PathBuf,

    /// Maximum domains enriched concurrently
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Timeout for each DNS query in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS)]
    pub dns_timeout_secs: u64,

    /// Timeout for each WHOIS lookup in seconds
    #[arg(long, default_value_t = WHOIS_TIMEOUT_SECS)]
    pub whois_timeout_secs: u64,

    /// Hard ceiling for one domain's enrichment in seconds
    #[arg(long, default_value_t = DOMAIN_TIMEOUT_SECS)]
    pub domain_timeout_secs: u64,

    /// Skip WHOIS lookups (WHOIS fields stay empty, name servers come from DNS)
    #[arg(long)]
    pub no_whois: bool,

    /// Write per-domain failures to this CSV file
    #[arg(long, value_parser)]
    pub failures: Option<PathBuf>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Print the per-source failure breakdown at the end of the run
    #[arg(long)]
    pub show_stats: bool,
}

impl Config {
    pub fn dns_timeout(&self) -> Duration {
        Duration::from_secs(self.dns_timeout_secs)
    }

    pub fn whois_timeout(&self) -> Duration {
        Duration::from_secs(self.whois_timeout_secs)
    }

    pub fn domain_timeout(&self) -> Duration {
        Duration::from_secs(self.domain_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("domains.txt"),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            format: OutputFormat::Csv,
            registrars: PathBuf::from(DEFAULT_REGISTRARS_PATH),
            asn_table: PathBuf::from(DEFAULT_ASN_TABLE_PATH),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            dns_timeout_secs: DNS_TIMEOUT_SECS,
            whois_timeout_secs: WHOIS_TIMEOUT_SECS,
            domain_timeout_secs: DOMAIN_TIMEOUT_SECS,
            no_whois: false,
            failures: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            show_stats: false,
        }
    }
}
