//! Error type definitions.
//!
//! This module defines all error and info types used throughout the application.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),

    /// Error initializing the WHOIS client.
    #[error("WHOIS client initialization error: {0}")]
    WhoisClientError(String),
}

/// Error reading a reference table that exists on disk.
///
/// A missing file is not an error: the table is simply absent and every
/// lookup against it returns nothing.
#[derive(Error, Debug)]
pub enum ReferenceDataError {
    /// The file exists but could not be opened or read.
    #[error("Failed to read reference table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid delimited text.
    #[error("Failed to parse reference table {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// A required column is missing from the header row.
    #[error("Reference table {path} has no '{column}' column")]
    MissingColumn { path: String, column: &'static str },
}

/// Per-domain failures that prevent a record from being produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnrichError {
    /// The input cannot be reduced to a registrable base domain.
    #[error("Malformed domain input '{input}': {reason}")]
    InputMalformed { input: String, reason: String },

    /// The whole enrichment exceeded the per-domain ceiling.
    #[error("Enrichment of '{input}' timed out after {secs}s")]
    Timeout { input: String, secs: u64 },

    /// The enrichment task died before producing a record.
    #[error("Enrichment task for '{input}' aborted: {reason}")]
    TaskAborted { input: String, reason: String },
}

impl EnrichError {
    pub fn malformed(input: &str, reason: impl Into<String>) -> Self {
        EnrichError::InputMalformed {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// The original input line this failure belongs to.
    pub fn input(&self) -> &str {
        match self {
            EnrichError::InputMalformed { input, .. }
            | EnrichError::Timeout { input, .. }
            | EnrichError::TaskAborted { input, .. } => input,
        }
    }

    pub fn error_type(&self) -> ErrorType {
        match self {
            EnrichError::InputMalformed { .. } => ErrorType::InputMalformed,
            EnrichError::Timeout { .. } => ErrorType::EnrichTimeout,
            EnrichError::TaskAborted { .. } => ErrorType::TaskAborted,
        }
    }
}

/// Failure of a single DNS query, before degradation to an empty result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DnsLookupError {
    /// No record of the requested type, or the name does not exist.
    #[error("no records found")]
    NoData,

    /// The query did not complete in time.
    #[error("query timed out")]
    Timeout,

    /// Transport failure, malformed response or any other resolver error.
    #[error("{0}")]
    Failed(String),
}

/// Types of failures counted during enrichment.
///
/// Source failures are counted per source and query type; per-domain
/// failures are the ones that cost a record. "No data" outcomes are counted
/// as [`InfoType`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // WHOIS
    WhoisLookupError,
    WhoisUnexpectedShape,
    WhoisTimeout,
    // DNS
    DnsALookupError,
    DnsTxtLookupError,
    DnsMxLookupError,
    DnsNsLookupError,
    MxHostResolveError,
    DnsTimeout,
    // Per-domain
    InputMalformed,
    EnrichTimeout,
    TaskAborted,
}

/// Expected "nothing there" outcomes, tracked for the end-of-run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    DnsNoRecords,
    WhoisEmpty,
    AsnNoMatch,
    RegistrarCountryNoMatch,
    NameServerFallback,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::WhoisLookupError => "WHOIS lookup error",
            ErrorType::WhoisUnexpectedShape => "WHOIS unexpected response shape",
            ErrorType::WhoisTimeout => "WHOIS timeout",
            ErrorType::DnsALookupError => "DNS A lookup error",
            ErrorType::DnsTxtLookupError => "DNS TXT lookup error",
            ErrorType::DnsMxLookupError => "DNS MX lookup error",
            ErrorType::DnsNsLookupError => "DNS NS lookup error",
            ErrorType::MxHostResolveError => "MX host resolve error",
            ErrorType::DnsTimeout => "DNS timeout",
            ErrorType::InputMalformed => "Malformed input",
            ErrorType::EnrichTimeout => "Enrichment timeout",
            ErrorType::TaskAborted => "Enrichment task aborted",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::DnsNoRecords => "DNS no records",
            InfoType::WhoisEmpty => "WHOIS returned nothing",
            InfoType::AsnNoMatch => "No ASN range matched",
            InfoType::RegistrarCountryNoMatch => "Registrar not in country table",
            InfoType::NameServerFallback => "Name servers from live NS query",
        }
    }
}
