//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (`thiserror`)
//! - Per-source failure taxonomy used for end-of-run reporting
//! - Processing statistics tracking (errors and info metrics)
//!
//! Every external-source failure is caught at that source's boundary, logged,
//! counted here, and degraded to a null field. Only [`EnrichError`] ever
//! reaches the batch caller.

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{
    DnsLookupError, EnrichError, ErrorType, InfoType, InitializationError, ReferenceDataError,
};
