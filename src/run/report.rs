//! Batch outcome types.

use crate::error_handling::EnrichError;

/// One input that produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainFailure {
    /// The input line as read (trimmed)
    pub input: String,
    pub error: EnrichError,
}

impl From<EnrichError> for DomainFailure {
    fn from(error: EnrichError) -> Self {
        DomainFailure {
            input: error.input().to_string(),
            error,
        }
    }
}

/// Results of an enrichment run.
#[derive(Debug, Clone)]
pub struct EnrichmentReport {
    /// Domain lines dispatched for enrichment
    pub total: usize,
    /// Records written to the sink
    pub enriched: usize,
    /// Inputs that produced no record, in completion order
    pub failures: Vec<DomainFailure>,
    pub elapsed_seconds: f64,
    /// True if dispatch stopped early on cancellation
    pub cancelled: bool,
}
