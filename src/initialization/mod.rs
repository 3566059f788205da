//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - Logger
//! - DNS resolver
//! - WHOIS source
//! - Concurrency semaphore
//!
//! All initialization functions return proper error types for error handling.

mod logger;
mod resolver;

use std::sync::Arc;

use tokio::sync::Semaphore;

// Re-export public API
pub use logger::init_logger_with;
pub use resolver::init_resolver;

use crate::error_handling::InitializationError;
use crate::whois::ServiceWhois;

/// Initializes a semaphore for controlling concurrency.
///
/// Bounds the number of domains enriched at once. A count of zero is
/// raised to one so a misconfigured run still makes progress.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count.max(1)))
}

/// Initializes the WHOIS source.
///
/// # Errors
///
/// Returns `InitializationError::WhoisClientError` if the WHOIS service cannot
/// load its server configuration.
pub async fn init_whois_source() -> Result<ServiceWhois, InitializationError> {
    ServiceWhois::new().await
}
