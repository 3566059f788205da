//! DNS resolution and record querying.
//!
//! This module provides async DNS operations using `hickory-resolver`:
//! - Address records (A) and host-address resolution for MX exchanges
//! - Nameserver queries (NS records)
//! - Text record queries (TXT records) with SPF extraction
//! - Mail exchanger queries (MX records)
//!
//! Queries go through the [`DnsSource`] trait so the pipeline can run
//! against a fake in tests. [`DnsResolver`] wraps a source with timeouts and
//! degrades every failure to an empty result.

mod extract;
mod records;
mod resolution;
mod resolver;
mod source;

// Re-export public API
pub use extract::strip_trailing_dot;
pub use resolver::{DnsResolver, TxtRecords};
pub use source::{DnsSource, HickoryDns};
