//! Failure-isolating WHOIS client.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use super::parse::normalize_whois;
use super::source::WhoisSource;
use super::types::WhoisInfo;
use crate::error_handling::{ErrorType, InfoType, ProcessingStats};

/// Wraps a [`WhoisSource`] with a timeout and normalization.
///
/// [`WhoisClient::query`] never fails: transport errors, timeouts, responses
/// of an unexpected shape and responses with no usable fields all come back
/// as `None` after being logged and counted.
pub struct WhoisClient<S> {
    source: S,
    timeout: Duration,
    stats: Arc<ProcessingStats>,
}

impl<S: WhoisSource> WhoisClient<S> {
    pub fn new(source: S, timeout: Duration, stats: Arc<ProcessingStats>) -> Self {
        Self {
            source,
            timeout,
            stats,
        }
    }

    pub async fn query(&self, domain: &str) -> Option<WhoisInfo> {
        let raw = match tokio::time::timeout(self.timeout, self.source.query(domain)).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                warn!("WHOIS lookup failed for {}: {:#}", domain, e);
                self.stats.increment_error(ErrorType::WhoisLookupError);
                return None;
            }
            Err(_) => {
                warn!(
                    "WHOIS lookup for {} timed out after {:?}",
                    domain, self.timeout
                );
                self.stats.increment_error(ErrorType::WhoisTimeout);
                return None;
            }
        };

        match normalize_whois(domain, &raw) {
            Ok(info) if info.is_empty() => {
                debug!("WHOIS returned no usable fields for {}", domain);
                self.stats.increment_info(InfoType::WhoisEmpty);
                None
            }
            Ok(info) => Some(info),
            Err(e) => {
                warn!("WHOIS response for {} has an unexpected shape: {}", domain, e);
                self.stats.increment_error(ErrorType::WhoisUnexpectedShape);
                None
            }
        }
    }
}
