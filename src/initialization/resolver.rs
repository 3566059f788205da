//! DNS resolver initialization.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::config::DNS_ATTEMPTS;
use crate::error_handling::InitializationError;

/// Initializes the shared DNS resolver.
///
/// Uses the default upstream configuration with the given per-query timeout
/// and a small retry budget so an unresponsive server fails fast. `ndots` is
/// 0 so names are never expanded with local search domains.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if `timeout` is zero.
pub fn init_resolver(timeout: Duration) -> Result<Arc<TokioAsyncResolver>, InitializationError> {
    if timeout.is_zero() {
        return Err(InitializationError::DnsResolverError(
            "DNS timeout must be greater than zero".to_string(),
        ));
    }

    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    opts.attempts = DNS_ATTEMPTS;
    opts.ndots = 0;

    Ok(Arc::new(TokioAsyncResolver::tokio(
        ResolverConfig::default(),
        opts,
    )))
}
