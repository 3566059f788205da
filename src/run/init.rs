//! Pipeline construction from configuration.

use std::sync::Arc;

use anyhow::{ensure, Context, Result};
use log::info;

use crate::config::{Config, DNS_ATTEMPTS};
use crate::dns::{DnsResolver, HickoryDns};
use crate::enrich::EnrichmentPipeline;
use crate::error_handling::ProcessingStats;
use crate::initialization::{init_resolver, init_whois_source};
use crate::reference::ReferenceTables;
use crate::whois::{ServiceWhois, WhoisClient};

/// The production pipeline: `whois-service` for WHOIS, hickory for DNS.
pub type ServicePipeline = EnrichmentPipeline<ServiceWhois, HickoryDns>;

/// Loads reference tables and builds the shared pipeline.
///
/// Missing reference files only degrade lookups; a zero timeout or a
/// resolver or WHOIS client setup failure is fatal.
pub async fn init_pipeline(config: &Config) -> Result<Arc<ServicePipeline>> {
    validate_timeouts(config)?;
    let stats = Arc::new(ProcessingStats::new());
    let tables = Arc::new(ReferenceTables::load(&config.registrars, &config.asn_table));

    let resolver =
        init_resolver(config.dns_timeout()).context("Failed to initialize DNS resolver")?;
    // The resolver retries internally; the outer ceiling covers every attempt
    let dns_ceiling = config.dns_timeout() * DNS_ATTEMPTS as u32;
    let dns = DnsResolver::new(HickoryDns::new(resolver), dns_ceiling, Arc::clone(&stats));

    let whois = if config.no_whois {
        info!("WHOIS lookups disabled; name servers will come from DNS");
        None
    } else {
        let source = init_whois_source()
            .await
            .context("Failed to initialize WHOIS client")?;
        Some(WhoisClient::new(
            source,
            config.whois_timeout(),
            Arc::clone(&stats),
        ))
    };

    Ok(Arc::new(EnrichmentPipeline::new(whois, dns, tables, stats)))
}

/// Rejects zero timeouts, which would fail every query before it is sent.
pub(crate) fn validate_timeouts(config: &Config) -> Result<()> {
    for (flag, secs) in [
        ("--dns-timeout-secs", config.dns_timeout_secs),
        ("--whois-timeout-secs", config.whois_timeout_secs),
        ("--domain-timeout-secs", config.domain_timeout_secs),
    ] {
        ensure!(secs > 0, "{} must be greater than zero", flag);
    }
    Ok(())
}
