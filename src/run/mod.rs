//! Batch enrichment driver.

mod batch;
mod init;
mod report;

use anyhow::{Context, Result};
use log::{info, warn};
use tokio_util::sync::CancellationToken;

pub use batch::{run_batch, BatchOptions};
pub use init::{init_pipeline, ServicePipeline};
pub use report::{DomainFailure, EnrichmentReport};

use crate::app::{open_input, print_error_statistics, print_summary};
use crate::config::Config;
use crate::export::{open_output, open_sink, write_failures};

/// Runs an enrichment batch with the provided configuration.
///
/// This is the main entry point for the library. It loads the reference
/// tables, reads domains from the input file (or stdin), enriches them
/// concurrently and writes one record per domain to the configured output.
/// Ctrl-C stops dispatch; domains already in flight still finish and are
/// written.
///
/// # Errors
///
/// This function will return an error if:
/// - The input file cannot be opened
/// - The output or failure report cannot be written
/// - The DNS resolver or WHOIS client cannot be initialized
///
/// # Example
///
/// ```no_run
/// use domain_enrich::{run_enrichment, Config};
/// use std::path::PathBuf;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config {
///     file: PathBuf::from("domains.txt"),
///     ..Default::default()
/// };
/// let report = run_enrichment(config).await?;
/// println!("Enriched {} of {} domains", report.enriched, report.total);
/// # Ok(())
/// # }
/// ```
pub async fn run_enrichment(config: Config) -> Result<EnrichmentReport> {
    let pipeline = init_pipeline(&config).await?;
    let inputs = open_input(&config.file).await?;
    let mut sink = open_sink(config.format, &config.output)?;

    let cancel = CancellationToken::new();
    let ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Received Ctrl-C, finishing in-flight domains");
                cancel.cancel();
            }
        })
    };

    let options = BatchOptions {
        max_concurrency: config.max_concurrency,
        domain_timeout: config.domain_timeout(),
    };
    let result = run_batch(pipeline.clone(), inputs, options, sink.as_mut(), cancel).await;
    ctrl_c.abort();
    let report = result?;

    if let Some(path) = &config.failures {
        let writer = open_output(path)?;
        write_failures(writer, &report.failures)
            .with_context(|| format!("Failed to write failure report {}", path.display()))?;
        info!(
            "Wrote {} failures to {}",
            report.failures.len(),
            path.display()
        );
    }

    if config.show_stats {
        print_error_statistics(pipeline.stats());
    }
    print_summary(&report);

    Ok(report)
}
