//! The batch loop.
//!
//! Domains are dispatched one task each, bounded by a semaphore, and their
//! outcomes are collected on this task as they complete. Records reach the
//! sink only from here, so cancellation can never interleave a half-written
//! row.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use futures::stream::FuturesUnordered;
use futures::{Stream, StreamExt};
use log::warn;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;

use super::report::{DomainFailure, EnrichmentReport};
use crate::app::{is_domain_line, log_progress, shutdown_gracefully, Progress};
use crate::config::{DEFAULT_MAX_CONCURRENCY, DOMAIN_PROCESSING_TIMEOUT, LOGGING_INTERVAL};
use crate::dns::DnsSource;
use crate::enrich::EnrichmentPipeline;
use crate::error_handling::EnrichError;
use crate::export::RecordSink;
use crate::initialization::init_semaphore;
use crate::whois::WhoisSource;

/// Concurrency and time limits for [`run_batch`].
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    pub max_concurrency: usize,
    /// Ceiling for one domain's whole enrichment
    pub domain_timeout: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            domain_timeout: DOMAIN_PROCESSING_TIMEOUT,
        }
    }
}

/// Enriches every domain line of `inputs`, writing records to `sink`.
///
/// Blank lines and `#` comments are skipped. Per-domain failures (malformed
/// input, timeout, a panicking task) are collected in the report and never
/// stop the batch. When `cancel` fires, no further lines are dispatched but
/// in-flight domains are awaited and their records written.
///
/// # Errors
///
/// Returns an error only if the sink fails to write.
pub async fn run_batch<W, D, S, K>(
    pipeline: Arc<EnrichmentPipeline<W, D>>,
    inputs: S,
    options: BatchOptions,
    sink: &mut K,
    cancel: CancellationToken,
) -> Result<EnrichmentReport>
where
    W: WhoisSource + 'static,
    D: DnsSource + 'static,
    S: Stream<Item = String> + Unpin,
    K: RecordSink + ?Sized,
{
    let start_time = Instant::now();
    let semaphore = init_semaphore(options.max_concurrency);
    let stats = Arc::clone(pipeline.stats());
    let progress = Arc::new(Progress::default());

    let logging_cancel = CancellationToken::new();
    let logging_task = {
        let cancel_logging = logging_cancel.child_token();
        let progress = Arc::clone(&progress);
        Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(LOGGING_INTERVAL));
            // The first tick completes immediately
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = interval.tick() => log_progress(start_time, &progress),
                    _ = cancel_logging.cancelled() => break,
                }
            }
        }))
    };

    let mut inputs = inputs;
    let mut tasks = FuturesUnordered::new();
    let mut failures: Vec<DomainFailure> = Vec::new();
    let mut total = 0usize;
    let mut enriched = 0usize;
    let mut input_done = false;
    let mut cancelled = false;

    loop {
        if input_done && tasks.is_empty() {
            break;
        }

        tokio::select! {
            biased;

            _ = cancel.cancelled(), if !input_done => {
                warn!(
                    "Cancellation requested, waiting for {} in-flight domains",
                    tasks.len()
                );
                input_done = true;
                cancelled = true;
            }

            Some((input, joined)) = tasks.next(), if !tasks.is_empty() => {
                let outcome = match joined {
                    Ok(outcome) => outcome,
                    Err(join_error) => Err(EnrichError::TaskAborted {
                        input,
                        reason: JoinError::to_string(&join_error),
                    }),
                };

                match outcome {
                    Ok(record) => {
                        if let Err(e) = sink.write_record(&record) {
                            shutdown_gracefully(logging_cancel, logging_task).await;
                            return Err(e);
                        }
                        enriched += 1;
                        progress.enriched.fetch_add(1, Ordering::SeqCst);
                    }
                    Err(error) => {
                        warn!("No record for '{}': {}", error.input(), error);
                        stats.increment_error(error.error_type());
                        progress.failed.fetch_add(1, Ordering::SeqCst);
                        failures.push(DomainFailure::from(error));
                    }
                }
            }

            line = inputs.next(), if !input_done && semaphore.available_permits() > 0 => {
                let Some(line) = line else {
                    input_done = true;
                    continue;
                };
                if !is_domain_line(&line) {
                    continue;
                }

                let permit = match Arc::clone(&semaphore).acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        warn!("Semaphore closed, skipping domain: {}", line.trim());
                        continue;
                    }
                };

                total += 1;
                progress.dispatched.fetch_add(1, Ordering::SeqCst);

                let input = line.trim().to_string();
                let task_input = input.clone();
                let pipeline = Arc::clone(&pipeline);
                let domain_timeout = options.domain_timeout;
                let handle = tokio::spawn(async move {
                    let _permit = permit;
                    match tokio::time::timeout(domain_timeout, pipeline.enrich(&task_input)).await {
                        Ok(result) => result,
                        Err(_) => Err(EnrichError::Timeout {
                            input: task_input.clone(),
                            secs: domain_timeout.as_secs(),
                        }),
                    }
                });
                tasks.push(async move { (input, handle.await) });
            }
        }
    }

    let finished = sink.finish();
    shutdown_gracefully(logging_cancel, logging_task).await;
    finished?;

    log_progress(start_time, &progress);

    Ok(EnrichmentReport {
        total,
        enriched,
        failures,
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
        cancelled,
    })
}
