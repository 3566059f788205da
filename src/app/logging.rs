//! Progress logging utilities.

use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Live counters for the progress line.
#[derive(Debug, Default)]
pub struct Progress {
    pub dispatched: AtomicUsize,
    pub enriched: AtomicUsize,
    pub failed: AtomicUsize,
}

/// Logs how many domains have been processed and the current rate.
pub fn log_progress(start_time: Instant, progress: &Progress) {
    let enriched = progress.enriched.load(Ordering::SeqCst);
    let failed = progress.failed.load(Ordering::SeqCst);
    let dispatched = progress.dispatched.load(Ordering::SeqCst);
    let done = enriched + failed;
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        done as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Processed {}/{} domains ({} enriched, {} failed) in {:.1}s (~{:.2} domains/sec)",
        done, dispatched, enriched, failed, elapsed_secs, rate
    );
}
