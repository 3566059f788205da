//! End-of-run statistics.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, InfoType, ProcessingStats};
use crate::run::EnrichmentReport;

/// Logs the one-line run summary.
pub fn print_summary(report: &EnrichmentReport) {
    info!(
        "Processed {} domain{} ({} enriched, {} failed) in {:.1}s{}",
        report.total,
        if report.total == 1 { "" } else { "s" },
        report.enriched,
        report.failures.len(),
        report.elapsed_seconds,
        if report.cancelled { " (cancelled)" } else { "" }
    );
}

/// Logs the per-source error and info breakdown.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    let total_errors = error_stats.total_errors();
    let total_info = error_stats.total_info();

    if total_errors > 0 {
        info!("Error Counts ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = error_stats.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }

    if total_info > 0 {
        info!("Info Counts ({} total):", total_info);
        for info_type in InfoType::iter() {
            let count = error_stats.get_info_count(info_type);
            if count > 0 {
                info!("   {}: {}", info_type.as_str(), count);
            }
        }
    }
}
