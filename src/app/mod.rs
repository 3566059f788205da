//! Main application modules.
//!
//! This module provides input streaming, progress logging, shutdown handling,
//! and statistics printing used by the batch driver.

pub mod input;
pub mod logging;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use input::{is_domain_line, lines_of, open_input};
pub use logging::{log_progress, Progress};
pub use shutdown::shutdown_gracefully;
pub use statistics::{print_error_statistics, print_summary};
