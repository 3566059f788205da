//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `domain_enrich` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::process;

use domain_enrich::initialization::init_logger_with;
use domain_enrich::{run_enrichment, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // Try loading from current directory first, then from the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Records go to stdout with `--output -`, so the summary must not
    let to_stdout = config.output == Path::new("-");
    let output = config.output.clone();

    match run_enrichment(config).await {
        Ok(report) => {
            if !to_stdout {
                println!(
                    "✅ Enriched {} of {} domain{} ({} failed) in {:.1}s",
                    report.enriched,
                    report.total,
                    if report.total == 1 { "" } else { "s" },
                    report.failures.len(),
                    report.elapsed_seconds
                );
                println!("Results saved in {}", output.display());
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("domain_enrich error: {:#}", e);
            process::exit(1);
        }
    }
}
