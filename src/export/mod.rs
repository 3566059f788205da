//! Record output.
//!
//! Finished records go to a [`RecordSink`]: CSV (flat, one header row) or
//! JSONL (one object per line). Either can target a file or stdout.

mod csv;
mod failures;
mod jsonl;
mod types;

use std::io::Write;
use std::path::Path;

use anyhow::Result;

pub use self::csv::CsvSink;
pub use failures::write_failures;
pub use jsonl::JsonlSink;
pub use types::{open_output, RecordSink};

use crate::config::OutputFormat;

/// Opens the configured sink on `output` (`-` for stdout).
pub fn open_sink(format: OutputFormat, output: &Path) -> Result<Box<dyn RecordSink + Send>> {
    let writer: Box<dyn Write + Send> = open_output(output)?;
    Ok(match format {
        OutputFormat::Csv => Box::new(CsvSink::new(writer)?),
        OutputFormat::Jsonl => Box::new(JsonlSink::new(writer)),
    })
}
