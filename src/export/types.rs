//! Sink trait and output target selection.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::record::DomainRecord;

/// Destination for finished records.
///
/// Called only from the single collecting loop, never from enrichment tasks,
/// so implementations need no synchronization.
pub trait RecordSink {
    fn write_record(&mut self, record: &DomainRecord) -> Result<()>;

    /// Flushes buffered output. Called once after the last record.
    fn finish(&mut self) -> Result<()>;
}

/// Collects records in memory.
impl RecordSink for Vec<DomainRecord> {
    fn write_record(&mut self, record: &DomainRecord) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Opens `path` for writing, or stdout when `path` is `-`.
pub fn open_output(path: &Path) -> Result<Box<dyn Write + Send>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}
