//! CSV record output.
//!
//! One header row with every column, then one row per domain. `None` fields
//! are written as empty cells.

use std::io::Write;

use anyhow::{Context, Result};
use csv::{Writer, WriterBuilder};

use super::types::RecordSink;
use crate::record::{DomainRecord, COLUMNS};

pub struct CsvSink<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> CsvSink<W> {
    /// Wraps `inner` and writes the header row immediately, so an empty
    /// batch still produces a well-formed file.
    pub fn new(inner: W) -> Result<Self> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(inner);
        writer
            .write_record(COLUMNS)
            .context("Failed to write CSV header")?;
        Ok(Self { writer })
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e.error()))
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_record(&mut self, record: &DomainRecord) -> Result<()> {
        self.writer
            .serialize(record)
            .with_context(|| format!("Failed to write CSV row for {}", record.domain))
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush CSV output")
    }
}
