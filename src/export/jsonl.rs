//! JSONL record output: one JSON object per line, every key present.

use std::io::Write;

use anyhow::{Context, Result};

use super::types::RecordSink;
use crate::record::DomainRecord;

pub struct JsonlSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonlSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonlSink<W> {
    fn write_record(&mut self, record: &DomainRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)
            .with_context(|| format!("Failed to write JSON line for {}", record.domain))?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush JSONL output")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::COLUMNS;
    use serde_json::Value;

    #[test]
    fn test_one_object_per_line_with_nulls() {
        let mut sink = JsonlSink::new(Vec::new());
        sink.write_record(&DomainRecord::new("a.example")).unwrap();
        sink.write_record(&DomainRecord {
            mx: Some("mx.b.example".into()),
            ..DomainRecord::new("b.example")
        })
        .unwrap();
        sink.finish().unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.as_object().unwrap().len(), COLUMNS.len());
        assert!(first["MX"].is_null());

        let second: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["domain"], "b.example");
        assert_eq!(second["MX"], "mx.b.example");
    }
}
