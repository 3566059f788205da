//! Per-domain failure report.

use std::io::Write;

use anyhow::{Context, Result};

use crate::run::DomainFailure;

/// Writes one `input,error_type,message` row per failed input.
pub fn write_failures<W: Write>(writer: W, failures: &[DomainFailure]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["input", "error_type", "message"])?;
    for failure in failures {
        let message = failure.error.to_string();
        csv_writer
            .write_record([
                failure.input.as_str(),
                failure.error.error_type().as_str(),
                message.as_str(),
            ])
            .with_context(|| format!("Failed to write failure row for '{}'", failure.input))?;
    }
    csv_writer.flush().context("Failed to flush failure report")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::EnrichError;

    #[test]
    fn test_write_failures() {
        let failures = vec![
            DomainFailure::from(EnrichError::malformed("co.uk", "no registrable domain")),
            DomainFailure::from(EnrichError::Timeout {
                input: "slow.example".into(),
                secs: 45,
            }),
        ];
        let mut buffer = Vec::new();
        write_failures(&mut buffer, &failures).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "input,error_type,message");
        assert!(lines[1].starts_with("co.uk,Malformed input,"));
        assert!(lines[2].starts_with("slow.example,Enrichment timeout,"));
    }
}
