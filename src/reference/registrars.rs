//! Registrar name to country table.

use std::collections::HashMap;
use std::io::Read;

use crate::config::{REGISTRAR_COUNTRY_COLUMN, REGISTRAR_NAME_COLUMN};
use crate::error_handling::ReferenceDataError;

/// Case-insensitive registrar display name to country map.
#[derive(Debug, Default)]
pub struct RegistrarCountries {
    by_name: HashMap<String, String>,
}

impl RegistrarCountries {
    /// Builds the table from `(registrar name, country)` pairs. The first
    /// occurrence of a name wins, matching a top-to-bottom file scan.
    pub fn from_pairs<I, N, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: AsRef<str>,
        C: Into<String>,
    {
        let mut by_name = HashMap::new();
        for (name, country) in pairs {
            let key = name.as_ref().trim().to_lowercase();
            if key.is_empty() {
                continue;
            }
            by_name.entry(key).or_insert_with(|| country.into());
        }
        RegistrarCountries { by_name }
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Exact, case-insensitive match on the registrar display name.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        let key = name.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }
        self.by_name
            .get(&key)
            .map(String::as_str)
            .filter(|country| !country.trim().is_empty())
    }
}

/// Reads the ICANN accredited registrar CSV.
///
/// Columns are located by header name, so column order and extra columns do
/// not matter. A UTF-8 byte order mark on the first header is ignored.
pub fn parse_registrar_rows<R: Read>(
    reader: R,
    path: &str,
) -> Result<RegistrarCountries, ReferenceDataError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|source| ReferenceDataError::Csv {
            path: path.to_string(),
            source,
        })?
        .clone();
    let column = |wanted: &'static str| {
        headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').trim() == wanted)
            .ok_or(ReferenceDataError::MissingColumn {
                path: path.to_string(),
                column: wanted,
            })
    };
    let name_idx = column(REGISTRAR_NAME_COLUMN)?;
    let country_idx = column(REGISTRAR_COUNTRY_COLUMN)?;

    let mut pairs = Vec::new();
    for (line, record) in csv_reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) if e.is_io_error() => {
                return Err(ReferenceDataError::Csv {
                    path: path.to_string(),
                    source: e,
                })
            }
            Err(e) => {
                log::debug!("Skipping unreadable registrar row {}: {}", line + 2, e);
                continue;
            }
        };
        if let (Some(name), Some(country)) = (record.get(name_idx), record.get(country_idx)) {
            pairs.push((name.to_string(), country.trim().to_string()));
        }
    }

    Ok(RegistrarCountries::from_pairs(pairs))
}
