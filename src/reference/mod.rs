//! Static reference tables.
//!
//! Two read-only datasets are loaded once at startup and shared by every
//! enrichment task without locking:
//! - registrar display name → country (ICANN accredited registrar list)
//! - IPv4 range → ASN, ASN country, ASN description (iptoasn)
//!
//! A missing file is a degraded mode, not an error: it is logged once at load
//! time and every lookup against that table returns nothing.

mod asn;
mod registrars;

use std::fs::File;
use std::path::Path;

pub use asn::{ipv4_to_u32, parse_asn_rows, AsnRange, AsnTable};
pub use registrars::{parse_registrar_rows, RegistrarCountries};

use crate::error_handling::ReferenceDataError;

/// Both reference tables, each possibly absent.
#[derive(Debug, Default)]
pub struct ReferenceTables {
    registrars: Option<RegistrarCountries>,
    asn: Option<AsnTable>,
}

impl ReferenceTables {
    /// Loads both tables from disk.
    ///
    /// Never fails: a missing or unreadable file leaves that table absent and
    /// logs a warning.
    pub fn load(registrars_path: &Path, asn_path: &Path) -> Self {
        let registrars = load_optional(registrars_path, "registrar country", |file, path| {
            parse_registrar_rows(file, path)
        });
        if let Some(ref table) = registrars {
            log::info!(
                "Loaded {} registrars from {}",
                table.len(),
                registrars_path.display()
            );
        }

        let asn = load_optional(asn_path, "ASN", |file, path| {
            parse_asn_rows(file)
                .map(AsnTable::new)
                .map_err(|source| ReferenceDataError::Csv {
                    path: path.to_string(),
                    source,
                })
        });
        if let Some(ref table) = asn {
            log::info!(
                "Loaded {} ASN ranges from {}",
                table.len(),
                asn_path.display()
            );
        }

        ReferenceTables { registrars, asn }
    }

    /// Builds tables in memory. `None` means the table is absent.
    pub fn from_parts(registrars: Option<RegistrarCountries>, asn: Option<AsnTable>) -> Self {
        ReferenceTables { registrars, asn }
    }

    pub fn has_registrars(&self) -> bool {
        self.registrars.is_some()
    }

    pub fn has_asn(&self) -> bool {
        self.asn.is_some()
    }

    /// Registrar country by exact, case-insensitive name match.
    pub fn lookup_registrar_country(&self, name: &str) -> Option<&str> {
        self.registrars.as_ref()?.lookup(name)
    }

    /// The first range containing `ip` (inclusive bounds).
    ///
    /// A malformed address is logged and treated as no match.
    pub fn lookup_asn(&self, ip: &str) -> Option<&AsnRange> {
        let table = self.asn.as_ref()?;
        let Some(value) = ipv4_to_u32(ip) else {
            log::warn!("ASN lookup skipped for malformed IPv4 address '{ip}'");
            return None;
        };
        table.lookup(value)
    }
}

fn load_optional<T>(
    path: &Path,
    label: &str,
    parse: impl FnOnce(File, &str) -> Result<T, ReferenceDataError>,
) -> Option<T> {
    let display = path.display().to_string();
    if !path.exists() {
        log::warn!(
            "{} table {} does not exist; {} lookups will be empty for this run",
            label,
            display,
            label
        );
        return None;
    }

    let result = File::open(path)
        .map_err(|source| ReferenceDataError::Io {
            path: display.clone(),
            source,
        })
        .and_then(|file| parse(file, &display));

    match result {
        Ok(table) => Some(table),
        Err(e) => {
            log::warn!("{e}; {label} lookups will be empty for this run");
            None
        }
    }
}
