//! IP range to ASN table.
//!
//! The table is built once from iptoasn-style rows and answers "which range
//! contains this IPv4 address" with a binary search instead of a scan over
//! every row.

use std::io::Read;
use std::net::Ipv4Addr;

/// One row of the IP range table. Bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsnRange {
    pub start_ip: u32,
    pub end_ip: u32,
    pub asn: String,
    pub country: String,
    pub description: String,
}

impl AsnRange {
    pub fn contains(&self, ip: u32) -> bool {
        self.start_ip <= ip && ip <= self.end_ip
    }
}

/// Sorted interval index over [`AsnRange`] rows.
///
/// Ranges are kept sorted by `start_ip` together with their original file
/// position and the running maximum of `end_ip`. A lookup finds the last
/// range starting at or below the address, then walks left only while some
/// earlier range could still reach the address. When ranges overlap, the one
/// that came first in the file wins, exactly as a top-to-bottom scan would.
#[derive(Debug, Default)]
pub struct AsnTable {
    ranges: Vec<AsnRange>,
    positions: Vec<usize>,
    max_end: Vec<u32>,
}

impl AsnTable {
    pub fn new(ranges: Vec<AsnRange>) -> Self {
        let mut indexed: Vec<(usize, AsnRange)> = ranges.into_iter().enumerate().collect();
        // Stable sort keeps file order among equal starts
        indexed.sort_by_key(|(_, range)| range.start_ip);

        let mut positions = Vec::with_capacity(indexed.len());
        let mut max_end = Vec::with_capacity(indexed.len());
        let mut sorted = Vec::with_capacity(indexed.len());
        let mut running_max = 0u32;
        for (position, range) in indexed {
            running_max = running_max.max(range.end_ip);
            positions.push(position);
            max_end.push(running_max);
            sorted.push(range);
        }

        AsnTable {
            ranges: sorted,
            positions,
            max_end,
        }
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Returns the range containing `ip`, preferring the earliest row in file order.
    pub fn lookup(&self, ip: u32) -> Option<&AsnRange> {
        let upper = self.ranges.partition_point(|range| range.start_ip <= ip);

        let mut best: Option<usize> = None;
        for i in (0..upper).rev() {
            if self.max_end[i] < ip {
                break;
            }
            if self.ranges[i].end_ip >= ip {
                match best {
                    Some(b) if self.positions[b] < self.positions[i] => {}
                    _ => best = Some(i),
                }
            }
        }

        best.map(|i| &self.ranges[i])
    }
}

/// Parses a dotted-quad IPv4 address into its 32-bit big-endian value.
pub fn ipv4_to_u32(ip: &str) -> Option<u32> {
    ip.trim().parse::<Ipv4Addr>().ok().map(u32::from)
}

/// Reads iptoasn TSV rows: `start end asn country description`, no header.
///
/// Rows with fewer than five columns, unparsable bounds or `end < start` are
/// skipped.
pub fn parse_asn_rows<R: Read>(reader: R) -> Result<Vec<AsnRange>, csv::Error> {
    let mut tsv = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut ranges = Vec::new();
    for (line, record) in tsv.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e),
            Err(e) => {
                log::debug!("Skipping unreadable ASN row {}: {}", line + 1, e);
                continue;
            }
        };
        if record.len() < 5 {
            log::debug!("Skipping short ASN row {}", line + 1);
            continue;
        }

        let (Some(start_ip), Some(end_ip)) = (ipv4_to_u32(&record[0]), ipv4_to_u32(&record[1]))
        else {
            log::debug!(
                "Skipping ASN row {} with malformed bounds: {} - {}",
                line + 1,
                &record[0],
                &record[1]
            );
            continue;
        };
        if end_ip < start_ip {
            log::debug!("Skipping inverted ASN row {}", line + 1);
            continue;
        }

        ranges.push(AsnRange {
            start_ip,
            end_ip,
            asn: record[2].trim().to_string(),
            country: record[3].trim().to_string(),
            description: record[4].trim().to_string(),
        });
    }

    Ok(ranges)
}
