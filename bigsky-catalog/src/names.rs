//! Star names and catalogue cross-identifications, keyed by HIP number.
//!
//! Common names come from a comma-delimited table with a header naming at
//! least the `hip` and `name` columns. The cross index is the fixed-width
//! HD/DM/GC/HR/HIP/Bayer/Flamsteed table (IV/27A `catalog.dat`).

use crate::bayer::decode_bayer;
use crate::delimited::split_record;
use crate::{CatalogError, CatalogResult};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct CommonNames {
    names: HashMap<u32, String>,
}

impl CommonNames {
    pub fn from_reader<R: BufRead>(reader: R) -> CatalogResult<Self> {
        let mut lines = reader.lines();
        let header = match lines.next() {
            Some(line) => line.map_err(|e| CatalogError::io("common names", e))?,
            None => return Ok(Self::default()),
        };
        let columns = split_record(&header, ',');
        let hip_col = require_column(&columns, "hip")?;
        let name_col = require_column(&columns, "name")?;

        let mut names = HashMap::new();
        for (line_num, line) in lines.enumerate() {
            let line = line.map_err(|e| CatalogError::io("common names", e))?;
            if line.trim().is_empty() {
                continue;
            }
            let fields = split_record(&line, ',');
            let hip = fields.get(hip_col).map(|s| s.trim()).unwrap_or("");
            let name = fields.get(name_col).map(|s| s.trim()).unwrap_or("");
            if name.is_empty() {
                continue;
            }
            let hip = hip.parse::<u32>().map_err(|_| {
                CatalogError::identifier_format(hip, "HIP number is not an integer")
                    .at_row("common names", line_num as u64 + 2)
            })?;
            names.entry(hip).or_insert_with(|| name.to_string());
        }
        Ok(Self { names })
    }

    /// Reads `path`, or returns an empty table if the file does not exist.
    pub fn load_optional(path: &Path) -> CatalogResult<Self> {
        match File::open(path) {
            Ok(file) => {
                let table = Self::from_reader(BufReader::new(file))?;
                debug!(path = %path.display(), names = table.len(), "loaded common names");
                Ok(table)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "common name table not found, names left blank");
                Ok(Self::default())
            }
            Err(e) => Err(CatalogError::io(path, e)),
        }
    }

    pub fn get(&self, hip: u32) -> Option<&str> {
        self.names.get(&hip).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn require_column(columns: &[String], name: &str) -> CatalogResult<usize> {
    columns
        .iter()
        .position(|c| c.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| CatalogError::MissingColumn {
            column: name.to_string(),
            source_name: "common names".to_string(),
        })
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrossIndexEntry {
    pub hd: Option<u32>,
    pub flamsteed: Option<u32>,
    /// Decoded Greek letter with superscript ordinal.
    pub bayer: Option<String>,
    /// Lowercase IAU abbreviation as given by the table.
    pub constellation: Option<String>,
}

#[derive(Debug, Default)]
pub struct CrossIndex {
    entries: HashMap<u32, CrossIndexEntry>,
}

impl CrossIndex {
    pub fn from_reader<R: BufRead>(reader: R) -> CatalogResult<Self> {
        let mut entries = HashMap::new();
        let mut without_hip = 0u64;

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| CatalogError::io("cross index", e))?;
            let bytes = line.as_bytes();
            let Some(hip) = col(bytes, 31, 37) else {
                without_hip += 1;
                continue;
            };
            let hip = parse_u32(hip, "HIP").map_err(|e| e.at_row("cross index", line_num as u64 + 1))?;

            let entry = CrossIndexEntry {
                hd: col(bytes, 0, 6)
                    .map(|s| parse_u32(s, "HD"))
                    .transpose()
                    .map_err(|e| e.at_row("cross index", line_num as u64 + 1))?,
                flamsteed: col(bytes, 64, 67)
                    .map(|s| parse_u32(s, "Fl"))
                    .transpose()
                    .map_err(|e| e.at_row("cross index", line_num as u64 + 1))?,
                bayer: col(bytes, 68, 73).and_then(decode_bayer),
                constellation: col(bytes, 74, 77).map(str::to_ascii_lowercase),
            };
            entries.entry(hip).or_insert(entry);
        }

        debug!(entries = entries.len(), without_hip, "loaded cross index");
        Ok(Self { entries })
    }

    pub fn load_optional(path: &Path) -> CatalogResult<Self> {
        match File::open(path) {
            Ok(file) => Self::from_reader(BufReader::new(file)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "cross index not found, HD/Bayer/Flamsteed left blank");
                Ok(Self::default())
            }
            Err(e) => Err(CatalogError::io(path, e)),
        }
    }

    pub fn get(&self, hip: u32) -> Option<&CrossIndexEntry> {
        self.entries.get(&hip)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Trimmed, non-blank text of a fixed-width column; short lines are clamped.
fn col(bytes: &[u8], start: usize, end: usize) -> Option<&str> {
    if start >= bytes.len() {
        return None;
    }
    let end = end.min(bytes.len());
    std::str::from_utf8(&bytes[start..end])
        .ok()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn parse_u32(text: &str, field: &'static str) -> CatalogResult<u32> {
    text.parse().map_err(|_| CatalogError::invalid_field(field, text))
}
