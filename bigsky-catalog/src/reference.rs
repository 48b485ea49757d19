//! Reference astrometry from the Hipparcos and Tycho-1 main catalogues.
//!
//! Both files share a pipe-delimited layout (I/239):
//!
//! | Field | Content | Places kept |
//! |------:|---------|------------:|
//! | 1 | HIP number / TYC designation | |
//! | 5 | Vmag | 4 |
//! | 11 | Plx (mas) | 2 |
//! | 12, 13 | pmRA, pmDE (mas/yr) | 2 |
//!
//! Hipparcos rows are keyed by number and Tycho-1 rows by normalized TYC
//! designation in a single table. Later loads refine earlier ones field by
//! field, and blank or zero values never overwrite.

use crate::delimited::split_record;
use crate::ids::normalize_primary_id;
use crate::photometry::round_field;
use crate::{CatalogError, CatalogResult};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

pub const HIPPARCOS_FILE: &str = "hip_main.dat";
pub const TYCHO1_FILE: &str = "tyc_main.dat";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReferenceKey {
    Hip(u32),
    Tyc(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AstrometryOverride {
    pub magnitude: Option<f64>,
    pub pm_ra: Option<f64>,
    pub pm_dec: Option<f64>,
    pub parallax: Option<f64>,
}

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

impl AstrometryOverride {
    pub fn merge(&mut self, update: &AstrometryOverride) {
        if let Some(v) = usable(update.magnitude) {
            self.magnitude = Some(v);
        }
        if let Some(v) = usable(update.pm_ra) {
            self.pm_ra = Some(v);
        }
        if let Some(v) = usable(update.pm_dec) {
            self.pm_dec = Some(v);
        }
        if let Some(v) = usable(update.parallax) {
            self.parallax = Some(v);
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum KeySpace {
    Hip,
    Tyc,
}

#[derive(Debug, Default)]
pub struct ReferenceTable {
    entries: HashMap<ReferenceKey, AstrometryOverride>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `hip_main.dat` then `tyc_main.dat` from `dir`.
    pub fn load_dir(dir: &Path) -> CatalogResult<Self> {
        let mut table = Self::new();
        for (name, space) in [(HIPPARCOS_FILE, KeySpace::Hip), (TYCHO1_FILE, KeySpace::Tyc)] {
            let path = dir.join(name);
            let file = File::open(&path).map_err(|e| CatalogError::io(&path, e))?;
            let count = table.load(BufReader::new(file), name, space)?;
            info!(file = name, rows = count, "loaded reference astrometry");
        }
        Ok(table)
    }

    pub fn load_hipparcos<R: BufRead>(&mut self, reader: R) -> CatalogResult<usize> {
        self.load(reader, HIPPARCOS_FILE, KeySpace::Hip)
    }

    pub fn load_tycho1<R: BufRead>(&mut self, reader: R) -> CatalogResult<usize> {
        self.load(reader, TYCHO1_FILE, KeySpace::Tyc)
    }

    fn load<R: BufRead>(&mut self, reader: R, source_name: &str, space: KeySpace) -> CatalogResult<usize> {
        let mut count = 0;
        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| CatalogError::io(source_name, e))?;
            if line.trim().is_empty() {
                continue;
            }
            let (key, values) =
                parse_reference_line(&line, space).map_err(|e| e.at_row(source_name, line_num as u64 + 1))?;
            self.register(key, &values);
            count += 1;
        }
        debug!(file = source_name, entries = self.entries.len(), "reference table size");
        Ok(count)
    }

    pub fn register(&mut self, key: ReferenceKey, values: &AstrometryOverride) {
        self.entries.entry(key).or_default().merge(values);
    }

    pub fn get(&self, key: &ReferenceKey) -> Option<&AstrometryOverride> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_reference_line(line: &str, space: KeySpace) -> CatalogResult<(ReferenceKey, AstrometryOverride)> {
    let fields = split_record(line, '|');
    if fields.len() < 14 {
        return Err(CatalogError::ShortRow {
            expected: 14,
            found: fields.len(),
        });
    }

    let raw_id = fields[1].trim();
    let key = match space {
        KeySpace::Hip => ReferenceKey::Hip(
            raw_id
                .parse()
                .map_err(|_| CatalogError::identifier_format(raw_id, "HIP number is not an integer"))?,
        ),
        KeySpace::Tyc => ReferenceKey::Tyc(normalize_primary_id(raw_id)?),
    };

    let number = |index: usize, name: &'static str, places: u32| {
        round_field(Some(fields[index].as_str()), places).map_err(|_| CatalogError::invalid_field(name, &fields[index]))
    };

    let values = AstrometryOverride {
        magnitude: number(5, "Vmag", 4)?,
        parallax: number(11, "Plx", 2)?,
        pm_ra: number(12, "pmRA", 2)?,
        pm_dec: number(13, "pmDE", 2)?,
    };
    Ok((key, values))
}
