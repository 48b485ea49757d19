//! OpenNGC deep-sky objects.
//!
//! `NGC.csv` and `addendum.csv` are semicolon-delimited with a header row.
//! Positions are sexagesimal J2000 (`hh:mm:ss.ss`, `±dd:mm:ss.s`) and come
//! out in degrees. The designation prefix decides which catalogue number it
//! carries; the `NGC` and `IC` columns add cross numbers and `M` the Messier
//! number.

use crate::delimited::split_record;
use crate::photometry::{round_field, round_value};
use crate::{CatalogError, CatalogResult};
use bigsky_core::angle::{parse_dms, parse_hms};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, warn};

pub const ONGC_FILES: [&str; 2] = ["NGC.csv", "addendum.csv"];

static DESIGNATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(NGC|IC)\s*(\d+)").expect("designation pattern is valid"));

#[derive(Debug, Clone, PartialEq)]
pub struct DeepSkyObject {
    pub designation: String,
    pub common_names: Vec<String>,
    pub ra_deg: f64,
    pub dec_deg: f64,
    pub object_type: String,
    pub magnitude_b: Option<f64>,
    pub magnitude_v: Option<f64>,
    /// Arcminutes.
    pub major_axis: Option<f64>,
    pub minor_axis: Option<f64>,
    pub position_angle: Option<f64>,
    pub ngc: Option<u32>,
    pub ic: Option<u32>,
    pub messier: Option<u32>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct DsoStats {
    pub read: u64,
    pub loaded: u64,
    pub no_position: u64,
    pub unknown_designation: u64,
    pub errors: u64,
}

struct Columns {
    name: usize,
    object_type: usize,
    ra: usize,
    dec: usize,
    optional: HashMap<&'static str, usize>,
}

const OPTIONAL_COLUMNS: [&str; 9] = [
    "MajAx",
    "MinAx",
    "PosAng",
    "B-Mag",
    "V-Mag",
    "M",
    "NGC",
    "IC",
    "Common names",
];

impl Columns {
    fn from_header(header: &str, source_name: &str) -> CatalogResult<Self> {
        let names = split_record(header, ';');
        let find = |wanted: &str| names.iter().position(|c| c.trim() == wanted);
        let require = |wanted: &str| {
            find(wanted).ok_or_else(|| CatalogError::MissingColumn {
                column: wanted.to_string(),
                source_name: source_name.to_string(),
            })
        };

        let mut optional = HashMap::new();
        for column in OPTIONAL_COLUMNS {
            if let Some(index) = find(column) {
                optional.insert(column, index);
            }
        }

        Ok(Self {
            name: require("Name")?,
            object_type: require("Type")?,
            ra: require("RA")?,
            dec: require("Dec")?,
            optional,
        })
    }
}

struct Row<'a> {
    fields: &'a [String],
    columns: &'a Columns,
}

impl Row<'_> {
    fn at(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(|s| s.trim()).filter(|s| !s.is_empty())
    }

    fn optional(&self, column: &'static str) -> Option<&str> {
        self.columns.optional.get(column).and_then(|&i| self.at(i))
    }

    fn number(&self, column: &'static str) -> CatalogResult<Option<f64>> {
        let raw = self.optional(column);
        round_field(raw, 2).map_err(|_| CatalogError::invalid_field(column, raw.unwrap_or("")))
    }

    fn catalogue_number(&self, column: &'static str) -> CatalogResult<Option<u32>> {
        self.optional(column)
            .map(|raw| raw.parse::<u32>().map_err(|_| CatalogError::invalid_field(column, raw)))
            .transpose()
    }
}

enum Parsed {
    Object(DeepSkyObject, bool),
    NoPosition,
}

fn parse_row(row: &Row<'_>) -> CatalogResult<Parsed> {
    let designation = row
        .at(row.columns.name)
        .ok_or_else(|| CatalogError::identifier_format("", "blank designation"))?
        .to_string();

    let (Some(ra), Some(dec)) = (row.at(row.columns.ra), row.at(row.columns.dec)) else {
        return Ok(Parsed::NoPosition);
    };
    let ra_deg = round_value(parse_hms(ra)?, 6);
    let dec_deg = round_value(parse_dms(dec)?, 6);

    let mut ngc = row.catalogue_number("NGC")?;
    let mut ic = row.catalogue_number("IC")?;
    let known = match DESIGNATION.captures(&designation) {
        Some(caps) => {
            let number = caps[2]
                .parse::<u32>()
                .map_err(|_| CatalogError::identifier_format(&designation, "designation number too large"))?;
            if &caps[1] == "NGC" {
                ngc = Some(number);
            } else {
                ic = Some(number);
            }
            true
        }
        None => {
            ngc = None;
            ic = None;
            false
        }
    };

    let common_names = row
        .optional("Common names")
        .map(|names| {
            names
                .split(',')
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(Parsed::Object(
        DeepSkyObject {
            designation,
            common_names,
            ra_deg,
            dec_deg,
            object_type: row.at(row.columns.object_type).unwrap_or_default().to_string(),
            magnitude_b: row.number("B-Mag")?,
            magnitude_v: row.number("V-Mag")?,
            major_axis: row.number("MajAx")?,
            minor_axis: row.number("MinAx")?,
            position_angle: row.number("PosAng")?,
            ngc,
            ic,
            messier: row.catalogue_number("M")?,
        },
        known,
    ))
}

/// Parses one OpenNGC file. Bad rows are logged and counted, not fatal.
pub fn parse_ongc<R: BufRead>(
    reader: R,
    source_name: &str,
    objects: &mut Vec<DeepSkyObject>,
    stats: &mut DsoStats,
) -> CatalogResult<()> {
    let mut lines = reader.lines();
    let Some(header) = lines.next() else {
        return Ok(());
    };
    let header = header.map_err(|e| CatalogError::io(source_name, e))?;
    let columns = Columns::from_header(&header, source_name)?;

    for (line_num, line) in lines.enumerate() {
        let line = line.map_err(|e| CatalogError::io(source_name, e))?;
        if line.trim().is_empty() {
            continue;
        }
        stats.read += 1;
        let fields = split_record(&line, ';');
        let row = Row {
            fields: &fields,
            columns: &columns,
        };
        match parse_row(&row) {
            Ok(Parsed::Object(object, known)) => {
                if !known {
                    debug!(designation = %object.designation, "designation is neither NGC nor IC");
                    stats.unknown_designation += 1;
                }
                objects.push(object);
                stats.loaded += 1;
            }
            Ok(Parsed::NoPosition) => stats.no_position += 1,
            Err(e) => {
                warn!(file = source_name, row = line_num + 2, error = %e, "skipping deep-sky row");
                stats.errors += 1;
            }
        }
    }
    Ok(())
}

/// Loads every OpenNGC file present in `dir`, in order.
pub fn load_ongc(dir: &Path) -> CatalogResult<(Vec<DeepSkyObject>, DsoStats)> {
    let mut objects = Vec::new();
    let mut stats = DsoStats::default();

    for name in ONGC_FILES {
        let path = dir.join(name);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "OpenNGC file not found, skipping");
                continue;
            }
            Err(e) => return Err(CatalogError::io(&path, e)),
        };
        info!(file = name, "reading deep-sky objects");
        parse_ongc(BufReader::new(file), name, &mut objects, &mut stats)?;
    }

    info!(
        loaded = stats.loaded,
        no_position = stats.no_position,
        unknown_designation = stats.unknown_designation,
        errors = stats.errors,
        "deep-sky objects parsed"
    );
    Ok((objects, stats))
}
