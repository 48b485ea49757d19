//! Washington Double Star catalog.
//!
//! Fixed-width records. Bytes 1-10 hold the WDS identifier (an abbreviated
//! J2000 position), 11-17 the discoverer designation and 113-130 the precise
//! J2000 position as `hhmmss.ss±ddmmss.s`.

use crate::{CatalogError, CatalogResult};
use bigsky_core::angle::parse_packed_radec;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

pub const WDS_FILE: &str = "wds_all.txt";

const ID: std::ops::Range<usize> = 0..17;
const DISCOVERER: std::ops::Range<usize> = 10..17;
const PRECISE_COORDS: std::ops::Range<usize> = 112..130;

#[derive(Debug, Clone, PartialEq)]
pub struct DoubleStar {
    pub wds_id: String,
    /// Discoverer designation, e.g. `STF  60`.
    pub name: String,
    pub ra_deg: f64,
    pub dec_deg: f64,
    /// Never set from WDS input.
    pub hip_id: Option<u32>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct WdsStats {
    pub read: u64,
    pub loaded: u64,
    pub duplicates: u64,
    pub no_position: u64,
    pub errors: u64,
}

fn slice(line: &str, range: std::ops::Range<usize>) -> &str {
    let end = range.end.min(line.len());
    line.get(range.start.min(end)..end).unwrap_or("").trim()
}

enum Parsed {
    Star(DoubleStar),
    NoPosition,
}

fn parse_line(wds_id: &str, line: &str) -> CatalogResult<Parsed> {
    let coords = slice(line, PRECISE_COORDS);
    if coords.is_empty() || coords.starts_with('.') {
        return Ok(Parsed::NoPosition);
    }
    let (ra_deg, dec_deg) = parse_packed_radec(coords)?;
    Ok(Parsed::Star(DoubleStar {
        wds_id: wds_id.to_string(),
        name: slice(line, DISCOVERER).to_string(),
        ra_deg,
        dec_deg,
        hip_id: None,
    }))
}

/// Parses WDS records; the first record for an identifier wins.
pub fn parse_wds<R: BufRead>(reader: R, source_name: &str) -> CatalogResult<(Vec<DoubleStar>, WdsStats)> {
    let mut stars = Vec::new();
    let mut stats = WdsStats::default();
    let mut seen = HashSet::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| CatalogError::io(source_name, e))?;
        if line.trim().is_empty() {
            continue;
        }
        stats.read += 1;

        let wds_id = slice(&line, ID);
        if wds_id.is_empty() {
            warn!(file = source_name, row = line_num + 1, "blank WDS identifier");
            stats.errors += 1;
            continue;
        }
        if !seen.insert(wds_id.to_string()) {
            stats.duplicates += 1;
            continue;
        }

        match parse_line(wds_id, &line) {
            Ok(Parsed::Star(star)) => {
                stars.push(star);
                stats.loaded += 1;
            }
            Ok(Parsed::NoPosition) => stats.no_position += 1,
            Err(e) => {
                warn!(file = source_name, row = line_num + 1, error = %e, "skipping WDS row");
                stats.errors += 1;
            }
        }
    }
    Ok((stars, stats))
}

/// Loads `wds_all.txt` from `dir`. A missing file yields no double stars.
pub fn load_wds(dir: &Path) -> CatalogResult<(Vec<DoubleStar>, WdsStats)> {
    let path = dir.join(WDS_FILE);
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "WDS file not found, skipping double stars");
            return Ok((Vec::new(), WdsStats::default()));
        }
        Err(e) => return Err(CatalogError::io(&path, e)),
    };
    info!(file = WDS_FILE, "reading double stars");
    let (stars, stats) = parse_wds(BufReader::new(file), WDS_FILE)?;
    info!(
        loaded = stats.loaded,
        duplicates = stats.duplicates,
        no_position = stats.no_position,
        errors = stats.errors,
        "double stars parsed"
    );
    Ok((stars, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn wds_line(id: &str, discoverer: &str, coords: &str) -> String {
        format!("{:<10}{:<7}{:<95}{}", id, discoverer, "", coords)
    }

    #[test]
    fn test_parse_precise_coordinates() {
        let input = wds_line("00000+7530", "A 1248", "000006.64+752859.8");
        let (stars, stats) = parse_wds(Cursor::new(input), WDS_FILE).unwrap();
        assert_eq!(stats.loaded, 1);
        let star = &stars[0];
        assert_eq!(star.wds_id, "00000+7530A 1248");
        assert_eq!(star.name, "A 1248");
        assert!((star.ra_deg - 0.027667).abs() < 1e-6);
        assert!((star.dec_deg - 75.483278).abs() < 1e-6);
        assert_eq!(star.hip_id, None);
    }

    #[test]
    fn test_duplicates_first_wins() {
        let input = [
            wds_line("00001-0122", "STF  60", "000005.30-012159.0"),
            wds_line("00001-0122", "STF  60", "000009.99-012100.0"),
            wds_line("00002+0146", "WFC   1", "000012.00+014612.0"),
        ]
        .join("\n");
        let (stars, stats) = parse_wds(Cursor::new(input), WDS_FILE).unwrap();
        assert_eq!(stats.read, 3);
        assert_eq!(stats.duplicates, 1);
        assert_eq!(stars.len(), 2);
        assert!((stars[0].ra_deg - 0.022083).abs() < 1e-6);
        assert!(stars[0].dec_deg < 0.0);
    }

    #[test]
    fn test_missing_and_malformed_coordinates() {
        let input = [
            wds_line("00003+1111", "ABC   1", ""),
            wds_line("00004+1111", "ABC   2", "0000xx.00+111100.0"),
        ]
        .join("\n");
        let (stars, stats) = parse_wds(Cursor::new(input), WDS_FILE).unwrap();
        assert!(stars.is_empty());
        assert_eq!(stats.no_position, 1);
        assert_eq!(stats.errors, 1);
    }
}
