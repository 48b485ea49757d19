//! Constellation lookup from the B1875 boundary table (Roman 1987, VI/42).
//!
//! Each line of `boundaries.dat` is `RA_low RA_high Dec_low CODE` with RA in
//! hours and Dec in degrees, both for the B1875 equinox. Bands are ordered
//! from north to south; the first band whose lower declination is at or below
//! the star and whose RA range contains it names the constellation.

use crate::{CatalogError, CatalogResult};
use bigsky_core::precession::precess_radec;
use bigsky_core::JulianDate;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct ConstellationBand {
    pub ra_low_hours: f64,
    pub ra_high_hours: f64,
    pub dec_low_deg: f64,
    pub code: String,
}

#[derive(Debug, Clone)]
pub struct ConstellationMap {
    bands: Vec<ConstellationBand>,
    j2000: JulianDate,
    b1875: JulianDate,
}

impl ConstellationMap {
    pub fn new(bands: Vec<ConstellationBand>) -> Self {
        Self {
            bands,
            j2000: JulianDate::j2000(),
            b1875: JulianDate::from_besselian_epoch(1875.0),
        }
    }

    pub fn from_reader<R: BufRead>(reader: R) -> CatalogResult<Self> {
        let mut bands = Vec::new();
        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| CatalogError::io("constellation boundaries", e))?;
            if line.trim().is_empty() {
                continue;
            }
            let band = parse_band(&line).map_err(|e| e.at_row("constellation boundaries", line_num as u64 + 1))?;
            bands.push(band);
        }
        debug!(bands = bands.len(), "loaded constellation boundaries");
        Ok(Self::new(bands))
    }

    /// Reads `path`, or returns `None` if the file does not exist.
    pub fn load_optional(path: &Path) -> CatalogResult<Option<Self>> {
        match File::open(path) {
            Ok(file) => Self::from_reader(BufReader::new(file)).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "constellation boundaries not found");
                Ok(None)
            }
            Err(e) => Err(CatalogError::io(path, e)),
        }
    }

    /// Lowercase IAU code for a J2000 position in degrees.
    pub fn lookup(&self, ra_deg: f64, dec_deg: f64) -> Option<&str> {
        let (ra_1875, dec_1875) = precess_radec(ra_deg, dec_deg, &self.j2000, &self.b1875);
        let ra_hours = ra_1875 / 15.0;

        self.bands
            .iter()
            .find(|band| {
                dec_1875 >= band.dec_low_deg && band.ra_low_hours <= ra_hours && ra_hours < band.ra_high_hours
            })
            .map(|band| band.code.as_str())
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}

fn parse_band(line: &str) -> CatalogResult<ConstellationBand> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(CatalogError::ShortRow {
            expected: 4,
            found: parts.len(),
        });
    }
    let number = |text: &str, field: &'static str| {
        text.parse::<f64>().map_err(|_| CatalogError::invalid_field(field, text))
    };

    Ok(ConstellationBand {
        ra_low_hours: number(parts[0], "RA_low")?,
        ra_high_hours: number(parts[1], "RA_high")?,
        dec_low_deg: number(parts[2], "Dec_low")?,
        code: parts[3].to_ascii_lowercase(),
    })
}
