//! Named-field extraction for the two Tycho-2 pipe-delimited layouts.
//!
//! Column positions follow the CDS ReadMe of I/259 (0-based after splitting
//! on `|`):
//!
//! | Field | Main (`tyc2.dat.NN`) | Supplement (`suppl_1.dat`) |
//! |-------|---------------------:|---------------------------:|
//! | TYC designation | 0 | 0 |
//! | RA, Dec (deg) | 24, 25 (observed) | 2, 3 |
//! | pmRA, pmDE (mas/yr) | 4, 5 | 4, 5 |
//! | BT, VT (mag) | 17, 19 | 11, 13 |
//! | HIP + CCDM | 23 | 17 |
//! | epoch offsets from 1990 | 26, 27 | fixed J1991.25 |
//!
//! Main-catalogue rows carry the observed position at a per-row epoch; the
//! mean position columns are ignored.

use crate::delimited::split_record;
use crate::photometry::round_field;
use crate::{CatalogError, CatalogResult};

const MAIN_FIELDS: usize = 28;
const SUPPLEMENT_FIELDS: usize = 14;

/// Decimal places kept when reading Tycho-2 numbers.
const ROW_PLACES: u32 = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct Tycho2MainRow {
    pub tyc: String,
    pub pm_ra: Option<f64>,
    pub pm_dec: Option<f64>,
    pub bt: Option<f64>,
    pub vt: Option<f64>,
    pub hip: Option<String>,
    pub ra: Option<f64>,
    pub dec: Option<f64>,
    pub epoch_ra_offset: Option<f64>,
    pub epoch_dec_offset: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tycho2SupplementRow {
    pub tyc: String,
    pub ra: Option<f64>,
    pub dec: Option<f64>,
    pub pm_ra: Option<f64>,
    pub pm_dec: Option<f64>,
    pub bt: Option<f64>,
    pub vt: Option<f64>,
    pub hip: Option<String>,
}

struct Fields(Vec<String>);

impl Fields {
    fn split(line: &str, expected: usize) -> CatalogResult<Self> {
        let fields = split_record(line, '|');
        if fields.len() < expected {
            return Err(CatalogError::ShortRow {
                expected,
                found: fields.len(),
            });
        }
        Ok(Self(fields))
    }

    fn text(&self, index: usize) -> Option<&str> {
        self.0
            .get(index)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    fn number(&self, index: usize, name: &'static str) -> CatalogResult<Option<f64>> {
        let raw = self.0.get(index).map(String::as_str);
        round_field(raw, ROW_PLACES).map_err(|_| CatalogError::invalid_field(name, raw.unwrap_or("")))
    }

    fn designation(&self) -> CatalogResult<String> {
        self.text(0)
            .map(str::to_string)
            .ok_or_else(|| CatalogError::identifier_format("", "blank TYC designation"))
    }
}

impl Tycho2MainRow {
    pub fn parse(line: &str) -> CatalogResult<Self> {
        let f = Fields::split(line, MAIN_FIELDS)?;
        let ra = f.number(24, "RAdeg")?;
        let dec = f.number(25, "DEdeg")?;
        // epochs only matter for rows that have a position
        let (epoch_ra_offset, epoch_dec_offset) = if ra.is_some() && dec.is_some() {
            (f.number(26, "epRA-1990")?, f.number(27, "epDE-1990")?)
        } else {
            (None, None)
        };
        Ok(Self {
            tyc: f.designation()?,
            pm_ra: f.number(4, "pmRA")?,
            pm_dec: f.number(5, "pmDE")?,
            bt: f.number(17, "BTmag")?,
            vt: f.number(19, "VTmag")?,
            hip: f.text(23).map(str::to_string),
            ra,
            dec,
            epoch_ra_offset,
            epoch_dec_offset,
        })
    }
}

impl Tycho2SupplementRow {
    pub fn parse(line: &str) -> CatalogResult<Self> {
        let f = Fields::split(line, SUPPLEMENT_FIELDS)?;
        Ok(Self {
            tyc: f.designation()?,
            ra: f.number(2, "RAdeg")?,
            dec: f.number(3, "DEdeg")?,
            pm_ra: f.number(4, "pmRA")?,
            pm_dec: f.number(5, "pmDE")?,
            bt: f.number(11, "BTmag")?,
            vt: f.number(13, "VTmag")?,
            hip: f.text(17).map(str::to_string),
        })
    }
}
