//! Output star records and their column layout.

use crate::photometry::round_value;

pub const STANDARD_HEADER: [&str; 10] = [
    "tyc_id",
    "hip_id",
    "ccdm",
    "magnitude",
    "bv",
    "ra_degrees_j2000",
    "dec_degrees_j2000",
    "ra_mas_per_year",
    "dec_mas_per_year",
    "parallax_mas",
];

pub const EXTENDED_COLUMNS: [&str; 5] = ["name", "hd_id", "bayer", "flamsteed", "constellation"];

pub fn header(extended: bool) -> Vec<&'static str> {
    let mut columns = STANDARD_HEADER.to_vec();
    if extended {
        columns.extend_from_slice(&EXTENDED_COLUMNS);
    }
    columns
}

/// Cross-identifications carried by the extended output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StarExtras {
    pub name: Option<String>,
    pub hd_id: Option<u32>,
    pub bayer: Option<String>,
    pub flamsteed: Option<u32>,
    pub constellation: Option<String>,
}

/// One output star, positioned at J2000.0.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalStarRecord {
    pub tyc_id: String,
    pub hip_id: Option<u32>,
    /// Component suffix; empty when the HIP number has none.
    pub ccdm: Option<String>,
    pub magnitude: f64,
    pub bv: Option<f64>,
    pub ra_deg: f64,
    pub dec_deg: f64,
    pub pm_ra: f64,
    pub pm_dec: f64,
    pub parallax: f64,
    pub extras: Option<StarExtras>,
}

impl CanonicalStarRecord {
    /// Output precision: magnitudes to 0.01, angles and motions to 0.0001.
    pub fn rounded(&self) -> Self {
        Self {
            magnitude: round_value(self.magnitude, 2),
            bv: self.bv.map(|bv| round_value(bv, 2)),
            ra_deg: round_value(self.ra_deg, 4),
            dec_deg: round_value(self.dec_deg, 4),
            pm_ra: round_value(self.pm_ra, 4),
            pm_dec: round_value(self.pm_dec, 4),
            ..self.clone()
        }
    }

    /// Text cells in header order; `None` becomes an empty cell.
    pub fn to_cells(&self, extended: bool) -> Vec<String> {
        let mut cells = vec![
            self.tyc_id.clone(),
            optional(self.hip_id),
            self.ccdm.clone().unwrap_or_default(),
            self.magnitude.to_string(),
            optional(self.bv),
            self.ra_deg.to_string(),
            self.dec_deg.to_string(),
            self.pm_ra.to_string(),
            self.pm_dec.to_string(),
            self.parallax.to_string(),
        ];
        if extended {
            let extras = self.extras.clone().unwrap_or_default();
            cells.extend([
                extras.name.unwrap_or_default(),
                optional(extras.hd_id),
                extras.bayer.unwrap_or_default(),
                optional(extras.flamsteed),
                extras.constellation.unwrap_or_default(),
            ]);
        }
        cells
    }
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
