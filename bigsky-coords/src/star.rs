//! Catalog star with linear space motion.
//!
//! A [`StarModel`] holds a catalog position at its own epoch together with
//! optional proper motion and parallax. From these it builds a barycentric
//! position vector in AU and a velocity in AU/day:
//!
//! | Quantity | Source |
//! |----------|--------|
//! | distance | `1 / sin(parallax)`, or 1 Gpc without a usable parallax |
//! | velocity | proper motion scaled by the distance, no radial velocity |
//!
//! Omitted proper motion means the star does not move. Omitted parallax places
//! it effectively at infinity, so observer parallax vanishes.

use crate::{CoordError, CoordResult};
use bigsky_core::constants::{
    DAYS_PER_JULIAN_YEAR, DEG_TO_RAD, FALLBACK_PARALLAX_MAS, MILLIARCSEC_TO_RAD,
};
use bigsky_core::{JulianDate, Vector3};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StarModel {
    ra_deg: f64,
    dec_deg: f64,
    pm_ra_mas_per_year: Option<f64>,
    pm_dec_mas_per_year: Option<f64>,
    parallax_mas: Option<f64>,
    epoch: JulianDate,
}

impl StarModel {
    /// Star fixed at `ra_deg`/`dec_deg` for the catalog `epoch`.
    ///
    /// # Errors
    /// `InvalidCoordinate` if either angle is not finite or dec is outside ±90°.
    pub fn new(ra_deg: f64, dec_deg: f64, epoch: JulianDate) -> CoordResult<Self> {
        if !ra_deg.is_finite() || !dec_deg.is_finite() {
            return Err(CoordError::invalid_coordinate(format!(
                "position must be finite, got ra={} dec={}",
                ra_deg, dec_deg
            )));
        }
        if !(-90.0..=90.0).contains(&dec_deg) {
            return Err(CoordError::invalid_coordinate(format!(
                "declination {} outside [-90, 90]",
                dec_deg
            )));
        }
        Ok(Self {
            ra_deg,
            dec_deg,
            pm_ra_mas_per_year: None,
            pm_dec_mas_per_year: None,
            parallax_mas: None,
            epoch,
        })
    }

    /// Proper motion in mas/yr; RA component already multiplied by cos(dec).
    pub fn with_proper_motion(mut self, pm_ra: Option<f64>, pm_dec: Option<f64>) -> Self {
        self.pm_ra_mas_per_year = pm_ra;
        self.pm_dec_mas_per_year = pm_dec;
        self
    }

    pub fn with_parallax(mut self, parallax_mas: Option<f64>) -> Self {
        self.parallax_mas = parallax_mas;
        self
    }

    pub fn ra_deg(&self) -> f64 {
        self.ra_deg
    }

    pub fn dec_deg(&self) -> f64 {
        self.dec_deg
    }

    pub fn epoch(&self) -> JulianDate {
        self.epoch
    }

    fn effective_parallax_mas(&self) -> f64 {
        match self.parallax_mas {
            Some(p) if p > 0.0 => p,
            _ => FALLBACK_PARALLAX_MAS,
        }
    }

    pub fn distance_au(&self) -> f64 {
        1.0 / libm::sin(self.effective_parallax_mas() * MILLIARCSEC_TO_RAD)
    }

    /// Barycentric position at the catalog epoch, AU.
    pub fn position_au(&self) -> Vector3 {
        Vector3::from_spherical(self.ra_deg * DEG_TO_RAD, self.dec_deg * DEG_TO_RAD)
            * self.distance_au()
    }

    /// Space velocity, AU/day.
    pub fn velocity_au_per_day(&self) -> Vector3 {
        let scale = self.effective_parallax_mas() * DAYS_PER_JULIAN_YEAR;
        let pmr = self.pm_ra_mas_per_year.unwrap_or(0.0) / scale;
        let pmd = self.pm_dec_mas_per_year.unwrap_or(0.0) / scale;

        let (sr, cr) = libm::sincos(self.ra_deg * DEG_TO_RAD);
        let (sd, cd) = libm::sincos(self.dec_deg * DEG_TO_RAD);

        Vector3::new(
            -pmr * sr - pmd * sd * cr,
            pmr * cr - pmd * sd * sr,
            pmd * cd,
        )
    }
}
