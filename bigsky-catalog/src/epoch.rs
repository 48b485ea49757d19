//! Normalization of catalog positions to J2000.0.

use crate::CatalogResult;
use bigsky_coords::{Astrometry, EarthAstrometry, StarModel};
use bigsky_core::constants::J1991_25_EPOCH_YEAR;
use bigsky_core::JulianDate;

/// Julian epoch year a row's position was observed at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SourceEpoch {
    /// Hipparcos/Tycho reference epoch J1991.25.
    Hipparcos,
    /// Tycho-2 per-axis observation epochs, as offsets from 1990.
    Offsets { ra: f64, dec: f64 },
}

impl SourceEpoch {
    pub fn julian_year(&self) -> f64 {
        match self {
            Self::Hipparcos => J1991_25_EPOCH_YEAR,
            Self::Offsets { ra, dec } => 1990.0 + (ra + dec) / 2.0,
        }
    }

    pub fn julian_date(&self) -> JulianDate {
        JulianDate::from_julian_epoch(self.julian_year())
    }
}

/// Everything the transformer needs from one catalog row.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub ra_deg: f64,
    pub dec_deg: f64,
    pub pm_ra: f64,
    pub pm_dec: f64,
    pub parallax: f64,
    pub epoch: SourceEpoch,
}

fn omitted_if_zero(value: f64) -> Option<f64> {
    (value != 0.0).then_some(value)
}

pub struct EpochTransformer<A: Astrometry = EarthAstrometry> {
    astrometry: A,
    target: JulianDate,
}

impl EpochTransformer<EarthAstrometry> {
    pub fn new() -> Self {
        Self::with_astrometry(EarthAstrometry::new())
    }
}

impl Default for EpochTransformer<EarthAstrometry> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Astrometry> EpochTransformer<A> {
    pub fn with_astrometry(astrometry: A) -> Self {
        Self {
            astrometry,
            target: JulianDate::j2000(),
        }
    }

    /// Astrometric `(ra_deg, dec_deg)` seen from Earth at J2000.0.
    ///
    /// Zero proper motion or parallax is treated as unknown and left out of
    /// the star model.
    pub fn to_standard_epoch(&self, observation: &Observation) -> CatalogResult<(f64, f64)> {
        let star = StarModel::new(
            observation.ra_deg,
            observation.dec_deg,
            observation.epoch.julian_date(),
        )?
        .with_proper_motion(
            omitted_if_zero(observation.pm_ra),
            omitted_if_zero(observation.pm_dec),
        )
        .with_parallax(omitted_if_zero(observation.parallax));

        Ok(self.astrometry.astrometric_radec(&star, &self.target)?)
    }
}
