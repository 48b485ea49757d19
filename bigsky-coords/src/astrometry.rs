//! Astrometric positions of catalog stars.
//!
//! The astrometric direction is where the star was when the light now
//! arriving left it, seen from the observer. No aberration or light
//! deflection is applied, so the result stays in the catalog (ICRS) frame.

use crate::observer::{LowPrecisionEarth, Observer};
use crate::star::StarModel;
use crate::{CoordError, CoordResult};
use bigsky_core::constants::{RAD_TO_DEG, SPEED_OF_LIGHT_AU_PER_DAY};
use bigsky_core::utils::normalize_degrees;
use bigsky_core::{JulianDate, Vector3};

/// Produces the astrometric RA/Dec of a star at a target date.
pub trait Astrometry {
    /// `(ra_deg, dec_deg)` with RA in `[0, 360)`.
    fn astrometric_radec(&self, star: &StarModel, at: &JulianDate) -> CoordResult<(f64, f64)>;
}

/// Astrometry as seen from an [`Observer`], the Earth by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct EarthAstrometry<O: Observer = LowPrecisionEarth> {
    observer: O,
}

impl EarthAstrometry<LowPrecisionEarth> {
    pub fn new() -> Self {
        Self {
            observer: LowPrecisionEarth,
        }
    }
}

impl<O: Observer> EarthAstrometry<O> {
    pub fn with_observer(observer: O) -> Self {
        Self { observer }
    }

    /// Star position relative to the observer, AU.
    pub fn astrometric_vector(&self, star: &StarModel, at: &JulianDate) -> CoordResult<Vector3> {
        let position = star.position_au();
        let velocity = star.velocity_au_per_day();
        let observer = self.observer.position_au(at);

        let light_time = light_time_difference(&position, &observer)?;
        let delta_t = at.days_since(&star.epoch()) - light_time;

        Ok(position + velocity * delta_t - observer)
    }
}

impl<O: Observer> Astrometry for EarthAstrometry<O> {
    fn astrometric_radec(&self, star: &StarModel, at: &JulianDate) -> CoordResult<(f64, f64)> {
        let vector = self.astrometric_vector(star, at)?;
        let (ra, dec) = vector.to_spherical();
        let (ra_deg, dec_deg) = (normalize_degrees(ra * RAD_TO_DEG), dec * RAD_TO_DEG);

        if !ra_deg.is_finite() || !dec_deg.is_finite() {
            return Err(CoordError::invalid_coordinate(format!(
                "astrometric position not finite for star at ra={} dec={}",
                star.ra_deg(),
                star.dec_deg()
            )));
        }
        Ok((ra_deg, dec_deg))
    }
}

/// Days by which light from `position` reaches `observer` earlier than it
/// reaches the barycentre.
fn light_time_difference(position: &Vector3, observer: &Vector3) -> CoordResult<f64> {
    let direction = position.normalize()?;
    Ok(direction.dot(observer) / SPEED_OF_LIGHT_AU_PER_DAY)
}
