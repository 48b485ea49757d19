//! Observer positions in the J2000 equatorial frame.
//!
//! [`LowPrecisionEarth`] uses the Meeus low-precision solar theory: the
//! geometric Sun is computed in ecliptic coordinates and the Earth placed
//! opposite it, then rotated to the equator with the J2000 obliquity. The
//! Sun–barycentre offset (up to ~0.01 AU) is ignored, which shifts stellar
//! parallax by at most 1% and is far below the catalog precision.

use bigsky_core::constants::{ARCSEC_TO_RAD, DEG_TO_RAD, OBLIQUITY_J2000_ARCSEC};
use bigsky_core::utils::jd_to_centuries;
use bigsky_core::{JulianDate, RotationMatrix3, Vector3};

/// Something whose barycentric position can be asked for at a TT date.
pub trait Observer {
    /// Position in AU, equatorial J2000 axes.
    fn position_au(&self, at: &JulianDate) -> Vector3;
}

/// The solar system barycentre; catalog propagation without parallax.
#[derive(Debug, Clone, Copy, Default)]
pub struct Barycenter;

impl Observer for Barycenter {
    fn position_au(&self, _at: &JulianDate) -> Vector3 {
        Vector3::zeros()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LowPrecisionEarth;

impl LowPrecisionEarth {
    /// Geometric Sun as `(longitude, distance_au)`, longitude in radians
    /// referred to the mean equinox of J2000.
    fn sun_longitude_distance(t: f64) -> (f64, f64) {
        let l0 = 280.46646 + 36000.76983 * t + 0.0003032 * t * t;
        let m = (357.52911 + 35999.05029 * t - 0.0001537 * t * t) * DEG_TO_RAD;
        let e = 0.016708634 - 0.000042037 * t - 0.0000001267 * t * t;

        let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * libm::sin(m)
            + (0.019993 - 0.000101 * t) * libm::sin(2.0 * m)
            + 0.000289 * libm::sin(3.0 * m);

        // Meeus 25.7: equinox of date back to J2000
        let longitude = (l0 + c - 1.397 * t) * DEG_TO_RAD;
        let nu = m + c * DEG_TO_RAD;
        let distance = 1.000001018 * (1.0 - e * e) / (1.0 + e * libm::cos(nu));

        (longitude, distance)
    }
}

impl Observer for LowPrecisionEarth {
    fn position_au(&self, at: &JulianDate) -> Vector3 {
        let t = jd_to_centuries(at.jd1, at.jd2);
        let (sun_lon, r) = Self::sun_longitude_distance(t);

        let ecliptic = Vector3::from_spherical(sun_lon + std::f64::consts::PI, 0.0) * r;

        // ecliptic -> equatorial is Rx(-epsilon) in the passive convention
        let mut to_equator = RotationMatrix3::identity();
        to_equator.rotate_x(-OBLIQUITY_J2000_ARCSEC * ARCSEC_TO_RAD);
        to_equator * ecliptic
    }
}
