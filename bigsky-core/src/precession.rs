//! IAU 1976 precession (Lieske et al. 1977).
//!
//! Used to carry J2000 positions back to the B1875 equinox of the
//! constellation boundary tables. The three Euler angles ζ, z and θ are
//! polynomials in the interval between the two epochs and in the offset of
//! the starting epoch from J2000:
//!
//! | Angle | Composition |
//! |-------|-------------|
//! | ζ | first rotation about Z, `Rz(-ζ)` |
//! | θ | rotation about Y, `Ry(θ)` |
//! | z | last rotation about Z, `Rz(-z)` |
//!
//! The resulting matrix is `P = Rz(-z) · Ry(θ) · Rz(-ζ)` and rotates mean
//! equatorial vectors of the start epoch into the end epoch.

use crate::constants::{ARCSEC_TO_RAD, DAYS_PER_JULIAN_CENTURY, DEG_TO_RAD, J2000_JD, RAD_TO_DEG};
use crate::julian::JulianDate;
use crate::matrix::{RotationMatrix3, Vector3};
use crate::utils::normalize_degrees;

/// Euler angles `(zeta, z, theta)` in radians between two TT dates.
pub fn euler_angles_iau1976(from: &JulianDate, to: &JulianDate) -> (f64, f64, f64) {
    let t0 = ((from.jd1 - J2000_JD) + from.jd2) / DAYS_PER_JULIAN_CENTURY;
    let t = ((to.jd1 - from.jd1) + (to.jd2 - from.jd2)) / DAYS_PER_JULIAN_CENTURY;

    let tas2r = t * ARCSEC_TO_RAD;
    let w = 2306.2181 + (1.39656 - 0.000139 * t0) * t0;

    let zeta = (w + ((0.30188 - 0.000344 * t0) + 0.017998 * t) * t) * tas2r;
    let z = (w + ((1.09468 + 0.000066 * t0) + 0.018203 * t) * t) * tas2r;
    let theta = ((2004.3109 + (-0.85330 - 0.000217 * t0) * t0)
        + ((-0.42665 - 0.000217 * t0) - 0.041833 * t) * t)
        * tas2r;

    (zeta, z, theta)
}

pub fn precession_matrix_iau1976(from: &JulianDate, to: &JulianDate) -> RotationMatrix3 {
    let (zeta, z, theta) = euler_angles_iau1976(from, to);

    let mut matrix = RotationMatrix3::identity();
    matrix.rotate_z(-zeta);
    matrix.rotate_y(theta);
    matrix.rotate_z(-z);
    matrix
}

/// Precesses an RA/Dec pair in degrees. RA comes back in `[0, 360)`.
pub fn precess_radec(ra_deg: f64, dec_deg: f64, from: &JulianDate, to: &JulianDate) -> (f64, f64) {
    let position = Vector3::from_spherical(ra_deg * DEG_TO_RAD, dec_deg * DEG_TO_RAD);
    let precessed = precession_matrix_iau1976(from, to) * position;
    let (ra, dec) = precessed.to_spherical();
    (normalize_degrees(ra * RAD_TO_DEG), dec * RAD_TO_DEG)
}
