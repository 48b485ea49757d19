pub const J2000_JD: f64 = 2451545.0;

pub const J2000_EPOCH_YEAR: f64 = 2000.0;

/// Epoch of the Hipparcos and Tycho astrometry.
pub const J1991_25_EPOCH_YEAR: f64 = 1991.25;

pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

pub const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;

/// Length of the tropical year at B1900, in days.
#[allow(clippy::excessive_precision)]
pub const DAYS_PER_TROPICAL_YEAR: f64 = 365.242198781;

pub const MJD_ZERO_POINT: f64 = 2_400_000.5;

/// MJD of the Besselian epoch B1900.0.
pub const B1900_MJD: f64 = 15019.81352;

#[allow(clippy::excessive_precision)]
pub const ARCSEC_TO_RAD: f64 = 4.848136811095359935899141e-6;

#[allow(clippy::excessive_precision)]
pub const MILLIARCSEC_TO_RAD: f64 = 4.848136811095359935899141e-9;

#[allow(clippy::excessive_precision)]
pub const DEG_TO_RAD: f64 = 1.745329251994329576923691e-2;

#[allow(clippy::excessive_precision)]
pub const RAD_TO_DEG: f64 = 57.29577951308232087679815;

pub const HOURS_TO_DEG: f64 = 15.0;

/// Speed of light in AU per day.
#[allow(clippy::excessive_precision)]
pub const SPEED_OF_LIGHT_AU_PER_DAY: f64 = 173.1446326846693;

/// Mean obliquity of the ecliptic at J2000.0 (IAU 1980), in arcseconds.
pub const OBLIQUITY_J2000_ARCSEC: f64 = 84381.448;

/// Parallax used for stars without a usable measurement: 1 Gpc.
pub const FALLBACK_PARALLAX_MAS: f64 = 1.0e-6;
