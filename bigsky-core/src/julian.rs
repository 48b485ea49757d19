use crate::constants::{
    B1900_MJD, DAYS_PER_JULIAN_YEAR, DAYS_PER_TROPICAL_YEAR, J2000_EPOCH_YEAR, J2000_JD,
    MJD_ZERO_POINT,
};
use std::fmt;

/// Two-part Julian Date on the TT scale.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JulianDate {
    pub jd1: f64,
    pub jd2: f64,
}

impl JulianDate {
    pub fn new(jd1: f64, jd2: f64) -> Self {
        Self { jd1, jd2 }
    }

    pub fn j2000() -> Self {
        Self::new(J2000_JD, 0.0)
    }

    /// Julian epoch such as J1991.25: `2451545.0 + (year - 2000) * 365.25`.
    pub fn from_julian_epoch(year: f64) -> Self {
        Self::new(J2000_JD, (year - J2000_EPOCH_YEAR) * DAYS_PER_JULIAN_YEAR)
    }

    /// Besselian epoch such as B1875.0, used by the constellation boundaries.
    pub fn from_besselian_epoch(year: f64) -> Self {
        Self::new(
            MJD_ZERO_POINT,
            B1900_MJD + (year - 1900.0) * DAYS_PER_TROPICAL_YEAR,
        )
    }

    pub fn to_f64(&self) -> f64 {
        self.jd1 + self.jd2
    }

    pub fn add_days(&self, days: f64) -> Self {
        Self::new(self.jd1, self.jd2 + days)
    }

    /// Days from `other` to `self`.
    pub fn days_since(&self, other: &Self) -> f64 {
        (self.jd1 - other.jd1) + (self.jd2 - other.jd2)
    }
}

impl fmt::Display for JulianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.9}", self.to_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_j2000_epoch() {
        assert_eq!(JulianDate::j2000().to_f64(), J2000_JD);
        assert_eq!(JulianDate::from_julian_epoch(2000.0).to_f64(), J2000_JD);
    }

    #[test]
    fn test_hipparcos_epoch() {
        let jd = JulianDate::from_julian_epoch(1991.25);
        assert_eq!(jd.to_f64(), 2448349.0625);
    }

    #[test]
    fn test_b1875() {
        let jd = JulianDate::from_besselian_epoch(1875.0);
        assert!((jd.to_f64() - 2405889.258550475).abs() < 1e-6);
    }

    #[test]
    fn test_days_since() {
        let a = JulianDate::from_julian_epoch(1990.0);
        let b = JulianDate::j2000();
        assert!((b.days_since(&a) - 3652.5).abs() < 1e-9);
        assert_eq!(a.add_days(3652.5).to_f64(), b.to_f64());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let original = JulianDate::from_julian_epoch(1991.25);
        let json = serde_json::to_string(&original).unwrap();
        let back: JulianDate = serde_json::from_str(&json).unwrap();
        assert_eq!(original, back);
    }
}
