//! Sexagesimal angle parsing.
//!
//! Two notations appear in the source catalogs:
//!
//! ```text
//! Colon-separated:  00:07:15.84   +27:42:29.1
//! Packed (WDS):     000006.64+752859.8
//! ```
//!
//! All parsers return decimal degrees. A leading sign applies to the whole
//! value, so `-00:30:00` is -0.5°.

use crate::constants::HOURS_TO_DEG;
use crate::errors::{AstroError, AstroResult};
use once_cell::sync::Lazy;
use regex::Regex;

static COLON_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-])?(\d{1,3}):(\d{1,2}):(\d{1,2}(?:\.\d*)?)\s*$")
        .expect("colon angle pattern is valid")
});

static PACKED_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d{2})(\d{2})(\d{2}(?:\.\d*)?)\s*([+-])(\d{2})(\d{2})(\d{2}(?:\.\d*)?)\s*$")
        .expect("packed angle pattern is valid")
});

/// `hh:mm:ss.s` right ascension to degrees.
pub fn parse_hms(s: &str) -> AstroResult<f64> {
    let (sign, h, m, sec) = split_colon(s)?;
    if sign < 0.0 {
        return Err(AstroError::invalid_angle(s, "right ascension cannot be negative"));
    }
    if h >= 24.0 {
        return Err(AstroError::invalid_angle(s, "hours out of range"));
    }
    Ok(sexagesimal(h, m, sec) * HOURS_TO_DEG)
}

/// `±dd:mm:ss.s` declination to degrees.
pub fn parse_dms(s: &str) -> AstroResult<f64> {
    let (sign, d, m, sec) = split_colon(s)?;
    let value = sexagesimal(d, m, sec);
    if value > 90.0 {
        return Err(AstroError::invalid_angle(s, "declination beyond the pole"));
    }
    Ok(sign * value)
}

/// Packed `hhmmss.ss±ddmmss.s` pair to `(ra_deg, dec_deg)`.
pub fn parse_packed_radec(s: &str) -> AstroResult<(f64, f64)> {
    let caps = PACKED_REGEX
        .captures(s)
        .ok_or_else(|| AstroError::invalid_angle(s, "expected hhmmss.ss+ddmmss.s"))?;

    let field = |i: usize| -> AstroResult<f64> {
        caps[i]
            .parse::<f64>()
            .map_err(|e| AstroError::invalid_angle(s, &e.to_string()))
    };

    let (h, rm, rs) = (field(1)?, field(2)?, field(3)?);
    let (d, dm, ds) = (field(5)?, field(6)?, field(7)?);
    check_minutes_seconds(s, rm, rs)?;
    check_minutes_seconds(s, dm, ds)?;
    if h >= 24.0 {
        return Err(AstroError::invalid_angle(s, "hours out of range"));
    }

    let sign = if &caps[4] == "-" { -1.0 } else { 1.0 };
    Ok((
        sexagesimal(h, rm, rs) * HOURS_TO_DEG,
        sign * sexagesimal(d, dm, ds),
    ))
}

fn split_colon(s: &str) -> AstroResult<(f64, f64, f64, f64)> {
    let caps = COLON_REGEX
        .captures(s)
        .ok_or_else(|| AstroError::invalid_angle(s, "expected [+-]xx:mm:ss.s"))?;

    let sign = match caps.get(1).map(|m| m.as_str()) {
        Some("-") => -1.0,
        _ => 1.0,
    };
    let parse = |i: usize| -> AstroResult<f64> {
        caps[i]
            .parse::<f64>()
            .map_err(|e| AstroError::invalid_angle(s, &e.to_string()))
    };
    let (whole, minutes, seconds) = (parse(2)?, parse(3)?, parse(4)?);
    check_minutes_seconds(s, minutes, seconds)?;

    Ok((sign, whole, minutes, seconds))
}

fn check_minutes_seconds(s: &str, minutes: f64, seconds: f64) -> AstroResult<()> {
    if minutes >= 60.0 || seconds >= 60.0 {
        return Err(AstroError::invalid_angle(s, "minutes or seconds out of range"));
    }
    Ok(())
}

#[inline]
fn sexagesimal(whole: f64, minutes: f64, seconds: f64) -> f64 {
    whole + minutes / 60.0 + seconds / 3600.0
}
