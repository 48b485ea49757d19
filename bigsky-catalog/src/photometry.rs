//! Numeric field parsing and Tycho photometry.
//!
//! Catalog text is rounded as it is read: positions and magnitudes keep four
//! decimals, Hipparcos parallaxes and proper motions two.

use std::num::ParseFloatError;

/// Rounds half away from zero to `places` decimals.
pub fn round_value(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (value * scale).round() / scale
}

/// Blank or absent text is `None`; anything else must parse as a float.
pub fn round_field(raw: Option<&str>, places: u32) -> Result<Option<f64>, ParseFloatError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse::<f64>().map(|v| Some(round_value(v, places))),
    }
}

/// Approximate Johnson `(B-V, V)` from Tycho BT and VT:
///
/// ```text
/// V   = VT - 0.090 (BT - VT)
/// B-V = 0.850 (BT - VT)
/// ```
///
/// With one band missing there is no colour, and the magnitude is whichever
/// band is present.
pub fn photometric_transform(bt: Option<f64>, vt: Option<f64>) -> (Option<f64>, Option<f64>) {
    match (bt, vt) {
        (Some(bt), Some(vt)) => {
            let diff = bt - vt;
            (Some(0.850 * diff), Some(vt - 0.090 * diff))
        }
        (bt, vt) => (None, vt.or(bt)),
    }
}
