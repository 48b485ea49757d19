//! Numeric foundations for the bigsky catalog builder.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`constants`] | epochs, unit conversions, speed of light |
//! | [`matrix`] | [`Vector3`] and [`RotationMatrix3`] |
//! | [`julian`] | two-part Julian dates, Julian and Besselian epochs |
//! | [`precession`] | IAU 1976 precession between equinoxes |
//! | [`angle`] | sexagesimal parsing |
//!
//! Enable the `serde` feature to derive `Serialize`/`Deserialize` for the
//! value types.

pub mod angle;
pub mod constants;
pub mod errors;
pub mod julian;
pub mod matrix;
pub mod precession;
pub mod utils;

pub use errors::{AstroError, AstroResult, MathErrorKind};
pub use julian::JulianDate;
pub use matrix::{RotationMatrix3, Vector3};
