//! Astrometric model for bigsky: where a catalog star appears at another
//! epoch.
//!
//! ```
//! use bigsky_coords::{Astrometry, EarthAstrometry, StarModel};
//! use bigsky_core::JulianDate;
//!
//! let star = StarModel::new(1.1256, 2.2674, JulianDate::from_julian_epoch(1990.0))
//!     .unwrap()
//!     .with_proper_motion(Some(27.7), Some(-0.5));
//! let (ra, dec) = EarthAstrometry::new()
//!     .astrometric_radec(&star, &JulianDate::j2000())
//!     .unwrap();
//! assert!((ra - 1.1256).abs() < 1e-3);
//! assert!((dec - 2.2674).abs() < 1e-3);
//! ```

pub mod astrometry;
pub mod errors;
pub mod observer;
pub mod star;

pub use astrometry::{Astrometry, EarthAstrometry};
pub use errors::{CoordError, CoordResult};
pub use observer::{Barycenter, LowPrecisionEarth, Observer};
pub use star::StarModel;
