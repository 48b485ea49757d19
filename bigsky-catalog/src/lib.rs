//! Consolidated J2000 star, deep-sky and double-star catalog builder.
//!
//! Tycho-2 main and supplement rows are reconciled against Hipparcos and
//! Tycho-1 reference astrometry, brought to the J2000.0 epoch, and written
//! to delimited files or SQLite databases. A second, magnitude-limited
//! output (V ≤ 11 by default) is produced alongside the full catalog.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`tycho2`] | Named-field parsing of Tycho-2 main and supplement rows |
//! | [`ids`] | TYC and HIP identifier normalization |
//! | [`reference`] | Hipparcos / Tycho-1 override table |
//! | [`names`], [`bayer`], [`constellation`] | Extended cross-identifications |
//! | [`epoch`] | Position propagation to J2000.0 |
//! | [`reconcile`] | Row → [`CanonicalStarRecord`](record::CanonicalStarRecord) |
//! | [`emit`] | [`Emitter`](emit::Emitter), [`StarSink`](emit::StarSink), CSV output |
//! | [`store`] | SQLite output |
//! | [`dso`], [`wds`] | OpenNGC and WDS loaders |
//! | [`pipeline`] | [`run_csv`](pipeline::run_csv), [`run_database`](pipeline::run_database) |
//!
//! # Quick Start
//!
//! ```ignore
//! use bigsky_catalog::{pipeline, BuildConfig};
//!
//! let config = BuildConfig::from_env().with_extended(true);
//! let summary = pipeline::run_csv(&config)?;
//! println!("{} stars written", summary.total().emitted);
//! ```
//!
//! # Features
//!
//! - **`cli`** (default): builds the `bigsky` binary.

pub mod bayer;
pub mod config;
pub mod constellation;
pub mod delimited;
pub mod dso;
pub mod emit;
pub mod epoch;
pub mod errors;
pub mod ids;
pub mod names;
pub mod photometry;
pub mod pipeline;
pub mod reconcile;
pub mod record;
pub mod reference;
pub mod store;
pub mod tycho2;
pub mod wds;

pub use config::BuildConfig;
pub use errors::{CatalogError, CatalogResult};
pub use pipeline::{run_csv, run_database, PassStats, RunSummary};
pub use record::CanonicalStarRecord;
