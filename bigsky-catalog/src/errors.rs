//! Error type for catalog ingestion.
//!
//! | Variant | Meaning | Handling |
//! |---------|---------|----------|
//! | [`IdentifierFormat`](CatalogError::IdentifierFormat) | TYC or HIP text that cannot be normalized | row error |
//! | [`InvalidField`](CatalogError::InvalidField) | non-numeric text in a numeric column | row error |
//! | [`ShortRow`](CatalogError::ShortRow) | fewer columns than the layout needs | row error |
//! | [`MissingMagnitude`](CatalogError::MissingMagnitude) | neither band nor reference magnitude | row error |
//! | [`RowParse`](CatalogError::RowParse) | row error carrying its file and ordinal | fatal for reference files |
//! | [`FatalIngest`](CatalogError::FatalIngest) | too many row errors in the primary pass | aborts the run |
//!
//! Rows without a position are not errors; they come back as
//! [`Reconciled::NoPosition`](crate::reconcile::Reconciled::NoPosition).

use bigsky_coords::CoordError;
use bigsky_core::AstroError;
use std::path::PathBuf;
use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid identifier '{raw}': {message}")]
    IdentifierFormat { raw: String, message: String },

    #[error("Invalid value '{value}' in field {field}")]
    InvalidField { field: &'static str, value: String },

    #[error("Row has {found} fields, expected at least {expected}")]
    ShortRow { expected: usize, found: usize },

    #[error("No magnitude available for TYC {tyc_id}")]
    MissingMagnitude { tyc_id: String },

    #[error("{source_name} row {row}: {source}")]
    RowParse {
        source_name: String,
        row: u64,
        #[source]
        source: Box<CatalogError>,
    },

    #[error("Aborting {pass}: {errors} row errors exceed the limit of {limit}")]
    FatalIngest {
        pass: &'static str,
        errors: u64,
        limit: u64,
    },

    #[error("Missing column '{column}' in {source_name}")]
    MissingColumn { column: String, source_name: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Coord(#[from] CoordError),

    #[error(transparent)]
    Astro(#[from] AstroError),
}

impl CatalogError {
    pub fn identifier_format(raw: &str, message: impl Into<String>) -> Self {
        Self::IdentifierFormat {
            raw: raw.to_string(),
            message: message.into(),
        }
    }

    pub fn invalid_field(field: &'static str, value: &str) -> Self {
        Self::InvalidField {
            field,
            value: value.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Attaches the file name and 1-based row ordinal to a row error.
    pub fn at_row(self, source_name: &str, row: u64) -> Self {
        Self::RowParse {
            source_name: source_name.to_string(),
            row,
            source: Box::new(self),
        }
    }
}
