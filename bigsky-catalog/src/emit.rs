//! Output of canonical star records.
//!
//! The [`Emitter`] rounds each record once and fans it out to two sinks: the
//! full catalog and a magnitude-limited subset.

use crate::delimited::join_record;
use crate::record::{header, CanonicalStarRecord};
use crate::{CatalogError, CatalogResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const STARS_CSV: &str = "bigsky.stars.csv";
pub const STARS_MAG11_CSV: &str = "bigsky.stars.mag11.csv";

/// Faintest magnitude written to the secondary sink.
pub const DEFAULT_MAG_LIMIT: f64 = 11.0;

pub trait StarSink {
    fn write_star(&mut self, record: &CanonicalStarRecord) -> CatalogResult<()>;

    /// Flushes buffered output. Called once at the end of a run.
    fn finish(&mut self) -> CatalogResult<()>;
}

pub struct CsvStarSink<W: Write> {
    writer: W,
    label: PathBuf,
    delimiter: char,
    extended: bool,
}

impl CsvStarSink<BufWriter<File>> {
    /// Creates (or truncates) `path` and writes the header row.
    pub fn create(path: &Path, extended: bool) -> CatalogResult<Self> {
        let file = File::create(path).map_err(|e| CatalogError::io(path, e))?;
        Self::new(BufWriter::new(file), path, extended)
    }
}

impl<W: Write> CsvStarSink<W> {
    pub fn new(writer: W, label: impl Into<PathBuf>, extended: bool) -> CatalogResult<Self> {
        let mut sink = Self {
            writer,
            label: label.into(),
            delimiter: ',',
            extended,
        };
        let columns = header(extended);
        sink.write_line(&columns[..])?;
        Ok(sink)
    }

    fn write_line<S: AsRef<str>>(&mut self, fields: &[S]) -> CatalogResult<()> {
        let line = join_record(fields, self.delimiter);
        writeln!(self.writer, "{}", line).map_err(|e| CatalogError::io(&self.label, e))
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> StarSink for CsvStarSink<W> {
    fn write_star(&mut self, record: &CanonicalStarRecord) -> CatalogResult<()> {
        let cells = record.to_cells(self.extended);
        self.write_line(&cells[..])
    }

    fn finish(&mut self) -> CatalogResult<()> {
        self.writer.flush().map_err(|e| CatalogError::io(&self.label, e))
    }
}

pub struct Emitter<P: StarSink, S: StarSink> {
    primary: P,
    secondary: S,
    mag_limit: f64,
}

impl<P: StarSink, S: StarSink> Emitter<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self::with_mag_limit(primary, secondary, DEFAULT_MAG_LIMIT)
    }

    pub fn with_mag_limit(primary: P, secondary: S, mag_limit: f64) -> Self {
        Self {
            primary,
            secondary,
            mag_limit,
        }
    }

    /// Writes the rounded record; returns whether it also went to the
    /// secondary sink. The limit applies to the unrounded magnitude.
    pub fn emit(&mut self, record: &CanonicalStarRecord) -> CatalogResult<bool> {
        let rounded = record.rounded();
        self.primary.write_star(&rounded)?;
        let bright = record.magnitude <= self.mag_limit;
        if bright {
            self.secondary.write_star(&rounded)?;
        }
        Ok(bright)
    }

    pub fn finish(mut self) -> CatalogResult<(P, S)> {
        self.primary.finish()?;
        self.secondary.finish()?;
        Ok((self.primary, self.secondary))
    }
}
