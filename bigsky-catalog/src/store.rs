//! SQLite catalog store.
//!
//! Opening a store drops and recreates the `star`, `deep_sky_object` and
//! `double_star` tables, so every build starts from an empty schema. Stars
//! are buffered and written one transaction per batch.

use crate::dso::DeepSkyObject;
use crate::emit::StarSink;
use crate::record::CanonicalStarRecord;
use crate::wds::DoubleStar;
use crate::CatalogResult;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const STARS_DB: &str = "bigsky.db";
pub const STARS_MAG11_DB: &str = "bigsky.mag11.db";

pub const DEFAULT_BATCH_SIZE: usize = 1000;

const SCHEMA_SQL: &str = "
DROP TABLE IF EXISTS star;
DROP TABLE IF EXISTS deep_sky_object;
DROP TABLE IF EXISTS double_star;

CREATE TABLE star (
    id INTEGER PRIMARY KEY,
    tyc_id TEXT NOT NULL,
    hip_id INTEGER,
    ccdm TEXT,
    magnitude REAL NOT NULL,
    bv REAL,
    ra REAL NOT NULL,
    dec REAL NOT NULL,
    pm_ra REAL NOT NULL,
    pm_dec REAL NOT NULL,
    parallax REAL NOT NULL,
    name TEXT,
    hd_id INTEGER,
    bayer TEXT,
    flamsteed INTEGER,
    constellation TEXT
);
CREATE INDEX idx_star_hip_id ON star(hip_id);

CREATE TABLE deep_sky_object (
    id INTEGER PRIMARY KEY,
    designation TEXT NOT NULL,
    name TEXT,
    ra REAL NOT NULL,
    dec REAL NOT NULL,
    type TEXT NOT NULL,
    magnitude_bt REAL,
    magnitude_vt REAL,
    major_ax REAL,
    minor_ax REAL,
    pos_angle REAL,
    ngc INTEGER,
    ic INTEGER,
    m INTEGER
);

CREATE TABLE double_star (
    id INTEGER PRIMARY KEY,
    wds_id TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    ra REAL NOT NULL,
    dec REAL NOT NULL,
    hip_id INTEGER
);
";

const INSERT_STAR: &str = "INSERT INTO star
    (tyc_id, hip_id, ccdm, magnitude, bv, ra, dec, pm_ra, pm_dec, parallax,
     name, hd_id, bayer, flamsteed, constellation)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)";

const INSERT_DSO: &str = "INSERT INTO deep_sky_object
    (designation, name, ra, dec, type, magnitude_bt, magnitude_vt,
     major_ax, minor_ax, pos_angle, ngc, ic, m)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)";

const INSERT_DOUBLE: &str = "INSERT INTO double_star (wds_id, name, ra, dec, hip_id)
    VALUES (?1, ?2, ?3, ?4, ?5)";

pub struct SqliteStore {
    conn: Connection,
    path: PathBuf,
    batch_size: usize,
    pending: Vec<CanonicalStarRecord>,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and resets its schema.
    pub fn open(path: &Path, batch_size: usize) -> CatalogResult<Self> {
        let conn = Connection::open(path)?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        debug!(path = %path.display(), journal_mode = %mode, "opened catalog database");
        conn.execute_batch(SCHEMA_SQL)?;

        let batch_size = batch_size.max(1);
        Ok(Self {
            conn,
            path: path.to_path_buf(),
            batch_size,
            pending: Vec::with_capacity(batch_size),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush_stars(&mut self) -> CatalogResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(INSERT_STAR)?;
            for star in &self.pending {
                let extras = star.extras.clone().unwrap_or_default();
                stmt.execute(params![
                    star.tyc_id,
                    star.hip_id,
                    star.ccdm,
                    star.magnitude,
                    star.bv,
                    star.ra_deg,
                    star.dec_deg,
                    star.pm_ra,
                    star.pm_dec,
                    star.parallax,
                    extras.name,
                    extras.hd_id,
                    extras.bayer,
                    extras.flamsteed,
                    extras.constellation,
                ])?;
            }
        }
        tx.commit()?;
        debug!(rows = self.pending.len(), "flushed star batch");
        self.pending.clear();
        Ok(())
    }

    pub fn insert_deep_sky_objects(&self, objects: &[DeepSkyObject]) -> CatalogResult<usize> {
        for chunk in objects.chunks(self.batch_size) {
            let tx = self.conn.unchecked_transaction()?;
            {
                let mut stmt = tx.prepare_cached(INSERT_DSO)?;
                for dso in chunk {
                    let name = (!dso.common_names.is_empty()).then(|| dso.common_names.join(", "));
                    stmt.execute(params![
                        dso.designation,
                        name,
                        dso.ra_deg,
                        dso.dec_deg,
                        dso.object_type,
                        dso.magnitude_b,
                        dso.magnitude_v,
                        dso.major_axis,
                        dso.minor_axis,
                        dso.position_angle,
                        dso.ngc,
                        dso.ic,
                        dso.messier,
                    ])?;
                }
            }
            tx.commit()?;
        }
        Ok(objects.len())
    }

    pub fn insert_double_stars(&self, stars: &[DoubleStar]) -> CatalogResult<usize> {
        for chunk in stars.chunks(self.batch_size) {
            let tx = self.conn.unchecked_transaction()?;
            {
                let mut stmt = tx.prepare_cached(INSERT_DOUBLE)?;
                for star in chunk {
                    stmt.execute(params![star.wds_id, star.name, star.ra_deg, star.dec_deg, star.hip_id])?;
                }
            }
            tx.commit()?;
        }
        Ok(stars.len())
    }

    fn count(&self, table: &str) -> CatalogResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        let n: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(n as u64)
    }

    pub fn star_count(&self) -> CatalogResult<u64> {
        self.count("star")
    }

    pub fn deep_sky_count(&self) -> CatalogResult<u64> {
        self.count("deep_sky_object")
    }

    pub fn double_star_count(&self) -> CatalogResult<u64> {
        self.count("double_star")
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl StarSink for SqliteStore {
    fn write_star(&mut self, record: &CanonicalStarRecord) -> CatalogResult<()> {
        self.pending.push(record.clone());
        if self.pending.len() >= self.batch_size {
            self.flush_stars()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> CatalogResult<()> {
        self.flush_stars()
    }
}
