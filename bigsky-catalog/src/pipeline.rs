//! End-to-end catalog builds.
//!
//! A run loads the reference tables, then streams the Tycho-2 main chunks
//! (`tyc2.dat.00`, `tyc2.dat.01`, ...) followed by supplement 1 through the
//! reconciler into an [`Emitter`]. The database build also loads OpenNGC and
//! WDS into both stores.

use crate::config::BuildConfig;
use crate::constellation::ConstellationMap;
use crate::dso::{load_ongc, DsoStats};
use crate::emit::{CsvStarSink, Emitter, StarSink, STARS_CSV, STARS_MAG11_CSV};
use crate::epoch::EpochTransformer;
use crate::names::{CommonNames, CrossIndex};
use crate::reconcile::{reconcile_supplement, reconcile_tycho2_main, Reconciled, ReferenceData};
use crate::reference::ReferenceTable;
use crate::store::{SqliteStore, STARS_DB, STARS_MAG11_DB};
use crate::tycho2::{Tycho2MainRow, Tycho2SupplementRow};
use crate::wds::{load_wds, WdsStats};
use crate::{CatalogError, CatalogResult};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const TYCHO2_DIR: &str = "tycho-2";
pub const TYCHO1_DIR: &str = "tycho-1";
pub const SUPPLEMENT_FILE: &str = "suppl_1.dat";
const MAIN_PREFIX: &str = "tyc2.dat.";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassStats {
    pub read: u64,
    pub emitted: u64,
    /// Emitted records that also passed the magnitude limit.
    pub secondary: u64,
    pub no_position: u64,
    pub errors: u64,
}

impl PassStats {
    fn add(&mut self, other: &PassStats) {
        self.read += other.read;
        self.emitted += other.emitted;
        self.secondary += other.secondary;
        self.no_position += other.no_position;
        self.errors += other.errors;
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunSummary {
    pub primary: PassStats,
    pub supplement: PassStats,
    pub deep_sky: Option<DsoStats>,
    pub double_stars: Option<WdsStats>,
    pub outputs: Vec<PathBuf>,
}

impl RunSummary {
    pub fn total(&self) -> PassStats {
        let mut total = self.primary;
        total.add(&self.supplement);
        total
    }
}

/// Numbered Tycho-2 main chunks in `dir`, in name order.
pub fn discover_main_files(dir: &Path) -> CatalogResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| CatalogError::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CatalogError::io(dir, e))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        let is_chunk = name
            .strip_prefix(MAIN_PREFIX)
            .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()));
        if is_chunk {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Loads every lookup table a star pass reads.
pub fn build_reference_data(config: &BuildConfig) -> CatalogResult<ReferenceData> {
    let astrometry = ReferenceTable::load_dir(&config.data_dir(TYCHO1_DIR))?;

    let (names, cross_index, constellations) = if config.extended {
        (
            CommonNames::load_optional(&config.data_dir("names").join("common_names.csv"))?,
            CrossIndex::load_optional(&config.data_dir("cross-index").join("catalog.dat"))?,
            ConstellationMap::load_optional(&config.data_dir("constellations").join("boundaries.dat"))?,
        )
    } else {
        (CommonNames::default(), CrossIndex::default(), None)
    };

    info!(
        references = astrometry.len(),
        names = names.len(),
        cross_index = cross_index.len(),
        extended = config.extended,
        "reference data loaded"
    );
    Ok(ReferenceData {
        astrometry,
        names,
        cross_index,
        constellations,
        extended: config.extended,
    })
}

struct Pass<'a> {
    name: &'static str,
    files: &'a [PathBuf],
    error_limit: Option<u64>,
}

fn run_pass<P, S, F>(pass: Pass<'_>, emitter: &mut Emitter<P, S>, mut reconcile_line: F) -> CatalogResult<PassStats>
where
    P: StarSink,
    S: StarSink,
    F: FnMut(&str) -> CatalogResult<Reconciled>,
{
    let mut stats = PassStats::default();
    for path in pass.files {
        let file = File::open(path).map_err(|e| CatalogError::io(path, e))?;
        info!(pass = pass.name, file = %path.display(), "reading");

        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| CatalogError::io(path, e))?;
            if line.trim().is_empty() {
                continue;
            }
            stats.read += 1;

            match reconcile_line(&line) {
                Ok(Reconciled::Record(record)) => {
                    stats.emitted += 1;
                    if emitter.emit(&record)? {
                        stats.secondary += 1;
                    }
                }
                Ok(Reconciled::NoPosition) => stats.no_position += 1,
                Err(e) => {
                    stats.errors += 1;
                    warn!(pass = pass.name, row = stats.read, error = %e, "row failed");
                    if let Some(limit) = pass.error_limit {
                        if stats.errors > limit {
                            return Err(CatalogError::FatalIngest {
                                pass: pass.name,
                                errors: stats.errors,
                                limit,
                            });
                        }
                    }
                }
            }
        }
    }

    info!(
        pass = pass.name,
        read = stats.read,
        emitted = stats.emitted,
        secondary = stats.secondary,
        no_position = stats.no_position,
        errors = stats.errors,
        "pass complete"
    );
    Ok(stats)
}

/// Streams every Tycho-2 row into `emitter` and finishes both sinks.
pub fn build_stars<P: StarSink, S: StarSink>(
    config: &BuildConfig,
    refs: &ReferenceData,
    mut emitter: Emitter<P, S>,
) -> CatalogResult<(RunSummary, P, S)> {
    let tycho2 = config.data_dir(TYCHO2_DIR);
    let main_files = discover_main_files(&tycho2)?;
    if main_files.is_empty() {
        warn!(dir = %tycho2.display(), "no Tycho-2 main files found");
    }
    let transformer = EpochTransformer::new();

    let primary = run_pass(
        Pass {
            name: "tycho2-main",
            files: &main_files,
            error_limit: Some(config.primary_error_limit),
        },
        &mut emitter,
        |line| {
            let row = Tycho2MainRow::parse(line)?;
            reconcile_tycho2_main(&row, refs, &transformer)
        },
    )?;

    let supplement_path = tycho2.join(SUPPLEMENT_FILE);
    let supplement_files: Vec<PathBuf> = if supplement_path.is_file() {
        vec![supplement_path]
    } else {
        warn!(path = %supplement_path.display(), "Tycho-2 supplement not found");
        Vec::new()
    };
    let supplement = run_pass(
        Pass {
            name: "tycho2-supplement",
            files: &supplement_files,
            error_limit: None,
        },
        &mut emitter,
        |line| {
            let row = Tycho2SupplementRow::parse(line)?;
            reconcile_supplement(&row, refs, &transformer)
        },
    )?;

    let (primary_sink, secondary_sink) = emitter.finish()?;
    let summary = RunSummary {
        primary,
        supplement,
        ..Default::default()
    };
    Ok((summary, primary_sink, secondary_sink))
}

fn prepare_build_dir(config: &BuildConfig) -> CatalogResult<()> {
    fs::create_dir_all(config.build_dir()).map_err(|e| CatalogError::io(config.build_dir(), e))
}

/// Writes `bigsky.stars.csv` and `bigsky.stars.mag11.csv`.
pub fn run_csv(config: &BuildConfig) -> CatalogResult<RunSummary> {
    prepare_build_dir(config)?;
    let refs = build_reference_data(config)?;

    let outputs = vec![config.output(STARS_CSV), config.output(STARS_MAG11_CSV)];
    let emitter = Emitter::with_mag_limit(
        CsvStarSink::create(&outputs[0], config.extended)?,
        CsvStarSink::create(&outputs[1], config.extended)?,
        config.mag_limit,
    );

    let (mut summary, _, _) = build_stars(config, &refs, emitter)?;
    summary.outputs = outputs;
    log_summary(&summary);
    Ok(summary)
}

/// Writes `bigsky.db` and `bigsky.mag11.db`. Deep-sky objects and double
/// stars go to both databases.
pub fn run_database(config: &BuildConfig) -> CatalogResult<RunSummary> {
    prepare_build_dir(config)?;
    let refs = build_reference_data(config)?;

    let outputs = vec![config.output(STARS_DB), config.output(STARS_MAG11_DB)];
    let emitter = Emitter::with_mag_limit(
        SqliteStore::open(&outputs[0], config.batch_size)?,
        SqliteStore::open(&outputs[1], config.batch_size)?,
        config.mag_limit,
    );
    let (mut summary, full, bright) = build_stars(config, &refs, emitter)?;

    let (objects, dso_stats) = load_ongc(&config.data_dir("ongc"))?;
    let (doubles, wds_stats) = load_wds(&config.data_dir("wds"))?;
    for store in [&full, &bright] {
        store.insert_deep_sky_objects(&objects)?;
        store.insert_double_stars(&doubles)?;
        info!(
            path = %store.path().display(),
            stars = store.star_count()?,
            deep_sky = store.deep_sky_count()?,
            double_stars = store.double_star_count()?,
            "database written"
        );
    }

    summary.deep_sky = Some(dso_stats);
    summary.double_stars = Some(wds_stats);
    summary.outputs = outputs;
    log_summary(&summary);
    Ok(summary)
}

fn log_summary(summary: &RunSummary) {
    let total = summary.total();
    info!(
        read = total.read,
        emitted = total.emitted,
        secondary = total.secondary,
        no_position = total.no_position,
        errors = total.errors,
        "catalog build complete"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_main_files_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["tyc2.dat.01", "tyc2.dat.00", "tyc2.dat.10", "suppl_1.dat", "tyc2.dat.gz", "tyc2.dat."] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        let files: Vec<String> = discover_main_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(files, vec!["tyc2.dat.00", "tyc2.dat.01", "tyc2.dat.10"]);
    }

    #[test]
    fn test_total_adds_passes() {
        let summary = RunSummary {
            primary: PassStats {
                read: 3,
                emitted: 2,
                secondary: 1,
                no_position: 1,
                errors: 0,
            },
            supplement: PassStats {
                read: 2,
                emitted: 1,
                secondary: 1,
                no_position: 0,
                errors: 1,
            },
            ..Default::default()
        };
        let total = summary.total();
        assert_eq!(total.read, 5);
        assert_eq!(total.emitted, 3);
        assert_eq!(total.secondary, 2);
        assert_eq!(total.errors, 1);
    }
}
