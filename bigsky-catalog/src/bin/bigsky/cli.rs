//! CLI argument definitions for bigsky

use bigsky_catalog::config::{
    BuildConfig, BUILD_PATH_ENV, DATA_PATH_ENV, DEFAULT_BUILD_PATH, DEFAULT_DATA_PATH,
    DEFAULT_PRIMARY_ERROR_LIMIT,
};
use bigsky_catalog::emit::DEFAULT_MAG_LIMIT;
use bigsky_catalog::store::DEFAULT_BATCH_SIZE;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bigsky")]
#[command(about = "Builds the Big Sky star and deep-sky catalog")]
#[command(version)]
pub struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write bigsky.stars.csv and bigsky.stars.mag11.csv
    Stars(BuildArgs),

    /// Write bigsky.db and bigsky.mag11.db with stars, deep-sky objects and double stars
    Database(BuildArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Raw catalog tree (tycho-2/, tycho-1/, ongc/, wds/, ...)
    #[arg(long, env = DATA_PATH_ENV, default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Output directory
    #[arg(long, env = BUILD_PATH_ENV, default_value = DEFAULT_BUILD_PATH)]
    pub build: PathBuf,

    /// Add name, HD, Bayer, Flamsteed and constellation columns
    #[arg(long, env = "BIG_SKY_EXTENDED")]
    pub extended: bool,

    /// Row errors tolerated in the Tycho-2 main pass before aborting
    #[arg(long, env = "BIG_SKY_ERROR_LIMIT", default_value_t = DEFAULT_PRIMARY_ERROR_LIMIT)]
    pub error_limit: u64,

    /// Faintest magnitude written to the mag11 output
    #[arg(long, env = "BIG_SKY_MAG_LIMIT", default_value_t = DEFAULT_MAG_LIMIT)]
    pub mag_limit: f64,

    /// Rows per SQLite transaction
    #[arg(long, env = "BIG_SKY_BATCH_SIZE", default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,
}

impl BuildArgs {
    pub fn to_config(&self) -> BuildConfig {
        BuildConfig::new(&self.data, &self.build)
            .with_extended(self.extended)
            .with_error_limit(self.error_limit)
            .with_mag_limit(self.mag_limit)
            .with_batch_size(self.batch_size)
    }
}
