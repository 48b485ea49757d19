//! Build configuration.

use crate::emit::DEFAULT_MAG_LIMIT;
use crate::store::DEFAULT_BATCH_SIZE;
use std::path::{Path, PathBuf};

pub const DATA_PATH_ENV: &str = "BIG_SKY_DATA_PATH";
pub const BUILD_PATH_ENV: &str = "BIG_SKY_BUILD_PATH";

pub const DEFAULT_DATA_PATH: &str = "raw";
pub const DEFAULT_BUILD_PATH: &str = "build";

/// Maximum tolerated row errors in the Tycho-2 main pass.
pub const DEFAULT_PRIMARY_ERROR_LIMIT: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    /// Root of the raw input tree (`tycho-2/`, `tycho-1/`, `ongc/`, ...).
    pub data_path: PathBuf,
    pub build_path: PathBuf,
    pub primary_error_limit: u64,
    pub mag_limit: f64,
    pub batch_size: usize,
    pub extended: bool,
}

impl BuildConfig {
    pub fn new(data_path: impl Into<PathBuf>, build_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            build_path: build_path.into(),
            primary_error_limit: DEFAULT_PRIMARY_ERROR_LIMIT,
            mag_limit: DEFAULT_MAG_LIMIT,
            batch_size: DEFAULT_BATCH_SIZE,
            extended: false,
        }
    }

    /// Paths from `BIG_SKY_DATA_PATH` / `BIG_SKY_BUILD_PATH`, falling back
    /// to `raw` and `build`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self::new(
            path(DATA_PATH_ENV, DEFAULT_DATA_PATH),
            path(BUILD_PATH_ENV, DEFAULT_BUILD_PATH),
        )
    }

    pub fn with_extended(mut self, extended: bool) -> Self {
        self.extended = extended;
        self
    }

    pub fn with_error_limit(mut self, limit: u64) -> Self {
        self.primary_error_limit = limit;
        self
    }

    pub fn with_mag_limit(mut self, mag_limit: f64) -> Self {
        self.mag_limit = mag_limit;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn data_dir(&self, name: &str) -> PathBuf {
        self.data_path.join(name)
    }

    pub fn output(&self, file_name: &str) -> PathBuf {
        self.build_path.join(file_name)
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_path
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_PATH, DEFAULT_BUILD_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BuildConfig::from_lookup(|_| None);
        assert_eq!(config.data_path, PathBuf::from("raw"));
        assert_eq!(config.build_path, PathBuf::from("build"));
        assert_eq!(config.primary_error_limit, 10);
        assert_eq!(config.mag_limit, 11.0);
        assert_eq!(config.batch_size, 1000);
        assert!(!config.extended);
    }

    #[test]
    fn test_env_paths() {
        let config = BuildConfig::from_lookup(|key| match key {
            DATA_PATH_ENV => Some("/data/sky".into()),
            BUILD_PATH_ENV => Some("  ".into()),
            _ => None,
        });
        assert_eq!(config.data_dir("tycho-2"), PathBuf::from("/data/sky/tycho-2"));
        assert_eq!(config.build_path, PathBuf::from("build"));
    }

    #[test]
    fn test_builders() {
        let config = BuildConfig::default()
            .with_extended(true)
            .with_error_limit(0)
            .with_batch_size(0)
            .with_mag_limit(6.5);
        assert!(config.extended);
        assert_eq!(config.primary_error_limit, 0);
        assert_eq!(config.batch_size, 1);
        assert_eq!(config.output("x.csv"), PathBuf::from("build/x.csv"));
    }
}
