//! Configuration for the ranking store and analyzer.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::algorithm::percentile::TierThresholds;
use crate::error::{ClimbRankError, Result};

/// Default rows per record batch when reading part files
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Default location of the profile store
pub const DEFAULT_STORE_DIR: &str = "./data/climber_profiles";

pub const ENV_STORE_DIR: &str = "CLIMB_RANK_STORE_DIR";
pub const ENV_BATCH_SIZE: &str = "CLIMB_RANK_BATCH_SIZE";
pub const ENV_EXCELLENT: &str = "CLIMB_RANK_EXCELLENT_PERCENTILE";
pub const ENV_NEEDS_IMPROVEMENT: &str = "CLIMB_RANK_NEEDS_IMPROVEMENT_PERCENTILE";

/// Configuration for the profile store and percentile analyzer
#[derive(Debug, Clone, PartialEq)]
pub struct RankConfig {
    /// Directory holding the Parquet part files
    pub store_dir: PathBuf,
    /// Rows per record batch when reading
    pub batch_size: usize,
    /// Tier cut-offs
    pub thresholds: TierThresholds,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
            batch_size: DEFAULT_BATCH_SIZE,
            thresholds: TierThresholds::default(),
        }
    }
}

impl RankConfig {
    /// Defaults overridden by `CLIMB_RANK_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable name
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_STORE_DIR).filter(|d| !d.trim().is_empty()) {
            config.store_dir = PathBuf::from(dir);
        }
        if let Some(size) = parse_var::<usize, _>(&lookup, ENV_BATCH_SIZE)? {
            config.batch_size = size;
        }
        if let Some(excellent) = parse_var::<f64, _>(&lookup, ENV_EXCELLENT)? {
            config.thresholds.excellent = excellent;
        }
        if let Some(needs) = parse_var::<f64, _>(&lookup, ENV_NEEDS_IMPROVEMENT)? {
            config.thresholds.needs_improvement = needs;
        }

        config.validate()?;
        Ok(config)
    }

    /// Replace the store directory
    #[must_use]
    pub fn with_store_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.store_dir = dir.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(ClimbRankError::InvalidConfig(
                "batch size must be at least 1".to_string(),
            ));
        }
        self.thresholds.validate()
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| {
            ClimbRankError::InvalidConfig(format!("{key}={raw:?} is not valid: {e}"))
        }),
    }
}

impl fmt::Display for RankConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Store directory: {}", self.store_dir.display())?;
        writeln!(f, "Batch size: {}", self.batch_size)?;
        write!(
            f,
            "Tier thresholds: excellent >= {}, needs improvement <= {}",
            self.thresholds.excellent, self.thresholds.needs_improvement
        )
    }
}
