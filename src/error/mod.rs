//! Error handling for climb-rank.

use std::io;
use std::path::{Path, PathBuf};

use arrow::error::ArrowError;
use parquet::errors::ParquetError;
use thiserror::Error;

pub mod util;

/// Specialized error type for profile validation, storage and decoding
#[derive(Debug, Error)]
pub enum ClimbRankError {
    /// A profile field violated its construction invariant
    #[error("Invalid value for '{field}': {reason}")]
    InvalidProfile {
        /// Display name of the offending column
        field: &'static str,
        /// Human readable reason
        reason: String,
    },
    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    InvalidConfig(String),
    /// Error opening, reading or writing a file
    #[error("IO error: {context} ({})", .path.display())]
    Io {
        /// What was being attempted
        context: String,
        /// Path involved in the failure
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),
    /// Error processing Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),
    /// Error converting between profiles and record batches
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Required column missing or of an unusable type
    #[error("Schema error: {0}")]
    Schema(String),
}

impl ClimbRankError {
    /// Validation error for a profile column
    pub fn invalid_profile(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidProfile {
            field,
            reason: reason.into(),
        }
    }

    /// IO error with context about the path and the attempted operation
    pub fn io(context: impl Into<String>, path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// True for errors raised by profile validation
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidProfile { .. })
    }
}

impl From<serde_arrow::Error> for ClimbRankError {
    fn from(error: serde_arrow::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

/// Result type for climb-rank operations
pub type Result<T> = std::result::Result<T, ClimbRankError>;
