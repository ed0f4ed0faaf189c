//! Utility functions for error handling
//!
//! Filesystem helpers that attach the path and purpose to IO failures.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{ClimbRankError, Result};

/// Safely open a file for reading with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                "Permission denied - check file permissions".to_string()
            }
            io::ErrorKind::NotFound => {
                "File not found - it may have been deleted during operation".to_string()
            }
            _ => format!("Failed to open file for: {purpose}"),
        };
        ClimbRankError::io(context, path, e)
    })
}

/// Safely create (or truncate) a file for writing with rich error information
pub fn safe_create_file(path: &Path, purpose: &str) -> Result<fs::File> {
    fs::File::create(path)
        .map_err(|e| ClimbRankError::io(format!("Failed to create file for: {purpose}"), path, e))
}

/// Check that a path exists and is a readable directory
pub fn validate_directory(path: &Path, purpose: &str) -> Result<()> {
    if !path.exists() {
        return Err(ClimbRankError::io(
            format!("Directory not found, needed for: {purpose}"),
            path,
            io::Error::from(io::ErrorKind::NotFound),
        ));
    }

    if !path.is_dir() {
        return Err(ClimbRankError::io(
            format!("Path is not a directory, expected a directory for: {purpose}"),
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
        ));
    }

    fs::read_dir(path).map(|_| ()).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                "Permission denied - check directory permissions".to_string()
            }
            _ => format!("Failed to access directory for: {purpose}"),
        };
        ClimbRankError::io(context, path, e)
    })
}

/// Create a directory (and parents) if it is missing, then validate it
pub fn ensure_directory(path: &Path, purpose: &str) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| {
            ClimbRankError::io(format!("Failed to create directory for: {purpose}"), path, e)
        })?;
    }
    validate_directory(path, purpose)
}
