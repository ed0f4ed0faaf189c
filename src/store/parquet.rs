//! Parquet-backed profile store
//!
//! Profiles live in a directory of Parquet files. Every append writes one
//! `part-NNNNNN.parquet` file holding a single-row batch in the canonical
//! schema. The file is first written under a `.tmp` name and renamed into
//! place once complete, so a reader never sees a partial part.
//!
//! Reads accept every `*.parquet` file in the directory, including files
//! written by other tools with other schemas; their columns are read through
//! the cast-on-access rules of [`CohortTable`]. A file that cannot be read
//! at all is skipped with a warning.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, info, warn};
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::ProfileStore;
use crate::collections::{CohortTable, profiles_to_batch};
use crate::config::RankConfig;
use crate::error::util::{ensure_directory, safe_create_file, safe_open_file};
use crate::error::{ClimbRankError, Result};
use crate::models::ClimberProfile;
use crate::schema::{Column, check_compatibility};

const PART_PREFIX: &str = "part-";
const PARQUET_EXTENSION: &str = "parquet";
const TMP_EXTENSION: &str = "tmp";

/// Directory of Parquet part files
#[derive(Debug)]
pub struct ParquetStore {
    dir: PathBuf,
    batch_size: usize,
    next_part: usize,
}

impl ParquetStore {
    /// Open (creating if needed) the store at `dir`
    ///
    /// # Errors
    /// Fails if `dir` cannot be created, is not a directory or cannot be listed.
    pub fn open(dir: impl Into<PathBuf>, batch_size: usize) -> Result<Self> {
        let dir = dir.into();
        if batch_size == 0 {
            return Err(ClimbRankError::InvalidConfig(
                "batch size must be at least 1".to_string(),
            ));
        }
        ensure_directory(&dir, "profile store")?;

        let next_part = list_entries(&dir)?
            .iter()
            .filter_map(|path| part_index(path))
            .max()
            .map_or(0, |max| max + 1);

        info!(
            "Opened profile store at {} (next part {next_part})",
            dir.display()
        );

        Ok(Self {
            dir,
            batch_size,
            next_part,
        })
    }

    /// Open the store described by `config`
    pub fn open_with_config(config: &RankConfig) -> Result<Self> {
        Self::open(config.store_dir.clone(), config.batch_size)
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Every readable Parquet file in the store, sorted by file name
    pub fn part_files(&self) -> Result<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = list_entries(&self.dir)?
            .into_iter()
            .filter(|path| path.is_file() && has_extension(path, PARQUET_EXTENSION))
            .collect();
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    /// Remove `.tmp` files left by interrupted appends and close the store
    ///
    /// Returns the number of files removed.
    pub fn close(self) -> Result<usize> {
        let mut removed = 0;
        for path in list_entries(&self.dir)? {
            if path.is_file() && has_extension(&path, TMP_EXTENSION) {
                fs::remove_file(&path).map_err(|e| {
                    ClimbRankError::io("Failed to remove temporary part file", &path, e)
                })?;
                warn!("Removed incomplete part file {}", path.display());
                removed += 1;
            }
        }
        info!(
            "Closed profile store at {} ({removed} temporary files removed)",
            self.dir.display()
        );
        Ok(removed)
    }

    fn read_part(&self, path: &Path) -> Result<Vec<arrow::record_batch::RecordBatch>> {
        let file = safe_open_file(path, "reading stored profiles")?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

        let report = check_compatibility(builder.schema());
        for issue in &report.issues {
            if report.compatible {
                debug!("Schema difference in {}: {issue}", path.display());
            } else {
                warn!("Schema issue in {}: {issue}", path.display());
            }
        }
        if !report.issues.is_empty() {
            info!(
                "{} of {} columns readable in {}",
                report.readable_columns().len(),
                Column::ALL.len(),
                path.display()
            );
        }

        let reader = builder.with_batch_size(self.batch_size).build()?;
        let mut batches = Vec::new();
        for batch in reader {
            batches.push(batch?);
        }
        Ok(batches)
    }

    fn part_path(&self, index: usize) -> PathBuf {
        self.dir
            .join(format!("{PART_PREFIX}{index:06}.{PARQUET_EXTENSION}"))
    }

    fn tmp_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!(
            "{PART_PREFIX}{index:06}.{PARQUET_EXTENSION}.{TMP_EXTENSION}"
        ))
    }
}

impl ProfileStore for ParquetStore {
    fn append(&mut self, profile: &ClimberProfile) -> Result<()> {
        let batch = profiles_to_batch(std::slice::from_ref(profile))?;

        // leftover temporaries keep their index so `close` can sweep them
        while self.part_path(self.next_part).exists() || self.tmp_path(self.next_part).exists() {
            self.next_part += 1;
        }
        let target = self.part_path(self.next_part);
        let tmp = self.tmp_path(self.next_part);

        let file = safe_create_file(&tmp, "writing a profile")?;
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
        writer.write(&batch)?;
        writer.close()?;

        fs::rename(&tmp, &target)
            .map_err(|e| ClimbRankError::io("Failed to move part file into place", &target, e))?;

        info!(
            "Stored profile for grade {} in {}",
            profile.grade(),
            target.display()
        );
        self.next_part += 1;
        Ok(())
    }

    /// Read every part file; unreadable files are logged and skipped
    fn fetch_all(&self) -> Result<CohortTable> {
        let start = Instant::now();
        info!("Reading profile store {}", self.dir.display());

        let mut batches = Vec::new();
        let mut skipped = 0;
        for path in self.part_files()? {
            match self.read_part(&path) {
                Ok(part) => batches.extend(part),
                Err(e) => {
                    warn!("Skipping unreadable file {}: {e}", path.display());
                    skipped += 1;
                }
            }
        }

        let table = CohortTable::new(batches);
        info!(
            "Read {} rows from {} in {:?} ({skipped} files skipped)",
            table.num_rows(),
            self.dir.display(),
            start.elapsed()
        );
        Ok(table)
    }
}

fn list_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| ClimbRankError::io("Failed to list profile store", dir, e))?;

    entries
        .map(|entry| {
            entry
                .map(|e| e.path())
                .map_err(|e| ClimbRankError::io("Failed to read store entry", dir, e))
        })
        .collect()
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}

/// Index of a `part-NNNNNN.parquet` file, `None` for any other name
fn part_index(path: &Path) -> Option<usize> {
    if !has_extension(path, PARQUET_EXTENSION) {
        return None;
    }
    path.file_stem()?
        .to_str()?
        .strip_prefix(PART_PREFIX)?
        .parse()
        .ok()
}
