//! Cohort table
//!
//! An immutable snapshot of stored profile rows, held as Arrow record
//! batches. Batches may come from different writers: a batch can lack
//! columns, contain nulls or store numbers with another type. Accessors cast
//! to the canonical column types and expose every cell as an `Option`.

use arrow::array::{Float64Array, StringArray};
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use log::{debug, warn};
use rustc_hash::FxHashMap;

use crate::error::{ClimbRankError, Result};
use crate::filter::{BatchFilter, GradeFilter};
use crate::models::ClimberProfile;
use crate::schema::{Column, profile_schema};
use crate::utils::arrow::{downcast_array, float_cells, get_column, string_cells};

/// Read-only table of stored profiles
#[derive(Debug, Clone, Default)]
pub struct CohortTable {
    batches: Vec<RecordBatch>,
}

impl CohortTable {
    /// Wrap record batches; empty batches are dropped
    #[must_use]
    pub fn new(batches: Vec<RecordBatch>) -> Self {
        Self {
            batches: batches.into_iter().filter(|b| b.num_rows() > 0).collect(),
        }
    }

    /// A table without rows
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table in the canonical schema from profiles
    pub fn from_profiles(profiles: &[ClimberProfile]) -> Result<Self> {
        if profiles.is_empty() {
            return Ok(Self::empty());
        }
        Ok(Self::new(vec![profiles_to_batch(profiles)?]))
    }

    /// Underlying record batches
    #[must_use]
    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    /// Total number of rows
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }

    /// True if the table holds no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// True if any batch carries `column`
    #[must_use]
    pub fn has_column(&self, column: Column) -> bool {
        self.batches
            .iter()
            .any(|b| b.schema().field_with_name(column.name()).is_ok())
    }

    /// Rows whose grade equals `grade` exactly
    ///
    /// Batches without a usable grade column contribute no rows.
    #[must_use]
    pub fn cohort(&self, grade: &str) -> CohortTable {
        let filter = GradeFilter::new(grade);
        let mut batches = Vec::with_capacity(self.batches.len());

        for batch in &self.batches {
            if !filter.can_filter(batch) {
                debug!(
                    "Skipping {} rows without a '{}' column",
                    batch.num_rows(),
                    Column::HardestGrade
                );
                continue;
            }
            match filter.filter(batch) {
                Ok(filtered) => batches.push(filtered),
                Err(e) => warn!("Skipping {} rows: {e}", batch.num_rows()),
            }
        }

        CohortTable::new(batches)
    }

    /// Numeric cells of `column`, one per row
    ///
    /// Returns `None` if no batch has the column. Rows from batches without
    /// the column, nulls, NaN and uncastable values are `None` cells.
    #[must_use]
    pub fn numeric_column(&self, column: Column) -> Option<Vec<Option<f64>>> {
        if !self.has_column(column) {
            return None;
        }

        let mut cells = Vec::with_capacity(self.num_rows());
        for batch in &self.batches {
            match float_array(batch, column) {
                Some(array) => cells.extend(float_cells(&array)),
                None => cells.extend(std::iter::repeat_n(None, batch.num_rows())),
            }
        }
        Some(cells)
    }

    /// Grade of every row, `None` where missing
    #[must_use]
    pub fn grades(&self) -> Vec<Option<String>> {
        let mut grades = Vec::with_capacity(self.num_rows());
        for batch in &self.batches {
            match string_array(batch, Column::HardestGrade) {
                Some(array) => grades.extend(string_cells(&array).map(|g| g.map(str::to_string))),
                None => grades.extend(std::iter::repeat_n(None, batch.num_rows())),
            }
        }
        grades
    }

    /// Number of rows per grade, sorted by grade; rows without a grade are skipped
    #[must_use]
    pub fn grade_counts(&self) -> Vec<(String, usize)> {
        let mut counts: FxHashMap<String, usize> = FxHashMap::default();
        for grade in self.grades().into_iter().flatten() {
            *counts.entry(grade).or_insert(0) += 1;
        }
        counts.into_iter().sorted().collect()
    }

    /// Decode every row into a validated profile
    ///
    /// # Errors
    /// Fails if a column is missing or uncastable, a cell is null, or a row
    /// violates a profile invariant.
    pub fn to_profiles(&self) -> Result<Vec<ClimberProfile>> {
        let mut profiles = Vec::with_capacity(self.num_rows());
        for batch in &self.batches {
            let normalized = normalize_batch(batch)?;
            let decoded: Vec<ClimberProfile> = serde_arrow::from_record_batch(&normalized)?;
            profiles.extend(decoded);
        }
        Ok(profiles)
    }
}

/// Convert profiles to a record batch in the canonical schema
pub fn profiles_to_batch(profiles: &[ClimberProfile]) -> Result<RecordBatch> {
    let fields: Vec<arrow::datatypes::FieldRef> = profile_schema()
        .fields()
        .iter()
        .map(std::sync::Arc::clone)
        .collect();

    Ok(serde_arrow::to_record_batch(&fields, &profiles)?)
}

/// Cast every canonical column of `batch` to its canonical type, in canonical order
fn normalize_batch(batch: &RecordBatch) -> Result<RecordBatch> {
    let columns = Column::ALL
        .into_iter()
        .map(|column| {
            get_column(batch, column.name(), &column.data_type(), true)?
                .ok_or_else(|| ClimbRankError::Schema(format!("Column '{column}' not found")))
        })
        .collect::<Result<Vec<_>>>()?;

    let schema = profile_schema();
    for (column, array) in Column::ALL.iter().zip(&columns) {
        if array.null_count() > 0 {
            return Err(ClimbRankError::Schema(format!(
                "Column '{column}' has {} missing values",
                array.null_count()
            )));
        }
    }

    Ok(RecordBatch::try_new(schema, columns)?)
}

fn float_array(batch: &RecordBatch, column: Column) -> Option<Float64Array> {
    let array = get_column(batch, column.name(), &column.data_type(), false).ok()??;
    downcast_array::<Float64Array>(&array, column.name(), "Float64")
        .ok()
        .cloned()
}

fn string_array(batch: &RecordBatch, column: Column) -> Option<StringArray> {
    let array = get_column(batch, column.name(), &column.data_type(), false).ok()??;
    downcast_array::<StringArray>(&array, column.name(), "String")
        .ok()
        .cloned()
}
