//! Core filtering functionality for record batches
//!
//! Defines the `BatchFilter` trait and the mask-based filter every
//! implementation goes through.

use std::collections::HashSet;

use arrow::array::{Array, ArrayRef, BooleanArray};
use arrow::compute::filter as arrow_filter;
use arrow::record_batch::RecordBatch;

use crate::error::{ClimbRankError, Result};
use crate::schema::Column;

/// Filter a record batch based on a boolean mask
///
/// Rows where the mask is false or null are dropped.
///
/// # Errors
/// Returns an error if the mask length differs from the row count
pub fn filter_record_batch(batch: &RecordBatch, mask: &BooleanArray) -> Result<RecordBatch> {
    if batch.num_rows() != mask.len() {
        return Err(ClimbRankError::Schema(format!(
            "Mask length ({}) doesn't match batch row count ({})",
            mask.len(),
            batch.num_rows()
        )));
    }

    let filtered_columns: Vec<ArrayRef> = batch
        .columns()
        .iter()
        .map(|col| arrow_filter(col, mask))
        .collect::<std::result::Result<_, _>>()?;

    Ok(RecordBatch::try_new(batch.schema(), filtered_columns)?)
}

/// Trait for objects that can filter record batches
pub trait BatchFilter: std::fmt::Debug {
    /// Filter a record batch
    ///
    /// # Errors
    /// Returns an error if a required column is unusable or filtering fails
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch>;

    /// Columns the filter reads
    fn required_columns(&self) -> HashSet<Column>;

    /// Whether `batch` carries every column this filter reads
    fn can_filter(&self, batch: &RecordBatch) -> bool {
        let schema = batch.schema();
        self.required_columns()
            .iter()
            .all(|c| schema.field_with_name(c.name()).is_ok())
    }
}
