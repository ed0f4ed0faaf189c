//! Utilities for working with Arrow arrays.
//!
//! Helpers for extracting columns from record batches in their canonical type,
//! casting where the stored type differs.

use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::compute::{can_cast_types, cast};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use log::{debug, warn};

use crate::error::{ClimbRankError, Result};

/// Get a column from a record batch, cast to the expected type
///
/// # Arguments
///
/// * `batch` - The record batch containing the column
/// * `column_name` - The name of the column to extract
/// * `expected_type` - The expected data type for the column
/// * `required` - Whether the column is required (error if missing or unusable)
///   or optional (`None` if missing or unusable)
///
/// # Returns
///
/// * `Ok(Some(ArrayRef))` - The column array (converted if necessary) if found
/// * `Ok(None)` - If the column is not usable and `required` is false
/// * `Err` - If the column is not usable and `required` is true
pub fn get_column(
    batch: &RecordBatch,
    column_name: &str,
    expected_type: &DataType,
    required: bool,
) -> Result<Option<ArrayRef>> {
    let Ok(idx) = batch.schema().index_of(column_name) else {
        if required {
            return Err(ClimbRankError::Schema(format!(
                "Column '{column_name}' not found"
            )));
        }
        debug!("Column '{column_name}' not found in record batch");
        return Ok(None);
    };

    let column = batch.column(idx);
    let actual_type = column.data_type();

    if actual_type == expected_type {
        return Ok(Some(column.clone()));
    }

    if !can_cast_types(actual_type, expected_type) {
        return unusable(
            column_name,
            format!("cannot convert {actual_type:?} to {expected_type:?}"),
            required,
        );
    }

    debug!("Converting column '{column_name}' from {actual_type:?} to {expected_type:?}");
    match cast(column, expected_type) {
        Ok(converted) => Ok(Some(converted)),
        Err(err) => unusable(
            column_name,
            format!("failed to convert {actual_type:?} to {expected_type:?}: {err}"),
            required,
        ),
    }
}

fn unusable(column_name: &str, reason: String, required: bool) -> Result<Option<ArrayRef>> {
    if required {
        Err(ClimbRankError::Schema(format!(
            "Column '{column_name}': {reason}"
        )))
    } else {
        warn!("Ignoring column '{column_name}': {reason}");
        Ok(None)
    }
}

/// Downcast a column to a specific array type with clear error messages
///
/// # Type Parameters
///
/// * `A` - The target array type to downcast to
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    expected_type_name: &str,
) -> Result<&'a A> {
    array.as_any().downcast_ref::<A>().ok_or_else(|| {
        ClimbRankError::Schema(format!(
            "Column '{column_name}' is not a {expected_type_name} array"
        ))
    })
}

/// Optional `f64` cells of a float column; nulls and NaN become `None`
pub fn float_cells(array: &Float64Array) -> impl Iterator<Item = Option<f64>> + '_ {
    array.iter().map(|v| v.filter(|x| !x.is_nan()))
}

/// Optional string cells of a string column
pub fn string_cells(array: &StringArray) -> impl Iterator<Item = Option<&str>> + '_ {
    array.iter()
}
