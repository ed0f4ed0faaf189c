//! Grade filtering
//!
//! Cuts a cohort out of a profile table: only rows whose grade equals the
//! requested grade exactly (case-sensitive, no trimming) are kept.

use std::collections::HashSet;

use arrow::array::{BooleanArray, StringArray};
use arrow::record_batch::RecordBatch;

use crate::error::{ClimbRankError, Result};
use crate::filter::core::{BatchFilter, filter_record_batch};
use crate::schema::Column;
use crate::utils::arrow::{downcast_array, get_column, string_cells};

/// A filter that includes only rows of one grade
#[derive(Debug, Clone)]
pub struct GradeFilter {
    grade: String,
}

impl GradeFilter {
    /// Create a filter for `grade`
    #[must_use]
    pub fn new(grade: impl Into<String>) -> Self {
        Self {
            grade: grade.into(),
        }
    }

    /// The grade rows must match
    #[must_use]
    pub fn grade(&self) -> &str {
        &self.grade
    }

    /// Boolean mask where true means the row's grade matches; missing grades never match
    fn create_grade_mask(&self, grades: &StringArray) -> BooleanArray {
        string_cells(grades)
            .map(|g| Some(g == Some(self.grade.as_str())))
            .collect()
    }
}

impl BatchFilter for GradeFilter {
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        let column = Column::HardestGrade;
        let array = get_column(batch, column.name(), &column.data_type(), true)?.ok_or_else(
            || ClimbRankError::Schema(format!("Column '{column}' not found")),
        )?;
        let grades = downcast_array::<StringArray>(&array, column.name(), "String")?;

        let mask = self.create_grade_mask(grades);
        filter_record_batch(batch, &mask)
    }

    fn required_columns(&self) -> HashSet<Column> {
        HashSet::from([Column::HardestGrade])
    }
}
