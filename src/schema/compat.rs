//! Schema compatibility checks against the canonical profile schema

use std::fmt;

use arrow::compute::can_cast_types;
use arrow_schema::Schema;

use super::columns::Column;

/// Result of comparing a table schema with the canonical profile schema
#[derive(Debug, Default)]
pub struct SchemaCompatibilityReport {
    /// Whether every column is present with its canonical type
    pub compatible: bool,
    /// List of incompatibility issues, if any
    pub issues: Vec<SchemaIssue>,
}

impl SchemaCompatibilityReport {
    /// Columns that can be read (present and castable to their canonical type)
    #[must_use]
    pub fn readable_columns(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|c| {
                !self
                    .issues
                    .iter()
                    .any(|i| i.column == *c && !matches!(i.kind, IssueKind::Castable { .. }))
            })
            .collect()
    }
}

/// A single schema difference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    /// Affected column
    pub column: Column,
    /// What is wrong with it
    pub kind: IssueKind,
}

/// Kind of schema difference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// The column is not in the schema; its cells read as missing
    Missing,
    /// Stored with another type that casts to the canonical one
    Castable {
        /// Type found in the file
        found: String,
    },
    /// Stored with a type that cannot be cast; its cells read as missing
    Incompatible {
        /// Type found in the file
        found: String,
    },
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::Missing => write!(f, "column '{}' is missing", self.column),
            IssueKind::Castable { found } => write!(
                f,
                "column '{}' is {found}, will be cast to {}",
                self.column,
                self.column.data_type()
            ),
            IssueKind::Incompatible { found } => write!(
                f,
                "column '{}' is {found}, cannot be read as {}",
                self.column,
                self.column.data_type()
            ),
        }
    }
}

/// Compare `schema` with the canonical profile schema
#[must_use]
pub fn check_compatibility(schema: &Schema) -> SchemaCompatibilityReport {
    let mut issues = Vec::new();

    for column in Column::ALL {
        let expected = column.data_type();
        match schema.field_with_name(column.name()) {
            Err(_) => issues.push(SchemaIssue {
                column,
                kind: IssueKind::Missing,
            }),
            Ok(field) if field.data_type() == &expected => {}
            Ok(field) => {
                let found = field.data_type().to_string();
                let kind = if can_cast_types(field.data_type(), &expected) {
                    IssueKind::Castable { found }
                } else {
                    IssueKind::Incompatible { found }
                };
                issues.push(SchemaIssue { column, kind });
            }
        }
    }

    SchemaCompatibilityReport {
        compatible: issues.is_empty(),
        issues,
    }
}
