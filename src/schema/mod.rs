//! Column set and Arrow schema of the climber profile table.

pub mod columns;
pub mod compat;

pub use columns::{Column, Metric, profile_schema};
pub use compat::{IssueKind, SchemaCompatibilityReport, SchemaIssue, check_compatibility};
