//! Tabular collections of stored profiles

pub mod cohort;

pub use cohort::{CohortTable, profiles_to_batch};
