//! Row filters over profile record batches

pub mod core;
pub mod grade;

pub use self::core::{BatchFilter, filter_record_batch};
pub use self::grade::GradeFilter;
