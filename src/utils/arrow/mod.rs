//! Arrow data handling utilities
//!
//! Helpers for pulling typed, optional cells out of record batches.

pub mod array_utils;

// Re-export commonly used functions for convenience
pub use array_utils::{downcast_array, float_cells, get_column, string_cells};
