//! Progress indicators for the command line

pub mod progress;

// Re-export commonly used functions for convenience
pub use progress::{create_main_progress_bar, create_spinner, finish_and_clear, finish_progress_bar};
