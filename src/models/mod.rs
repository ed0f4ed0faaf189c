//! Domain models for climber performance profiles

pub mod profile;
pub mod synthetic;

// Re-export commonly used types
pub use profile::{Cell, ClimberProfile, ProfileMetrics, ProfileRecord};
pub use synthetic::{SyntheticConfig, generate_profiles};
