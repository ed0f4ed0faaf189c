//! Algorithm implementations for climber profile analysis
//!
//! Currently holds percentile ranking against grade cohorts.

pub mod percentile;
