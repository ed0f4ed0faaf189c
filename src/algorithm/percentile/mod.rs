//! Percentile ranking of climber profiles
//!
//! This module ranks each metric of a profile within the cohort of stored
//! profiles sharing its grade, and classifies the result into feedback tiers.

pub mod analyzer;
pub mod report;
pub mod tier;

// Re-export commonly used items
pub use analyzer::{PercentileAnalyzer, analyze, percentile_rank};
pub use report::{AnalysisReport, MetricOutcome, MetricResult, TierCounts, ordinal};
pub use tier::{Tier, TierThresholds};
