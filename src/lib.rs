//! A Rust library for ranking climber strength profiles against stored
//! profiles of the same grade, backed by Parquet files.

pub mod algorithm;
pub mod collections;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod schema;
pub mod store;
pub mod utils;
pub mod workflow;

// Re-export the most common types for easier use
// Core types
pub use config::RankConfig;
pub use error::{ClimbRankError, Result};
pub use models::{ClimberProfile, ProfileMetrics};
pub use schema::{Column, Metric, SchemaCompatibilityReport, SchemaIssue};

// Analysis
pub use algorithm::percentile::{
    AnalysisReport, MetricOutcome, MetricResult, PercentileAnalyzer, Tier, TierThresholds,
    analyze,
};
pub use collections::CohortTable;

// Storage and workflow
pub use store::{InMemoryStore, ParquetStore, ProfileStore, fetch_or_empty};
pub use workflow::RankingSession;

// Arrow types
pub use arrow::record_batch::RecordBatch;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
