//! Analysis report and its rendering

use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;

use super::tier::Tier;
use crate::schema::Metric;

/// Result of ranking one profile against its grade cohort
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisReport {
    /// No stored row shares the profile's grade
    NoCohortData { grade: String },
    /// One result per metric, in canonical order
    Ranked {
        grade: String,
        cohort_size: usize,
        metrics: SmallVec<[MetricResult; 9]>,
    },
}

/// Outcome for a single metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricResult {
    pub metric: Metric,
    pub outcome: MetricOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MetricOutcome {
    /// Unrounded percentile in 0..=100 and its tier
    Ranked { percentile: f64, tier: Tier },
    /// The cohort column is absent or holds no values
    InsufficientData,
}

impl MetricOutcome {
    /// Percentile truncated toward zero, as shown to the user
    #[must_use]
    pub fn displayed_percentile(&self) -> Option<u32> {
        match self {
            MetricOutcome::Ranked { percentile, .. } => Some(percentile.trunc() as u32),
            MetricOutcome::InsufficientData => None,
        }
    }

    #[must_use]
    pub fn tier(&self) -> Option<Tier> {
        match self {
            MetricOutcome::Ranked { tier, .. } => Some(*tier),
            MetricOutcome::InsufficientData => None,
        }
    }
}

impl AnalysisReport {
    #[must_use]
    pub fn grade(&self) -> &str {
        match self {
            AnalysisReport::NoCohortData { grade } | AnalysisReport::Ranked { grade, .. } => grade,
        }
    }

    /// Per-metric results; empty when there was no cohort
    #[must_use]
    pub fn metrics(&self) -> &[MetricResult] {
        match self {
            AnalysisReport::NoCohortData { .. } => &[],
            AnalysisReport::Ranked { metrics, .. } => metrics.as_slice(),
        }
    }

    #[must_use]
    pub fn cohort_size(&self) -> usize {
        match self {
            AnalysisReport::NoCohortData { .. } => 0,
            AnalysisReport::Ranked { cohort_size, .. } => *cohort_size,
        }
    }

    /// Result for one metric, if ranked
    #[must_use]
    pub fn result(&self, metric: Metric) -> Option<&MetricResult> {
        self.metrics().iter().find(|r| r.metric == metric)
    }

    /// Number of metrics per tier
    #[must_use]
    pub fn tier_counts(&self) -> TierCounts {
        let mut counts = TierCounts::default();
        for result in self.metrics() {
            match result.outcome.tier() {
                Some(Tier::Excellent) => counts.excellent += 1,
                Some(Tier::Mid) => counts.mid += 1,
                Some(Tier::NeedsImprovement) => counts.needs_improvement += 1,
                None => counts.insufficient += 1,
            }
        }
        counts
    }
}

/// Tally of metric outcomes in a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub excellent: usize,
    pub mid: usize,
    pub needs_improvement: usize,
    pub insufficient: usize,
}

impl fmt::Display for TierCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} excellent, {} mid, {} needing improvement, {} without data",
            self.excellent, self.mid, self.needs_improvement, self.insufficient
        )
    }
}

/// English ordinal of `n` (1st, 2nd, 3rd, 11th, 21st)
#[must_use]
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

impl fmt::Display for MetricResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let metric = self.metric;
        match (self.outcome.tier(), self.outcome.displayed_percentile()) {
            (Some(Tier::Excellent), Some(p)) => {
                write!(f, "{metric}: Top {} percentile. Excellent work!", ordinal(p))
            }
            (Some(Tier::NeedsImprovement), Some(p)) => {
                write!(
                    f,
                    "{metric}: Bottom {} percentile. Focus on improving.",
                    ordinal(p)
                )
            }
            (Some(Tier::Mid), Some(p)) => write!(f, "{metric}: {} percentile.", ordinal(p)),
            _ => write!(f, "{metric}: Insufficient data for analysis."),
        }
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisReport::NoCohortData { grade } => {
                write!(f, "No data found for climbers with grade {grade}.")
            }
            AnalysisReport::Ranked { grade, metrics, .. } => {
                write!(f, "Analysis for climbers with grade {grade}:")?;
                for result in metrics {
                    write!(f, "\n{result}")?;
                }
                Ok(())
            }
        }
    }
}
