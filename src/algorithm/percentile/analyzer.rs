//! Percentile analyzer
//!
//! Ranks each metric of a profile against the stored profiles of the same
//! grade. The analyzer never fails: an empty cohort, an absent column or a
//! column without values are outcomes of the report, not errors.

use log::debug;
use smallvec::SmallVec;

use super::report::{AnalysisReport, MetricOutcome, MetricResult};
use super::tier::TierThresholds;
use crate::collections::CohortTable;
use crate::models::ClimberProfile;
use crate::schema::Metric;

/// Share of present cells strictly below `value`, as 0..=100
///
/// Missing cells are ignored entirely. Returns `None` when no cell is present.
#[must_use]
pub fn percentile_rank<I>(cells: I, value: f64) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (below, present) = cells
        .into_iter()
        .flatten()
        .fold((0usize, 0usize), |(below, present), cell| {
            (below + usize::from(cell < value), present + 1)
        });

    if present == 0 {
        None
    } else {
        Some(below as f64 / present as f64 * 100.0)
    }
}

/// Ranks profiles against their grade cohort
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentileAnalyzer {
    thresholds: TierThresholds,
}

impl PercentileAnalyzer {
    /// Create an analyzer with the given tier thresholds
    #[must_use]
    pub const fn new(thresholds: TierThresholds) -> Self {
        Self { thresholds }
    }

    /// Rank every metric of `profile` within the rows of `table` sharing its grade
    #[must_use]
    pub fn analyze(&self, profile: &ClimberProfile, table: &CohortTable) -> AnalysisReport {
        let grade = profile.grade();
        let cohort = table.cohort(grade);

        if cohort.is_empty() {
            debug!("No cohort rows for grade {grade} among {} rows", table.num_rows());
            return AnalysisReport::NoCohortData {
                grade: grade.to_string(),
            };
        }

        let metrics: SmallVec<[MetricResult; 9]> = Metric::ALL
            .into_iter()
            .map(|metric| MetricResult {
                metric,
                outcome: self.rank_metric(&cohort, metric, profile.metric(metric)),
            })
            .collect();

        AnalysisReport::Ranked {
            grade: grade.to_string(),
            cohort_size: cohort.num_rows(),
            metrics,
        }
    }

    /// Rank a single value against the cohort column of `metric`
    #[must_use]
    pub fn rank_metric(&self, cohort: &CohortTable, metric: Metric, value: f64) -> MetricOutcome {
        let Some(cells) = cohort.numeric_column(metric.column()) else {
            debug!("{metric}: column absent from cohort");
            return MetricOutcome::InsufficientData;
        };

        match percentile_rank(cells, value) {
            Some(percentile) => {
                let tier = self.thresholds.classify(percentile);
                debug!("{metric}: value {value} ranks at {percentile:.2} ({tier})");
                MetricOutcome::Ranked { percentile, tier }
            }
            None => {
                debug!("{metric}: every cohort value is missing");
                MetricOutcome::InsufficientData
            }
        }
    }
}

/// Analyze with the default 90/10 thresholds
#[must_use]
pub fn analyze(profile: &ClimberProfile, table: &CohortTable) -> AnalysisReport {
    PercentileAnalyzer::default().analyze(profile, table)
}
