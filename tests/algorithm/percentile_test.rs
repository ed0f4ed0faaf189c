//! Tests for percentile ranking against grade cohorts

use std::sync::Arc;

use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use climb_rank::algorithm::percentile::{
    AnalysisReport, MetricOutcome, PercentileAnalyzer, Tier, TierThresholds, analyze,
};
use climb_rank::models::{SyntheticConfig, generate_profiles};
use climb_rank::{CohortTable, Metric};

use crate::utils::{profile_with, pull_up};

fn table(profiles: &[climb_rank::ClimberProfile]) -> CohortTable {
    CohortTable::from_profiles(profiles).unwrap()
}

#[test]
fn test_worked_example() {
    let stored = table(&[
        pull_up("V5", 5.0),
        pull_up("V5", 8.0),
        pull_up("V5", 10.0),
        pull_up("V5", 15.0),
        pull_up("V3", 1.0),
    ]);

    let report = analyze(&pull_up("V5", 10.0), &stored);
    assert_eq!(report.cohort_size(), 4);

    let result = report.result(Metric::PullUpStrength).unwrap();
    assert_eq!(
        result.outcome,
        MetricOutcome::Ranked {
            percentile: 50.0,
            tier: Tier::Mid
        }
    );
    assert_eq!(
        result.to_string(),
        "Pull-Up Strength (kg): 50th percentile."
    );
}

#[test]
fn test_unknown_grade_has_no_results() {
    let stored = table(&[pull_up("V5", 5.0)]);
    let report = analyze(&pull_up("V9", 5.0), &stored);

    assert_eq!(
        report,
        AnalysisReport::NoCohortData {
            grade: "V9".to_string()
        }
    );
    assert!(report.metrics().is_empty());
    assert_eq!(report.to_string(), "No data found for climbers with grade V9.");
}

#[test]
fn test_empty_table() {
    let report = analyze(&pull_up("V5", 5.0), &CohortTable::empty());
    assert!(matches!(report, AnalysisReport::NoCohortData { .. }));
}

#[test]
fn test_grade_match_is_exact() {
    let stored = table(&[pull_up("v5", 5.0), pull_up("V5 ", 5.0)]);
    let report = analyze(&pull_up("V5", 5.0), &stored);
    assert!(matches!(report, AnalysisReport::NoCohortData { .. }));
}

#[test]
fn test_every_metric_in_order() {
    let stored = table(&[pull_up("V4", 10.0)]);
    let report = analyze(&pull_up("V4", 10.0), &stored);

    let metrics: Vec<Metric> = report.metrics().iter().map(|r| r.metric).collect();
    assert_eq!(metrics, Metric::ALL.to_vec());

    let text = report.to_string();
    assert!(text.starts_with("Analysis for climbers with grade V4:\n"));
    assert_eq!(text.lines().count(), 10);
}

#[test]
fn test_extremes_and_tiers() {
    let stored = table(&[
        pull_up("V6", 10.0),
        pull_up("V6", 20.0),
        pull_up("V6", 30.0),
    ]);

    let lowest = analyze(&pull_up("V6", 10.0), &stored);
    let low = lowest.result(Metric::PullUpStrength).unwrap();
    assert_eq!(low.outcome.displayed_percentile(), Some(0));
    assert_eq!(low.outcome.tier(), Some(Tier::NeedsImprovement));
    assert_eq!(
        low.to_string(),
        "Pull-Up Strength (kg): Bottom 0th percentile. Focus on improving."
    );

    let highest = analyze(&pull_up("V6", 31.0), &stored);
    let high = highest.result(Metric::PullUpStrength).unwrap();
    assert_eq!(high.outcome.displayed_percentile(), Some(100));
    assert_eq!(high.outcome.tier(), Some(Tier::Excellent));
    assert_eq!(
        high.to_string(),
        "Pull-Up Strength (kg): Top 100th percentile. Excellent work!"
    );

    // 2 of 3 below: 66.67, shown truncated
    let mid = analyze(&pull_up("V6", 25.0), &stored);
    assert_eq!(
        mid.result(Metric::PullUpStrength).unwrap().to_string(),
        "Pull-Up Strength (kg): 66th percentile."
    );
}

#[test]
fn test_negative_power_endurance() {
    let stored = table(&[
        profile_with("V1", |m| m.power_endurance = -4.0),
        profile_with("V1", |m| m.power_endurance = -1.0),
        profile_with("V1", |m| m.power_endurance = 3.0),
        profile_with("V1", |m| m.power_endurance = 6.0),
    ]);
    let report = analyze(&profile_with("V1", |m| m.power_endurance = -2.0), &stored);
    let result = report.result(Metric::PowerEndurance).unwrap();
    assert_eq!(result.outcome.displayed_percentile(), Some(25));
}

#[test]
fn test_missing_cells_and_columns() {
    let schema = Schema::new(vec![
        Field::new("Hardest Grade", DataType::Utf8, true),
        Field::new("Pull-Up Strength (kg)", DataType::Float64, true),
        Field::new("Endurance (min)", DataType::Float64, true),
    ]);
    let batch = RecordBatch::try_new(
        Arc::new(schema),
        vec![
            Arc::new(StringArray::from(vec!["V2", "V2", "V2"])),
            Arc::new(Float64Array::from(vec![Some(4.0), None, Some(12.0)])),
            Arc::new(Float64Array::from(vec![None, Some(f64::NAN), None])),
        ],
    )
    .unwrap();
    let stored = CohortTable::new(vec![batch]);

    let report = analyze(&pull_up("V2", 8.0), &stored);
    assert_eq!(report.cohort_size(), 3);

    // one of two present values is below
    let pull = report.result(Metric::PullUpStrength).unwrap();
    assert_eq!(pull.outcome.displayed_percentile(), Some(50));

    // present column, but nothing usable in it
    let endurance = report.result(Metric::Endurance).unwrap();
    assert_eq!(endurance.outcome, MetricOutcome::InsufficientData);

    // column absent
    let core = report.result(Metric::CoreStrength).unwrap();
    assert_eq!(core.outcome, MetricOutcome::InsufficientData);
    assert_eq!(
        core.to_string(),
        "Core Strength (min): Insufficient data for analysis."
    );
}

#[test]
fn test_custom_thresholds() {
    let stored = table(&[
        pull_up("V3", 1.0),
        pull_up("V3", 2.0),
        pull_up("V3", 3.0),
        pull_up("V3", 4.0),
    ]);
    let analyzer = PercentileAnalyzer::new(TierThresholds::new(75.0, 25.0).unwrap());

    let top = analyzer.analyze(&pull_up("V3", 4.0), &stored);
    assert_eq!(
        top.result(Metric::PullUpStrength).unwrap().outcome.tier(),
        Some(Tier::Excellent)
    );

    let bottom = analyzer.analyze(&pull_up("V3", 2.0), &stored);
    assert_eq!(
        bottom.result(Metric::PullUpStrength).unwrap().outcome.tier(),
        Some(Tier::NeedsImprovement)
    );
}

#[test]
fn test_percentiles_stay_in_range() {
    let profiles = generate_profiles(&SyntheticConfig {
        count: 60,
        seed: Some(7),
        ..SyntheticConfig::default()
    })
    .unwrap();
    let stored = table(&profiles);

    for profile in &profiles {
        let report = analyze(profile, &stored);
        assert!(report.cohort_size() >= 1);
        for result in report.metrics() {
            if let MetricOutcome::Ranked { percentile, .. } = result.outcome {
                assert!((0.0..=100.0).contains(&percentile));
            }
        }
    }
}

#[test]
fn test_analysis_leaves_inputs_untouched() {
    let profiles = vec![pull_up("V5", 5.0), pull_up("V5", 9.0)];
    let stored = table(&profiles);
    let probe = pull_up("V5", 7.0);

    let first = analyze(&probe, &stored);
    let second = analyze(&probe, &stored);

    assert_eq!(first, second);
    assert_eq!(stored.to_profiles().unwrap(), profiles);
    assert_eq!(probe, pull_up("V5", 7.0));
}
