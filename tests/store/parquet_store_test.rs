//! Tests for the Parquet-backed profile store

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use climb_rank::algorithm::percentile::{MetricOutcome, analyze};
use climb_rank::{Metric, ParquetStore, ProfileMetrics, ProfileStore, RankConfig};
use parquet::arrow::ArrowWriter;

use crate::utils::{profile_with, pull_up};

/// Write a file the store did not create: integer pull-ups, no other metrics
fn write_foreign_file(path: &Path) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Hardest Grade", DataType::Utf8, true),
        Field::new("Pull-Up Strength (kg)", DataType::Int64, true),
    ]));
    let batch = RecordBatch::try_new(
        Arc::clone(&schema),
        vec![
            Arc::new(StringArray::from(vec!["V5", "V5", "V3"])),
            Arc::new(Int64Array::from(vec![8, 10, 99])),
        ],
    )
    .unwrap();

    let file = File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}

#[test]
fn test_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ParquetStore::open(dir.path(), 64).unwrap();

    let metrics = ProfileMetrics {
        pull_up_strength: 22.5,
        crimp_20mm_strength: 18.0,
        crimp_10mm_strength: 7.5,
        pinch_grip_strength: 12.0,
        endurance: 3.5,
        power_endurance: -2.0,
        hamstring_flexibility: 9.0,
        hip_flexibility: 31.0,
        core_strength: 2.5,
    };
    let profile = climb_rank::ClimberProfile::new("V5", metrics, 181.5, 72.3).unwrap();
    store.append(&profile).unwrap();

    let table = store.fetch_all().unwrap();
    assert_eq!(table.num_rows(), 1);

    let decoded = table.to_profiles().unwrap();
    assert_eq!(decoded, vec![profile.clone()]);
    assert_eq!(decoded[0].cells(), profile.cells());
}

#[test]
fn test_appends_are_visible_and_numbered() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ParquetStore::open(dir.path(), 64).unwrap();
    assert!(store.fetch_all().unwrap().is_empty());

    store.append(&pull_up("V4", 10.0)).unwrap();
    store.append(&pull_up("V4", 12.0)).unwrap();
    assert_eq!(store.fetch_all().unwrap().num_rows(), 2);
    store.close().unwrap();

    // numbering continues after a reopen
    let mut reopened = ParquetStore::open(dir.path(), 64).unwrap();
    reopened.append(&pull_up("V6", 30.0)).unwrap();
    assert!(dir.path().join("part-000002.parquet").exists());

    let names: Vec<String> = reopened
        .part_files()
        .unwrap()
        .iter()
        .filter_map(|p| p.file_name()?.to_str().map(str::to_string))
        .collect();
    assert_eq!(
        names,
        vec![
            "part-000000.parquet",
            "part-000001.parquet",
            "part-000002.parquet"
        ]
    );
    assert_eq!(
        reopened.fetch_all().unwrap().grade_counts(),
        vec![("V4".to_string(), 2), ("V6".to_string(), 1)]
    );
}

#[test]
fn test_small_batch_size_reads_every_row() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ParquetStore::open(dir.path(), 1).unwrap();
    for kg in [1.0, 2.0, 3.0] {
        store.append(&pull_up("V2", kg)).unwrap();
    }
    assert_eq!(store.fetch_all().unwrap().num_rows(), 3);
}

#[test]
fn test_temporary_files_are_ignored_and_removed() {
    let dir = tempfile::tempdir().unwrap();
    let stray = dir.path().join("part-000000.parquet.tmp");
    fs::write(&stray, b"interrupted").unwrap();

    let mut store = ParquetStore::open(dir.path(), 64).unwrap();
    store.append(&pull_up("V1", 4.0)).unwrap();
    assert_eq!(store.fetch_all().unwrap().num_rows(), 1);

    // the leftover keeps its index, the append moves past it
    assert!(stray.exists());
    assert!(dir.path().join("part-000001.parquet").exists());
    assert!(!dir.path().join("part-000000.parquet").exists());

    assert_eq!(store.close().unwrap(), 1);
    assert!(!stray.exists());
    assert!(dir.path().join("part-000001.parquet").exists());
}

#[test]
fn test_unreadable_file_does_not_hide_other_parts() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ParquetStore::open(dir.path(), 64).unwrap();
    for kg in [5.0, 8.0, 15.0] {
        store.append(&pull_up("V5", kg)).unwrap();
    }
    fs::write(dir.path().join("export.parquet"), b"").unwrap();
    fs::write(dir.path().join("zz-garbage.parquet"), b"not parquet at all").unwrap();

    let table = store.fetch_all().unwrap();
    assert_eq!(table.num_rows(), 3);

    let report = analyze(&pull_up("V5", 10.0), &table);
    assert_eq!(report.cohort_size(), 3);
    assert_eq!(
        report.result(Metric::PullUpStrength).unwrap().outcome.displayed_percentile(),
        Some(66)
    );
}

#[test]
fn test_foreign_files_use_cast_and_missing_rules() {
    let dir = tempfile::tempdir().unwrap();
    write_foreign_file(&dir.path().join("legacy.parquet"));

    let mut store = ParquetStore::open(dir.path(), 64).unwrap();
    store
        .append(&profile_with("V5", |m| {
            m.pull_up_strength = 5.0;
            m.crimp_20mm_strength = 5.0;
        }))
        .unwrap();
    store
        .append(&profile_with("V5", |m| {
            m.pull_up_strength = 15.0;
            m.crimp_20mm_strength = 15.0;
        }))
        .unwrap();

    let table = store.fetch_all().unwrap();
    assert_eq!(table.num_rows(), 5);

    let probe = profile_with("V5", |m| {
        m.pull_up_strength = 10.0;
        m.crimp_20mm_strength = 10.0;
    });
    let report = analyze(&probe, &table);
    assert_eq!(report.cohort_size(), 4);

    // cohort pull-ups: 8, 10 (cast from integers), 5, 15
    let pull = report.result(Metric::PullUpStrength).unwrap();
    assert_eq!(pull.outcome.displayed_percentile(), Some(50));

    // foreign rows lack the crimp column and leave the denominator
    let crimp = report.result(Metric::Crimp20mm).unwrap();
    assert_eq!(crimp.outcome.displayed_percentile(), Some(50));

    // foreign rows cannot be decoded into full profiles
    assert!(table.to_profiles().is_err());
}

#[test]
fn test_column_absent_from_every_file() {
    let dir = tempfile::tempdir().unwrap();
    write_foreign_file(&dir.path().join("legacy.parquet"));
    let store = ParquetStore::open(dir.path(), 64).unwrap();

    let report = analyze(&pull_up("V5", 9.0), &store.fetch_all().unwrap());
    assert_eq!(
        report.result(Metric::PullUpStrength).unwrap().outcome.displayed_percentile(),
        Some(50)
    );
    assert_eq!(
        report.result(Metric::CoreStrength).unwrap().outcome,
        MetricOutcome::InsufficientData
    );
}

#[test]
fn test_open_with_config_creates_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("data").join("profiles");
    let config = RankConfig::default().with_store_dir(&nested);

    let store = ParquetStore::open_with_config(&config).unwrap();
    assert!(nested.is_dir());
    assert_eq!(store.dir(), nested.as_path());
    assert_eq!(store.batch_size(), config.batch_size);
}

#[test]
fn test_open_rejects_a_file_path() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("not-a-dir");
    fs::write(&file, b"x").unwrap();
    assert!(ParquetStore::open(&file, 64).is_err());
}
