//! Tests for the submit-and-rank workflow

use std::fs;
use std::io;

use climb_rank::algorithm::percentile::AnalysisReport;
use climb_rank::{
    ClimbRankError, ClimberProfile, CohortTable, InMemoryStore, Metric, ParquetStore,
    ProfileStore, RankingSession, Result, fetch_or_empty,
};

use crate::utils::pull_up;

/// Store that fails on demand
#[derive(Debug, Default)]
struct FailingStore {
    fail_append: bool,
    fail_fetch: bool,
    appended: usize,
}

impl ProfileStore for FailingStore {
    fn append(&mut self, _profile: &ClimberProfile) -> Result<()> {
        if self.fail_append {
            return Err(ClimbRankError::io(
                "Store unavailable",
                "/unavailable",
                io::Error::other("disk full"),
            ));
        }
        self.appended += 1;
        Ok(())
    }

    fn fetch_all(&self) -> Result<CohortTable> {
        if self.fail_fetch {
            return Err(ClimbRankError::Schema("unreadable".to_string()));
        }
        Ok(CohortTable::empty())
    }
}

#[test]
fn test_append_failure_aborts() {
    let store = FailingStore {
        fail_append: true,
        ..FailingStore::default()
    };
    let mut session = RankingSession::with_store(store);

    let err = session.submit(&pull_up("V5", 10.0)).unwrap_err();
    assert!(matches!(err, ClimbRankError::Io { .. }));
    assert_eq!(session.store().appended, 0);
}

#[test]
fn test_fetch_failure_degrades_to_no_data() {
    let store = FailingStore {
        fail_fetch: true,
        ..FailingStore::default()
    };
    let mut session = RankingSession::with_store(store);

    let report = session.submit(&pull_up("V5", 10.0)).unwrap();
    assert_eq!(
        report,
        AnalysisReport::NoCohortData {
            grade: "V5".to_string()
        }
    );
    assert_eq!(session.into_store().appended, 1);
    assert!(fetch_or_empty(&FailingStore {
        fail_fetch: true,
        ..FailingStore::default()
    })
    .is_empty());
}

#[test]
fn test_submissions_build_the_cohort() {
    let mut session = RankingSession::with_store(InMemoryStore::new());
    for kg in [5.0, 8.0, 15.0] {
        session.submit(&pull_up("V5", kg)).unwrap();
    }

    let report = session.submit(&pull_up("V5", 10.0)).unwrap();
    assert_eq!(report.cohort_size(), 4);
    assert_eq!(
        report
            .result(Metric::PullUpStrength)
            .unwrap()
            .outcome
            .displayed_percentile(),
        Some(50)
    );
}

#[test]
fn test_parquet_session_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let store = ParquetStore::open(dir.path(), 64).unwrap();
    let mut session = RankingSession::with_store(store);

    session.submit(&pull_up("V7", 30.0)).unwrap();
    let report = session.submit(&pull_up("V7", 40.0)).unwrap();
    assert_eq!(report.cohort_size(), 2);

    let compared = session.compare(&pull_up("V7", 35.0));
    assert_eq!(compared.cohort_size(), 2);

    let store = session.into_store();
    assert_eq!(store.fetch_all().unwrap().num_rows(), 2);
    assert_eq!(store.close().unwrap(), 0);
}

#[test]
fn test_corrupt_file_in_store_keeps_cohort() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = RankingSession::with_store(ParquetStore::open(dir.path(), 64).unwrap());
    for kg in [5.0, 8.0, 15.0] {
        session.submit(&pull_up("V5", kg)).unwrap();
    }
    fs::write(dir.path().join("export.parquet"), b"").unwrap();

    let report = session.submit(&pull_up("V5", 10.0)).unwrap();
    assert_eq!(report.cohort_size(), 4);
    assert_eq!(
        report
            .result(Metric::PullUpStrength)
            .unwrap()
            .outcome
            .displayed_percentile(),
        Some(50)
    );
}
