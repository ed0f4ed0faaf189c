//! Submit-and-rank workflow
//!
//! A [`RankingSession`] owns an injected store and an analyzer. Submitting a
//! profile saves it, reloads the whole table and ranks the profile within its
//! grade cohort, the profile itself included.

use log::info;

use crate::algorithm::percentile::{AnalysisReport, PercentileAnalyzer};
use crate::error::Result;
use crate::models::ClimberProfile;
use crate::store::{ProfileStore, fetch_or_empty};

#[derive(Debug)]
pub struct RankingSession<S: ProfileStore> {
    store: S,
    analyzer: PercentileAnalyzer,
}

impl<S: ProfileStore> RankingSession<S> {
    #[must_use]
    pub fn new(store: S, analyzer: PercentileAnalyzer) -> Self {
        Self { store, analyzer }
    }

    /// Session using the default thresholds
    #[must_use]
    pub fn with_store(store: S) -> Self {
        Self::new(store, PercentileAnalyzer::default())
    }

    /// Save `profile`, then rank it against everything stored
    ///
    /// # Errors
    /// Returns the store's error if the append fails; no analysis runs then.
    /// A failing reload degrades to an empty table instead.
    pub fn submit(&mut self, profile: &ClimberProfile) -> Result<AnalysisReport> {
        self.store.append(profile)?;
        info!("Saved profile for grade {}", profile.grade());
        Ok(self.compare(profile))
    }

    /// Rank `profile` against the current store contents without saving it
    #[must_use]
    pub fn compare(&self, profile: &ClimberProfile) -> AnalysisReport {
        let table = fetch_or_empty(&self.store);
        self.analyzer.analyze(profile, &table)
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
