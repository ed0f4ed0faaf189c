//! In-memory profile store

use arrow::record_batch::RecordBatch;

use super::ProfileStore;
use crate::collections::{CohortTable, profiles_to_batch};
use crate::error::Result;
use crate::models::ClimberProfile;

/// Store holding profiles in memory, optionally pre-seeded with external batches
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    seeded: Vec<RecordBatch>,
    profiles: Vec<ClimberProfile>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing record batches, which may use any schema
    #[must_use]
    pub fn with_batches(batches: Vec<RecordBatch>) -> Self {
        Self {
            seeded: batches,
            profiles: Vec::new(),
        }
    }

    /// Profiles appended so far, excluding seeded batches
    #[must_use]
    pub fn profiles(&self) -> &[ClimberProfile] {
        &self.profiles
    }
}

impl ProfileStore for InMemoryStore {
    fn append(&mut self, profile: &ClimberProfile) -> Result<()> {
        self.profiles.push(profile.clone());
        Ok(())
    }

    fn fetch_all(&self) -> Result<CohortTable> {
        let mut batches = self.seeded.clone();
        if !self.profiles.is_empty() {
            batches.push(profiles_to_batch(&self.profiles)?);
        }
        Ok(CohortTable::new(batches))
    }
}
