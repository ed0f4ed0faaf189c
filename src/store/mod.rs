//! Storage gateway for climber profiles
//!
//! A store appends validated profiles and hands back everything it holds as
//! a [`CohortTable`]. Stores are constructed explicitly and injected into a
//! [`crate::workflow::RankingSession`].

pub mod memory;
pub mod parquet;

use log::warn;

use crate::collections::CohortTable;
use crate::error::Result;
use crate::models::ClimberProfile;

pub use self::memory::InMemoryStore;
pub use self::parquet::ParquetStore;

/// Core trait for profile persistence
pub trait ProfileStore {
    /// Persist one profile so that later fetches include it
    fn append(&mut self, profile: &ClimberProfile) -> Result<()>;

    /// Snapshot of every stored row
    fn fetch_all(&self) -> Result<CohortTable>;
}

impl<S: ProfileStore + ?Sized> ProfileStore for Box<S> {
    fn append(&mut self, profile: &ClimberProfile) -> Result<()> {
        (**self).append(profile)
    }

    fn fetch_all(&self) -> Result<CohortTable> {
        (**self).fetch_all()
    }
}

/// Fetch everything from `store`, falling back to an empty table on failure
#[must_use]
pub fn fetch_or_empty(store: &dyn ProfileStore) -> CohortTable {
    match store.fetch_all() {
        Ok(table) => table,
        Err(e) => {
            warn!("Failed to fetch stored profiles ({e}), using an empty table");
            CohortTable::empty()
        }
    }
}
