//! The per-session owning context.

use serde::{Deserialize, Serialize};

use crate::acquisition::{AcquisitionState, ImportError};
use crate::catalog::{Catalog, Location, Record};
use crate::constants::{ALL_RECORDS_KEY, DEFAULT_CATALOG_PATH};
use crate::rank::Rank;
use crate::storage::{StateStorage, StorageError};
use crate::views::{self, RarityGroup, RowFilter, SummaryTable};

/// Where the catalog lives and which list it holds the records under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default = "TrackerConfig::default_catalog_path")]
    pub catalog_path: String,
    #[serde(default = "TrackerConfig::default_records_key")]
    pub records_key: String,
}

impl TrackerConfig {
    fn default_catalog_path() -> String {
        DEFAULT_CATALOG_PATH.to_string()
    }

    fn default_records_key() -> String {
        ALL_RECORDS_KEY.to_string()
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            catalog_path: Self::default_catalog_path(),
            records_key: Self::default_records_key(),
        }
    }
}

/// Owns the catalog, the acquisition state and its storage. Every mutation
/// is persisted before the call returns.
pub struct Tracker<S: StateStorage> {
    catalog: Catalog,
    state: AcquisitionState,
    storage: S,
}

impl<S: StateStorage> Tracker<S> {
    /// Build a tracker, restoring the acquisition state from `storage`.
    pub fn new(catalog: Catalog, storage: S) -> Self {
        let state = AcquisitionState::load(&storage);
        log::debug!(
            "tracker ready: {} records, {} acquired",
            catalog.len(),
            state.len()
        );
        Self {
            catalog,
            state,
            storage,
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn state(&self) -> &AcquisitionState {
        &self.state
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    #[must_use]
    pub fn is_acquired(&self, id: &str) -> bool {
        self.state.is_acquired(id)
    }

    /// Flip one record and persist; returns the new flag.
    pub fn toggle(&mut self, id: &str) -> bool {
        let now = self.state.toggle(id);
        if !self.catalog.contains(id) {
            log::warn!("toggled id {id} is not in the catalog");
        }
        self.persist();
        now
    }

    /// Mark every id as acquired and persist once.
    pub fn set_many<I, T>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let changed = self.state.set_many(ids, true);
        self.persist();
        changed
    }

    /// Mark every id as not acquired and persist once.
    pub fn clear_many<I, T>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let changed = self.state.clear_many(ids);
        self.persist();
        changed
    }

    #[must_use]
    pub fn export(&self) -> String {
        self.state.export()
    }

    /// Replace the acquisition state with a backup and persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the backup is rejected; the current state is kept.
    pub fn import(&mut self, blob: &str) -> Result<usize, ImportError> {
        let count = self.state.import(blob)?;
        let unknown = self.state.unknown_ids(&self.catalog).len();
        if unknown > 0 {
            log::info!("imported backup carries {unknown} ids not in the catalog");
        }
        self.persist();
        Ok(count)
    }

    #[must_use]
    pub fn summary(&self) -> SummaryTable {
        views::compute_summary(&self.catalog, &self.state)
    }

    #[must_use]
    pub fn location_rows(&self, location: Option<Location>) -> Vec<&Record> {
        views::location_rows(&self.catalog, location)
    }

    #[must_use]
    pub fn reverse_lookup(&self, location: Location, threshold: Rank) -> Vec<&Record> {
        views::reverse_lookup(&self.catalog, &self.state, location, threshold)
    }

    #[must_use]
    pub fn rarity_groups(&self) -> Vec<RarityGroup> {
        views::rarity_groups(&self.catalog)
    }

    /// Rows at `location` (or all) narrowed by `filter`.
    #[must_use]
    pub fn visible_rows(&self, location: Option<Location>, filter: &RowFilter) -> Vec<&Record> {
        views::apply_row_filter(self.location_rows(location), &self.state, filter)
    }

    /// Write the current state, surfacing any storage failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend rejects the blob.
    pub fn save(&self) -> Result<(), StorageError> {
        self.state.save(&self.storage)
    }

    fn persist(&self) {
        if let Err(err) = self.state.save(&self.storage) {
            log::warn!("acquisition state not persisted: {err}");
        }
    }
}
