//! Sleepdex core
//!
//! Platform-agnostic checklist logic for tracking collected sleep styles.
//! This crate holds the catalog, the user's acquisition state and the derived
//! views, without UI or platform-specific dependencies.

pub mod acquisition;
pub mod catalog;
pub mod constants;
pub mod kana;
pub mod rank;
pub mod storage;
pub mod tracker;
pub mod views;

// Re-export commonly used types
pub use acquisition::{AcquisitionState, ImportError};
pub use catalog::{Catalog, CatalogError, Location, Record, Style};
pub use kana::{matches_phonetic, to_hiragana};
pub use rank::{Rank, Tier};
pub use storage::{MemoryStorage, StateStorage, StorageError};
pub use tracker::{Tracker, TrackerConfig};
pub use views::{
    AcquiredFilter, RarityGroup, RowFilter, SummaryCell, SummaryColumn, SummaryRow,
    SummaryRowKind, SummaryTable, apply_row_filter, completion_rate, compute_summary,
    location_rows, rarity_groups, reverse_lookup,
};

/// Trait for abstracting catalog loading.
/// Platform-specific implementations should provide this.
pub trait CatalogLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the full record catalog from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read or parsed.
    fn load_catalog(&self) -> Result<Catalog, Self::Error>;
}

/// Catalog loader over an in-memory JSON document.
#[derive(Debug, Clone)]
pub struct StaticCatalogLoader {
    json: String,
    records_key: String,
}

impl StaticCatalogLoader {
    #[must_use]
    pub fn new(json: impl Into<String>) -> Self {
        Self {
            json: json.into(),
            records_key: constants::ALL_RECORDS_KEY.to_string(),
        }
    }

    #[must_use]
    pub fn with_records_key(mut self, key: impl Into<String>) -> Self {
        self.records_key = key.into();
        self
    }
}

impl CatalogLoader for StaticCatalogLoader {
    type Error = CatalogError;

    fn load_catalog(&self) -> Result<Catalog, Self::Error> {
        Catalog::from_json_with_key(&self.json, &self.records_key)
    }
}

impl<S: StateStorage> Tracker<S> {
    /// Load the catalog through `loader` and restore state from `storage`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub fn open<L: CatalogLoader>(loader: &L, storage: S) -> anyhow::Result<Self> {
        let catalog = loader.load_catalog()?;
        Ok(Self::new(catalog, storage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[derive(Clone, Copy, Default)]
    struct FixtureLoader;

    impl CatalogLoader for FixtureLoader {
        type Error = Infallible;

        fn load_catalog(&self) -> Result<Catalog, Self::Error> {
            Ok(Catalog::from_records(vec![
                Record::new("p1", "ピカチュウ")
                    .with_style("うとうと")
                    .with_rank(Location::Wakakusa, "スーパー3"),
            ]))
        }
    }

    #[test]
    fn tracker_opens_and_round_trips_state() {
        let storage = MemoryStorage::new();
        let mut tracker = Tracker::open(&FixtureLoader, storage.clone()).unwrap();
        assert_eq!(
            tracker
                .reverse_lookup(Location::Wakakusa, Rank::new(Tier::Super, 5))
                .len(),
            1
        );
        tracker.toggle("p1");
        assert!(tracker
            .reverse_lookup(Location::Wakakusa, Rank::new(Tier::Super, 5))
            .is_empty());

        let reopened = Tracker::open(&FixtureLoader, storage).unwrap();
        assert!(reopened.is_acquired("p1"));
    }

    #[test]
    fn static_loader_honours_records_key() {
        let loader = StaticCatalogLoader::new(r#"{"list": [{"ID": "x", "Name": "n"}]}"#)
            .with_records_key("list");
        assert_eq!(loader.load_catalog().unwrap().len(), 1);
        assert!(StaticCatalogLoader::new("nope").load_catalog().is_err());
    }
}
