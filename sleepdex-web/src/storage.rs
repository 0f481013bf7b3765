//! Browser implementations of the sleepdex-core seams.

use sleepdex_core::constants::{ALL_RECORDS_KEY, DEFAULT_STORAGE_KEY};
use sleepdex_core::{Catalog, CatalogError, StateStorage};

use crate::dom;

/// Acquisition blob kept in `localStorage` under a single key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebStateStorage {
    key: String,
}

impl WebStateStorage {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Default for WebStateStorage {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_KEY)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("localStorage unavailable: {0}")]
    Unavailable(String),
    #[error("storage error: {0}")]
    Storage(String),
}

/// No JS value is touched unless a window exists.
fn local_storage() -> Result<web_sys::Storage, WebStorageError> {
    if dom::window().is_none() {
        return Err(WebStorageError::Unavailable("no browser window".to_string()));
    }
    dom::local_storage().map_err(|e| WebStorageError::Unavailable(dom::js_error_message(&e)))
}

impl StateStorage for WebStateStorage {
    type Error = WebStorageError;

    fn read(&self) -> Result<Option<String>, Self::Error> {
        let storage = local_storage()?;
        storage
            .get_item(&self.key)
            .map_err(|e| WebStorageError::Storage(dom::js_error_message(&e)))
    }

    fn write(&self, blob: &str) -> Result<(), Self::Error> {
        let storage = local_storage()?;
        storage
            .set_item(&self.key, blob)
            .map_err(|e| WebStorageError::Storage(dom::js_error_message(&e)))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WebDataError {
    #[error("Network error: {0}")]
    Network(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Fetch and parse the static catalog document.
///
/// # Errors
///
/// Returns an error if the request fails or the document is not a catalog.
#[allow(clippy::future_not_send)]
pub async fn fetch_catalog(url: &str) -> Result<Catalog, WebDataError> {
    let text = dom::fetch_text(url)
        .await
        .map_err(|e| WebDataError::Network(dom::js_error_message(&e)))?;
    Ok(Catalog::from_json_with_key(&text, ALL_RECORDS_KEY)?)
}
