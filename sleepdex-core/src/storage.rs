//! Persistence seam for the acquisition blob.

use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// Errors surfaced by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A single-blob key-value store.
///
/// Platform-specific implementations decide where the blob lives
/// (browser `localStorage`, a file on disk, memory).
pub trait StateStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the stored blob, `Ok(None)` when nothing has been written yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn read(&self) -> Result<Option<String>, Self::Error>;

    /// Overwrite the stored blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn write(&self, blob: &str) -> Result<(), Self::Error>;
}

/// In-memory storage; clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(blob.into()))),
        }
    }

    #[must_use]
    pub fn blob(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl StateStorage for MemoryStorage {
    type Error = StorageError;

    fn read(&self) -> Result<Option<String>, Self::Error> {
        Ok(self.slot.borrow().clone())
    }

    fn write(&self, blob: &str) -> Result<(), Self::Error> {
        *self.slot.borrow_mut() = Some(blob.to_string());
        Ok(())
    }
}

impl<S: StateStorage> StateStorage for &S {
    type Error = S::Error;

    fn read(&self) -> Result<Option<String>, Self::Error> {
        (**self).read()
    }

    fn write(&self, blob: &str) -> Result<(), Self::Error> {
        (**self).write(blob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_clones_share_slot() {
        let storage = MemoryStorage::new();
        let alias = storage.clone();
        assert_eq!(storage.read().unwrap(), None);
        alias.write("{}").unwrap();
        assert_eq!(storage.read().unwrap().as_deref(), Some("{}"));
        assert_eq!(storage.blob().as_deref(), Some("{}"));
    }
}
