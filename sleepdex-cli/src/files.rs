//! File-backed implementations of the core seams.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sleepdex_core::constants::ALL_RECORDS_KEY;
use sleepdex_core::{Catalog, CatalogError, CatalogLoader, StateStorage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path} is not a catalog: {source}")]
    Catalog {
        path: PathBuf,
        source: CatalogError,
    },
}

/// Acquisition blob kept in a single JSON file. A missing file reads as
/// "nothing stored yet".
#[derive(Debug, Clone)]
pub struct FileStateStorage {
    path: PathBuf,
}

impl FileStateStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStorage for FileStateStorage {
    type Error = FileError;

    fn read(&self) -> Result<Option<String>, Self::Error> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(FileError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn write(&self, blob: &str) -> Result<(), Self::Error> {
        std::fs::write(&self.path, blob).map_err(|source| FileError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Reads the catalog document from disk.
#[derive(Debug, Clone)]
pub struct FileCatalogLoader {
    path: PathBuf,
    records_key: String,
}

impl FileCatalogLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records_key: ALL_RECORDS_KEY.to_string(),
        }
    }

    #[must_use]
    pub fn with_records_key(mut self, key: impl Into<String>) -> Self {
        self.records_key = key.into();
        self
    }
}

impl CatalogLoader for FileCatalogLoader {
    type Error = FileError;

    fn load_catalog(&self) -> Result<Catalog, Self::Error> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| FileError::Read {
            path: self.path.clone(),
            source,
        })?;
        let catalog =
            Catalog::from_json_with_key(&text, &self.records_key).map_err(|source| {
                FileError::Catalog {
                    path: self.path.clone(),
                    source,
                }
            })?;
        log::debug!("loaded {} records from {}", catalog.len(), self.path.display());
        Ok(catalog)
    }
}
