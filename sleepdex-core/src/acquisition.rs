//! Acquisition State: which record ids the user has marked as obtained.
//!
//! Presence in the set means acquired; there is no explicit "not acquired"
//! entry. Ids that do not match any catalog record are kept as-is so that a
//! backup taken against a newer catalog survives a round trip through an
//! older one.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::storage::{StateStorage, StorageError};

/// Reasons an imported backup is rejected.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("backup is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error("backup must be a JSON object, found {0}")]
    Shape(&'static str),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcquisitionState {
    acquired: BTreeSet<String>,
}

impl AcquisitionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_ids<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            acquired: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Restore the persisted state. Never fails: a missing, unreadable or
    /// malformed blob yields an empty state.
    pub fn load<S: StateStorage>(storage: &S) -> Self {
        match storage.read() {
            Ok(Some(blob)) => Self::parse(&blob).unwrap_or_else(|err| {
                log::warn!("stored acquisition state ignored: {err}");
                Self::default()
            }),
            Ok(None) => {
                log::debug!("no stored acquisition state");
                Self::default()
            }
            Err(err) => {
                log::warn!("acquisition state could not be read: {err}");
                Self::default()
            }
        }
    }

    /// Overwrite the stored blob with the full mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the backend rejects the write.
    pub fn save<S: StateStorage>(&self, storage: &S) -> Result<(), StorageError> {
        let blob = serde_json::to_string(self)?;
        storage
            .write(&blob)
            .map_err(|err| StorageError::Backend(err.to_string()))
    }

    /// Parse a serialized mapping.
    ///
    /// Truthy values mark an id as acquired; `false`, `null`, `0` and `""`
    /// are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob is not JSON or not a JSON object.
    pub fn parse(blob: &str) -> Result<Self, ImportError> {
        let value: Value = serde_json::from_str(blob)?;
        let Value::Object(map) = value else {
            return Err(ImportError::Shape(json_kind(&value)));
        };
        Ok(Self {
            acquired: map
                .into_iter()
                .filter(|(_, v)| is_truthy(v))
                .map(|(k, _)| k)
                .collect(),
        })
    }

    #[must_use]
    pub fn is_acquired(&self, id: &str) -> bool {
        self.acquired.contains(id)
    }

    /// Flip one id and return its new flag.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.acquired.remove(id) {
            false
        } else {
            self.acquired.insert(id.to_string());
            true
        }
    }

    /// Set one id; returns whether anything changed.
    pub fn set(&mut self, id: &str, acquired: bool) -> bool {
        if acquired {
            self.acquired.insert(id.to_string())
        } else {
            self.acquired.remove(id)
        }
    }

    /// Apply the same flag to every id in `ids`; returns how many changed.
    pub fn set_many<I, T>(&mut self, ids: I, acquired: bool) -> usize
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        ids.into_iter()
            .filter(|id| self.set(id.as_ref(), acquired))
            .count()
    }

    pub fn clear_many<I, T>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.set_many(ids, false)
    }

    /// Human-readable backup of the mapping.
    #[must_use]
    pub fn export(&self) -> String {
        format!("{:#}", self.to_value())
    }

    /// Replace the whole mapping with a parsed backup. On error the current
    /// state is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob is not a JSON object.
    pub fn import(&mut self, blob: &str) -> Result<usize, ImportError> {
        let parsed = Self::parse(blob)?;
        *self = parsed;
        Ok(self.len())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.acquired.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.acquired.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.acquired.iter().map(String::as_str)
    }

    /// Acquired ids with no matching catalog record.
    #[must_use]
    pub fn unknown_ids<'a>(&'a self, catalog: &Catalog) -> Vec<&'a str> {
        self.ids().filter(|id| !catalog.contains(id)).collect()
    }

    fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .acquired
            .iter()
            .map(|id| (id.clone(), Value::Bool(true)))
            .collect();
        Value::Object(map)
    }
}

impl Serialize for AcquisitionState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.acquired.len()))?;
        for id in &self.acquired {
            map.serialize_entry(id, &true)?;
        }
        map.end()
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
