//! Snapshot persistence.
//!
//! This module defines the [`StorageBackend`] trait, a synchronous string
//! key/value slot, and [`SnapshotStore`], which keeps the last processed
//! [`Snapshot`] under one fixed key of a backend.
//!
//! Storage access never suspends, which lets the cache-first render finish
//! before any network request is issued.

use std::fmt::Debug;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
    error::{Result, SharesError},
    types::Snapshot,
};

/// Durable string key/value storage.
///
/// Implementations can keep data in various places (SQLite, memory, etc.).
pub trait StorageBackend: Send + Sync + Debug {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(Some(value))` if present, `Ok(None)` if not.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the value stored under `key`, if any.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Removes every stored value.
    fn clear(&self) -> Result<()>;
}

/// Holds the last successfully processed snapshot under a single key.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    backend: Arc<dyn StorageBackend>,
    key: String,
}

impl SnapshotStore {
    /// Create a store writing to `key` of `backend`.
    pub fn new(backend: Arc<dyn StorageBackend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// The key this store reads and writes.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Serializes `snapshot` and overwrites the stored value.
    ///
    /// # Errors
    /// Returns [`SharesError::Cache`] if serialization or the backend write fails.
    #[instrument(skip(self, snapshot), fields(key = %self.key, entity = %snapshot.entity_name))]
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let json = serde_json::to_string(snapshot).map_err(|e| SharesError::Cache(e.to_string()))?;
        self.backend.set_item(&self.key, &json)?;
        debug!("Saved snapshot");
        Ok(())
    }

    /// Loads the stored snapshot.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    ///
    /// # Errors
    /// Returns [`SharesError::CorruptCache`] if the stored value is not JSON or
    /// lacks a non-empty `entityName` or numeric `max.val`/`min.val`, and
    /// [`SharesError::Cache`] if the backend read fails.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn load(&self) -> Result<Option<Snapshot>> {
        let Some(raw) = self.backend.get_item(&self.key)? else {
            debug!("No stored snapshot");
            return Ok(None);
        };

        let value: Value =
            serde_json::from_str(&raw).map_err(|e| SharesError::CorruptCache(e.to_string()))?;
        let snapshot =
            Snapshot::deserialize(&value).map_err(|e| SharesError::CorruptCache(e.to_string()))?;

        if snapshot.entity_name.is_empty() {
            return Err(SharesError::CorruptCache("entityName is empty".to_string()));
        }

        debug!("Loaded stored snapshot");
        Ok(Some(snapshot))
    }

    /// Removes the stored snapshot.
    ///
    /// # Errors
    /// Returns [`SharesError::Cache`] if the backend fails.
    pub fn clear(&self) -> Result<()> {
        self.backend.remove_item(&self.key)
    }
}
