//! In-memory storage backend.

use shares_core::{Result, SharesError, StorageBackend};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{debug, instrument};

/// Simple in-memory backend for testing and development.
///
/// Values are stored in an `RwLock`-protected `HashMap` and are lost when the
/// backend is dropped.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    items: RwLock<HashMap<String, String>>,
}

impl InMemoryBackend {
    /// Create a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> Result<usize> {
        let items = self
            .items
            .read()
            .map_err(|e| SharesError::Cache(e.to_string()))?;
        Ok(items.len())
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl StorageBackend for InMemoryBackend {
    #[instrument(skip(self))]
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self
            .items
            .read()
            .map_err(|e| SharesError::Cache(e.to_string()))?;
        match items.get(key) {
            Some(value) => {
                debug!("Cache hit");
                Ok(Some(value.clone()))
            }
            None => {
                debug!("Cache miss");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| SharesError::Cache(e.to_string()))?;
        items.insert(key.to_string(), value.to_string());
        debug!("Stored value");
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| SharesError::Cache(e.to_string()))?;
        items.remove(key);
        Ok(())
    }

    #[instrument(skip(self))]
    fn clear(&self) -> Result<()> {
        self.items
            .write()
            .map_err(|e| SharesError::Cache(e.to_string()))?
            .clear();
        debug!("Cleared all entries");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shares_core::{ExtremumPair, ExtremumPoint, Snapshot, SnapshotStore};
    use std::sync::Arc;

    #[test]
    fn test_memory_backend_items() {
        let backend = InMemoryBackend::new();

        // Initially no data
        assert!(backend.get_item("data.json").unwrap().is_none());
        assert!(backend.is_empty().unwrap());

        backend.set_item("data.json", "first").unwrap();
        backend.set_item("data.json", "second").unwrap();
        assert_eq!(
            backend.get_item("data.json").unwrap().as_deref(),
            Some("second")
        );
        assert_eq!(backend.len().unwrap(), 1);

        backend.remove_item("data.json").unwrap();
        assert!(backend.get_item("data.json").unwrap().is_none());
    }

    #[test]
    fn test_memory_backend_clear() {
        let backend = InMemoryBackend::new();
        backend.set_item("a", "1").unwrap();
        backend.set_item("b", "2").unwrap();

        backend.clear().unwrap();

        assert!(backend.is_empty().unwrap());
    }

    #[test]
    fn test_memory_backend_behind_snapshot_store() {
        let store = SnapshotStore::new(Arc::new(InMemoryBackend::new()), "data.json");
        let snapshot = Snapshot::new(
            "ACME",
            ExtremumPair {
                max: ExtremumPoint::new(900.0, "2021"),
                min: ExtremumPoint::new(300.0, "2022"),
            },
        );

        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap(), Some(snapshot));
    }
}
