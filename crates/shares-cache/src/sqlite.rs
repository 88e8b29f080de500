//! SQLite-based storage backend.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use shares_core::{Result, SharesError, StorageBackend};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, instrument};

/// SQLite-based key/value backend.
///
/// Values are kept in a single table of a SQLite database file, so the stored
/// snapshot survives application restarts. Writes overwrite by key.
#[derive(Debug)]
pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    /// Create a new SQLite backend at the given path.
    ///
    /// # Arguments
    /// * `path` - Path to the SQLite database file
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or schema creation fails.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| SharesError::Cache(e.to_string()))?;
        let backend = Self {
            conn: Mutex::new(conn),
        };
        backend.initialize_schema()?;
        Ok(backend)
    }

    /// Create an in-memory SQLite backend.
    ///
    /// Useful for testing; data is lost when the backend is dropped.
    ///
    /// # Errors
    /// Returns an error if schema creation fails.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| SharesError::Cache(e.to_string()))?;
        let backend = Self {
            conn: Mutex::new(conn),
        };
        backend.initialize_schema()?;
        Ok(backend)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| SharesError::Cache(e.to_string()))
    }

    /// Initialize the database schema.
    fn initialize_schema(&self) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS snapshot_store (
                key TEXT NOT NULL PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| SharesError::Cache(e.to_string()))?;

        debug!("SQLite snapshot schema initialized");
        Ok(())
    }

    /// When the value under `key` was last written.
    ///
    /// # Errors
    /// Returns an error if the query fails or the stored timestamp is unreadable.
    pub fn updated_at(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        let conn = self.lock()?;
        let stamp: Option<String> = conn
            .query_row(
                "SELECT updated_at FROM snapshot_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| SharesError::Cache(e.to_string()))?;

        stamp
            .map(|s| {
                DateTime::parse_from_rfc3339(&s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| SharesError::Cache(format!("Invalid timestamp {}: {}", s, e)))
            })
            .transpose()
    }
}

impl StorageBackend for SqliteBackend {
    #[instrument(skip(self))]
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock()?;
        let value: Option<String> = conn
            .query_row(
                "SELECT value FROM snapshot_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| SharesError::Cache(e.to_string()))?;

        if value.is_some() {
            debug!("Cache hit");
        } else {
            debug!("Cache miss");
        }
        Ok(value)
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        let conn = self.lock()?;

        conn.execute(
            "INSERT INTO snapshot_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, updated_at],
        )
        .map_err(|e| SharesError::Cache(e.to_string()))?;

        debug!("Stored value");
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove_item(&self, key: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM snapshot_store WHERE key = ?1", params![key])
            .map_err(|e| SharesError::Cache(e.to_string()))?;
        Ok(())
    }

    #[instrument(skip(self))]
    fn clear(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM snapshot_store", [])
            .map_err(|e| SharesError::Cache(e.to_string()))?;

        debug!("Cleared all cache entries");
        Ok(())
    }
}
