//! No-op storage backend.

use shares_core::{Result, StorageBackend};
use tracing::trace;

/// A no-op backend that doesn't store anything.
///
/// Every read returns `Ok(None)` and every write returns `Ok(())`. Useful for
/// disabling the cache-first render or testing code paths without cache hits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBackend;

impl NoopBackend {
    /// Create a new no-op backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl StorageBackend for NoopBackend {
    fn get_item(&self, _key: &str) -> Result<Option<String>> {
        trace!("NoopBackend: get_item called, returning None");
        Ok(None)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<()> {
        trace!("NoopBackend: set_item called, doing nothing");
        Ok(())
    }

    fn remove_item(&self, _key: &str) -> Result<()> {
        trace!("NoopBackend: remove_item called, doing nothing");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        trace!("NoopBackend: clear called, doing nothing");
        Ok(())
    }
}
