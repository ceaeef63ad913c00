//! Inventory snapshot handle.
//!
//! Lifecycle:
//! - `cache = true`: the first successful load is kept and every later
//!   `snapshot()` returns the same `Arc`. Population happens at most once
//!   (the write lock is held across the load). Failed loads are not cached.
//! - `cache = false`: every `snapshot()` re-reads the source.
//! - `reload()` loads a fresh inventory and swaps it in wholesale. Requests
//!   already holding the previous `Arc` keep computing on it.

pub mod source;

use std::sync::Arc;

use tokio::sync::RwLock;

use invmetrics_core::error::{MetricsError, Result};
use invmetrics_core::Inventory;

pub use source::{FileSource, InventorySource};

pub struct InventoryStore {
    source: Arc<dyn InventorySource>,
    cache: bool,
    current: RwLock<Option<Arc<Inventory>>>,
}

impl InventoryStore {
    pub fn new(source: Arc<dyn InventorySource>, cache: bool) -> Self {
        Self {
            source,
            cache,
            current: RwLock::new(None),
        }
    }

    /// Immutable inventory for one request.
    pub async fn snapshot(&self) -> Result<Arc<Inventory>> {
        if !self.cache {
            return self.load().await;
        }
        if let Some(inv) = self.current.read().await.as_ref() {
            return Ok(Arc::clone(inv));
        }

        let mut slot = self.current.write().await;
        if let Some(inv) = slot.as_ref() {
            return Ok(Arc::clone(inv));
        }
        let inv = self.load().await?;
        *slot = Some(Arc::clone(&inv));
        Ok(inv)
    }

    /// Replace the cached snapshot with a fresh load. On failure the previous
    /// snapshot stays in place.
    pub async fn reload(&self) -> Result<Arc<Inventory>> {
        let inv = self.load().await?;
        if self.cache {
            *self.current.write().await = Some(Arc::clone(&inv));
        }
        Ok(inv)
    }

    /// Currently cached snapshot, without loading.
    pub async fn cached(&self) -> Option<Arc<Inventory>> {
        self.current.read().await.clone()
    }

    async fn load(&self) -> Result<Arc<Inventory>> {
        let source = Arc::clone(&self.source);
        let inv = tokio::task::spawn_blocking(move || source.load())
            .await
            .map_err(|e| MetricsError::Internal(format!("inventory load task failed: {e}")))??;

        if inv.rows_skipped() > 0 {
            tracing::warn!(skipped = inv.rows_skipped(), "inventory rows skipped during normalization");
        }
        tracing::info!(
            source = %inv.source().display(),
            format = inv.format().as_str(),
            rows = inv.rows_read(),
            records = inv.len(),
            "inventory loaded"
        );
        Ok(Arc::new(inv))
    }
}
