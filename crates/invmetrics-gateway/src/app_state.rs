//! Shared application state.
//!
//! Holds the validated config, the inventory snapshot handle and the request
//! metrics registry. Cloned into every handler through axum `State`; nothing
//! here is reached through globals.

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::inventory::{FileSource, InventorySource, InventoryStore};
use crate::obs::ServiceMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServiceConfig,
    inventory: InventoryStore,
    metrics: ServiceMetrics,
}

impl AppState {
    /// State backed by the inventory files named in `cfg`.
    pub fn new(cfg: ServiceConfig) -> Self {
        let source = Arc::new(FileSource::from_config(&cfg.inventory));
        Self::with_source(cfg, source)
    }

    /// State backed by an arbitrary inventory source.
    pub fn with_source(cfg: ServiceConfig, source: Arc<dyn InventorySource>) -> Self {
        let inventory = InventoryStore::new(source, cfg.inventory.cache);
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                inventory,
                metrics: ServiceMetrics::default(),
            }),
        }
    }

    pub fn cfg(&self) -> &ServiceConfig {
        &self.inner.cfg
    }

    pub fn inventory(&self) -> &InventoryStore {
        &self.inner.inventory
    }

    pub fn metrics(&self) -> &ServiceMetrics {
        &self.inner.metrics
    }
}
