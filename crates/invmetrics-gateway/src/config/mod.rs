//! Service config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use invmetrics_core::error::{MetricsError, Result};

pub use schema::{InventorySection, MetricsSection, ServerSection, ServiceConfig};

/// Config file read when `INVMETRICS_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "invmetrics.yaml";

pub fn load_from_file(path: &str) -> Result<ServiceConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MetricsError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServiceConfig> {
    let cfg: ServiceConfig = serde_yaml::from_str(s)
        .map_err(|e| MetricsError::Validation(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Like [`load_from_file`], but an absent file yields the defaults.
pub fn load_or_default(path: &str) -> Result<ServiceConfig> {
    if Path::new(path).exists() {
        load_from_file(path)
    } else {
        tracing::warn!(%path, "config file not found, using defaults");
        Ok(ServiceConfig::default())
    }
}
