use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;

use invmetrics_core::error::{MetricsError, Result};
use invmetrics_core::metrics::{DEFAULT_OBSOLETE_MONTHS, DEFAULT_OPEN_LICENSE_MARKERS, DEFAULT_TOP_N};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub inventory: InventorySection,

    #[serde(default)]
    pub metrics: MetricsSection,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            inventory: InventorySection::default(),
            metrics: MetricsSection::default(),
        }
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricsError::Validation(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.server.validate()?;
        self.inventory.validate()?;
        self.metrics.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl ServerSection {
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            MetricsError::Validation(format!(
                "server.listen must be a valid socket address: {}",
                self.listen
            ))
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8000".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InventorySection {
    /// Directories searched in order; the first one holding either file wins.
    #[serde(default = "default_search_paths")]
    pub search_paths: Vec<PathBuf>,

    #[serde(default = "default_json_file")]
    pub json_file: String,

    #[serde(default = "default_csv_file")]
    pub csv_file: String,

    /// Keep the first successful load for the life of the process.
    #[serde(default = "default_true")]
    pub cache: bool,

    /// Load at startup and fail fast when the file is unusable.
    #[serde(default)]
    pub preload: bool,
}

impl Default for InventorySection {
    fn default() -> Self {
        Self {
            search_paths: default_search_paths(),
            json_file: default_json_file(),
            csv_file: default_csv_file(),
            cache: default_true(),
            preload: false,
        }
    }
}

impl InventorySection {
    pub fn validate(&self) -> Result<()> {
        if self.search_paths.is_empty() {
            return Err(MetricsError::Validation(
                "inventory.search_paths must not be empty".into(),
            ));
        }
        if self.json_file.trim().is_empty() || self.csv_file.trim().is_empty() {
            return Err(MetricsError::Validation(
                "inventory.json_file and inventory.csv_file must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn default_search_paths() -> Vec<PathBuf> {
    vec![PathBuf::from(".")]
}
fn default_json_file() -> String {
    "asset_inventory.json".into()
}
fn default_csv_file() -> String {
    "asset_inventory.csv".into()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    #[serde(default = "default_obsolete_months")]
    pub default_obsolete_months: u32,

    #[serde(default = "default_top_n")]
    pub top_n: usize,

    #[serde(default = "default_open_license_markers")]
    pub open_license_markers: Vec<String>,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            default_obsolete_months: default_obsolete_months(),
            top_n: default_top_n(),
            open_license_markers: default_open_license_markers(),
        }
    }
}

impl MetricsSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=600).contains(&self.default_obsolete_months) {
            return Err(MetricsError::Validation(
                "metrics.default_obsolete_months must be between 1 and 600".into(),
            ));
        }
        if !(1..=100).contains(&self.top_n) {
            return Err(MetricsError::Validation(
                "metrics.top_n must be between 1 and 100".into(),
            ));
        }
        if self.open_license_markers.iter().any(|m| m.trim().is_empty()) {
            return Err(MetricsError::Validation(
                "metrics.open_license_markers must not contain empty entries".into(),
            ));
        }
        Ok(())
    }
}

fn default_obsolete_months() -> u32 {
    DEFAULT_OBSOLETE_MONTHS
}
fn default_top_n() -> usize {
    DEFAULT_TOP_N
}
fn default_open_license_markers() -> Vec<String> {
    DEFAULT_OPEN_LICENSE_MARKERS.iter().map(|m| m.to_string()).collect()
}
