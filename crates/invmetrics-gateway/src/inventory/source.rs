//! Locating and parsing the local inventory file.
//!
//! JSON must be an array of objects. CSV must carry a header row; every cell
//! becomes a string value keyed by its header, so both formats reach the
//! normalizer as the same row shape.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use invmetrics_core::error::{MetricsError, Result};
use invmetrics_core::{Inventory, SourceFormat};

use crate::config::InventorySection;

/// Anything that can produce a fresh, normalized inventory.
pub trait InventorySource: Send + Sync {
    fn load(&self) -> Result<Inventory>;
}

/// Reads `asset_inventory.json` / `asset_inventory.csv` from the first
/// search directory that holds one. JSON wins within a directory.
#[derive(Debug, Clone)]
pub struct FileSource {
    search_paths: Vec<PathBuf>,
    json_file: String,
    csv_file: String,
}

impl FileSource {
    pub fn new(search_paths: Vec<PathBuf>, json_file: impl Into<String>, csv_file: impl Into<String>) -> Self {
        Self {
            search_paths,
            json_file: json_file.into(),
            csv_file: csv_file.into(),
        }
    }

    pub fn from_config(cfg: &InventorySection) -> Self {
        Self::new(cfg.search_paths.clone(), cfg.json_file.clone(), cfg.csv_file.clone())
    }

    pub fn locate(&self) -> Option<(PathBuf, SourceFormat)> {
        self.search_paths.iter().find_map(|dir| {
            let json = dir.join(&self.json_file);
            if json.is_file() {
                return Some((json, SourceFormat::Json));
            }
            let csv = dir.join(&self.csv_file);
            csv.is_file().then_some((csv, SourceFormat::Csv))
        })
    }
}

impl InventorySource for FileSource {
    fn load(&self) -> Result<Inventory> {
        let (path, format) = self.locate().ok_or_else(|| {
            MetricsError::DataSource(format!(
                "no local asset inventory found; place '{}' or '{}' in one of: {}",
                self.json_file,
                self.csv_file,
                self.search_paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })?;

        let rows = match format {
            SourceFormat::Json => read_json_rows(&path)?,
            SourceFormat::Csv => read_csv_rows(&path)?,
        };
        Ok(Inventory::from_rows(rows, path, format))
    }
}

pub fn read_json_rows(path: &Path) -> Result<Vec<Value>> {
    let s = fs::read_to_string(path).map_err(|e| {
        MetricsError::DataSource(format!("error reading local JSON '{}': {e}", path.display()))
    })?;
    match serde_json::from_str::<Value>(&s) {
        Ok(Value::Array(rows)) => Ok(rows),
        Ok(_) => Err(MetricsError::DataSource(format!(
            "local JSON '{}' must be an array of records",
            path.display()
        ))),
        Err(e) => Err(MetricsError::DataSource(format!(
            "error parsing local JSON '{}': {e}",
            path.display()
        ))),
    }
}

/// Unreadable rows become `Value::Null`, which the normalizer counts as
/// skipped.
pub fn read_csv_rows(path: &Path) -> Result<Vec<Value>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| {
            MetricsError::DataSource(format!("error reading local CSV '{}': {e}", path.display()))
        })?;
    let headers = reader
        .headers()
        .map_err(|e| {
            MetricsError::DataSource(format!("error reading CSV header '{}': {e}", path.display()))
        })?
        .clone();

    let rows = reader
        .records()
        .enumerate()
        .map(|(idx, rec)| match rec {
            Ok(rec) => {
                let row: Map<String, Value> = headers
                    .iter()
                    .zip(rec.iter())
                    .map(|(k, v)| (k.trim().to_string(), Value::String(v.to_string())))
                    .collect();
                Value::Object(row)
            }
            Err(e) => {
                tracing::warn!(row = idx, error = %e, "unreadable CSV row");
                Value::Null
            }
        })
        .collect();
    Ok(rows)
}
