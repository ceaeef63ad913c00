//! Normalized inventory record and the immutable inventory snapshot.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::normalize::normalize_rows;

/// `format` value used when a record carries none.
pub const UNKNOWN_FORMAT: &str = "unknown";

/// One dataset entry of the asset inventory after normalization.
///
/// Text fields are `Some` only when non-empty. Counters and size are
/// zero-filled; dates that could not be parsed are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub license: Option<String>,
    pub contact: Option<String>,
    pub schema: Option<String>,
    pub format: String,
    pub publisher: Option<String>,
    pub category: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub size_bytes: u64,
    pub downloads: u64,
    pub accesses: u64,
    /// Lower-cased.
    pub approval_status: Option<String>,
    /// Lower-cased.
    pub audience: Option<String>,
}

impl InventoryRecord {
    /// Minimal record with every optional field unset.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: None,
            title: None,
            description: None,
            license: None,
            contact: None,
            schema: None,
            format: UNKNOWN_FORMAT.to_string(),
            publisher: None,
            category: None,
            created_at: None,
            updated_at: None,
            size_bytes: 0,
            downloads: 0,
            accesses: 0,
            approval_status: None,
            audience: None,
        }
    }

    /// Engagement score used for ABC ranking.
    pub fn score(&self) -> u64 {
        self.downloads.saturating_add(self.accesses)
    }
}

/// File format the inventory was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Json,
    Csv,
}

impl SourceFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceFormat::Json => "json",
            SourceFormat::Csv => "csv",
        }
    }
}

/// Immutable, fully normalized inventory plus load provenance.
///
/// Built once per load and shared behind an `Arc`; a reload produces a new
/// value instead of mutating this one.
#[derive(Debug, Clone)]
pub struct Inventory {
    records: Vec<InventoryRecord>,
    source: PathBuf,
    format: SourceFormat,
    rows_read: usize,
    rows_skipped: usize,
    loaded_at: DateTime<Utc>,
}

impl Inventory {
    /// Normalize raw rows into an inventory. Never fails: malformed rows are
    /// counted in `rows_skipped`.
    pub fn from_rows(rows: Vec<Value>, source: impl Into<PathBuf>, format: SourceFormat) -> Self {
        let rows_read = rows.len();
        let normalized = normalize_rows(rows);
        Self {
            records: normalized.records,
            source: source.into(),
            format,
            rows_read,
            rows_skipped: normalized.skipped,
            loaded_at: Utc::now(),
        }
    }

    /// Inventory from already-normalized records (tests, embedding).
    pub fn from_records(records: Vec<InventoryRecord>) -> Self {
        let rows_read = records.len();
        Self {
            records,
            source: PathBuf::new(),
            format: SourceFormat::Json,
            rows_read,
            rows_skipped: 0,
            loaded_at: Utc::now(),
        }
    }

    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }
    pub fn source(&self) -> &std::path::Path {
        &self.source
    }
    pub fn format(&self) -> SourceFormat {
        self.format
    }
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }
    pub fn rows_skipped(&self) -> usize {
        self.rows_skipped
    }
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
    pub fn len(&self) -> usize {
        self.records.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
