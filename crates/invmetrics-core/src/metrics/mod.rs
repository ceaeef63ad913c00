//! Metrics engine: six independent, pure aggregations over a filtered
//! record set.
//!
//! Every function takes `&[&InventoryRecord]` as produced by
//! [`crate::filter::filter_by_type`] and accepts an empty slice, returning
//! zeroed results. Rankings use a stable descending sort, so records (or
//! names) with equal values keep their first-seen order.

pub mod analytics;
pub mod coverage;
pub mod kpis;
pub mod maintenance;
pub mod quality;
pub mod usage;

use std::collections::HashMap;

pub use analytics::{abc_bounds, advanced_analytics, AbcClassification, AdvancedAnalytics};
pub use coverage::{content_coverage, ContentCoverage, SizeStats};
pub use kpis::{operational_kpis, OperationalKpis, DEFAULT_OPEN_LICENSE_MARKERS};
pub use maintenance::{maintenance_activity, MaintenanceActivity, DEFAULT_OBSOLETE_MONTHS};
pub use quality::{metadata_quality, MetadataQuality};
pub use usage::{usage_engagement, UsageEngagement};

/// Length of top-N lists unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 10;

/// A ranked (name or id, value) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranked {
    pub key: String,
    pub value: u64,
}

impl Ranked {
    pub fn new(key: impl Into<String>, value: u64) -> Self {
        Self { key: key.into(), value }
    }
}

/// Stable sort by value, descending, then truncate to `n`.
pub(crate) fn top_n(mut items: Vec<Ranked>, n: usize) -> Vec<Ranked> {
    items.sort_by(|a, b| b.value.cmp(&a.value));
    items.truncate(n);
    items
}

/// `100 * count / total`, or 0 when there is nothing to count.
pub(crate) fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * count as f64 / total as f64
    }
}

/// Counter that remembers first-seen order of its keys.
#[derive(Debug, Default)]
pub(crate) struct Tally {
    entries: Vec<Ranked>,
    index: HashMap<String, usize>,
}

impl Tally {
    pub(crate) fn add(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].value += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push(Ranked::new(key, 1));
            }
        }
    }

    pub(crate) fn top(self, n: usize) -> Vec<Ranked> {
        top_n(self.entries, n)
    }
}
