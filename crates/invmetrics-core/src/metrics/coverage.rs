//! Content coverage: creation years, top publishers/categories, sizes.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use crate::record::InventoryRecord;

use super::{Ranked, Tally};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SizeStats {
    pub count: usize,
    pub total_bytes: u64,
    pub avg_bytes: u64,
    pub min_bytes: u64,
    pub max_bytes: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentCoverage {
    pub total_resources: usize,
    /// Keyed by 4-digit year.
    pub resources_by_year: BTreeMap<String, usize>,
    pub top_publishers: Vec<Ranked>,
    pub top_categories: Vec<Ranked>,
    pub size_stats: SizeStats,
}

pub fn content_coverage(records: &[&InventoryRecord], top_n: usize) -> ContentCoverage {
    let mut resources_by_year = BTreeMap::new();
    let mut publishers = Tally::default();
    let mut categories = Tally::default();

    for r in records {
        if let Some(created) = r.created_at {
            *resources_by_year
                .entry(format!("{:04}", created.year()))
                .or_insert(0) += 1;
        }
        if let Some(p) = &r.publisher {
            publishers.add(p);
        }
        if let Some(c) = &r.category {
            categories.add(c);
        }
    }

    ContentCoverage {
        total_resources: records.len(),
        resources_by_year,
        top_publishers: publishers.top(top_n),
        top_categories: categories.top(top_n),
        size_stats: size_stats(records),
    }
}

/// Statistics over records with a positive size; zero-sized records are
/// treated as "size unknown".
fn size_stats(records: &[&InventoryRecord]) -> SizeStats {
    let sizes: Vec<u64> = records
        .iter()
        .map(|r| r.size_bytes)
        .filter(|s| *s > 0)
        .collect();
    if sizes.is_empty() {
        return SizeStats::default();
    }

    let total_bytes = sizes.iter().fold(0u64, |acc, s| acc.saturating_add(*s));
    SizeStats {
        count: sizes.len(),
        total_bytes,
        avg_bytes: total_bytes / sizes.len() as u64,
        min_bytes: sizes.iter().copied().min().unwrap_or(0),
        max_bytes: sizes.iter().copied().max().unwrap_or(0),
    }
}
