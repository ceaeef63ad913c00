//! Advanced analytics: ABC engagement tiers and monthly creation trend.

use std::collections::BTreeMap;

use crate::record::InventoryRecord;

use super::{top_n, Ranked};

/// Share of ranked records that fall in class A.
const A_SHARE_PERCENT: usize = 20;
/// Cumulative share of ranked records in classes A and B.
const AB_SHARE_PERCENT: usize = 50;

/// Records split by descending engagement score (downloads + accesses).
/// Each class holds its members in rank order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AbcClassification {
    pub a: Vec<Ranked>,
    pub b: Vec<Ranked>,
    pub c: Vec<Ranked>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvancedAnalytics {
    pub total_resources: usize,
    pub abc: AbcClassification,
    /// Keyed by `YYYY-MM`.
    pub monthly_creations: BTreeMap<String, usize>,
}

/// End indices (exclusive) of classes A and B for `n` ranked records.
///
/// Class A gets at least one record whenever `n > 0`.
pub fn abc_bounds(n: usize) -> (usize, usize) {
    if n == 0 {
        return (0, 0);
    }
    let a_end = (n * A_SHARE_PERCENT / 100).max(1);
    let b_end = (n * AB_SHARE_PERCENT / 100).max(a_end);
    (a_end, b_end)
}

pub fn advanced_analytics(records: &[&InventoryRecord]) -> AdvancedAnalytics {
    let scored: Vec<Ranked> = records
        .iter()
        .map(|r| Ranked::new(r.id.clone(), r.score()))
        .collect();
    let mut ranked = top_n(scored, usize::MAX);

    let (a_end, b_end) = abc_bounds(ranked.len());
    let c = ranked.split_off(b_end);
    let b = ranked.split_off(a_end);
    let abc = AbcClassification { a: ranked, b, c };

    let mut monthly_creations = BTreeMap::new();
    for created in records.iter().filter_map(|r| r.created_at) {
        *monthly_creations
            .entry(created.format("%Y-%m").to_string())
            .or_insert(0) += 1;
    }

    AdvancedAnalytics {
        total_resources: records.len(),
        abc,
        monthly_creations,
    }
}
