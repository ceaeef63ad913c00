//! Usage and engagement.

use crate::record::InventoryRecord;

use super::{top_n, Ranked};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageEngagement {
    pub total_resources: usize,
    pub total_downloads: u64,
    pub total_accesses: u64,
    pub top_downloaded: Vec<Ranked>,
    pub top_accessed: Vec<Ranked>,
}

pub fn usage_engagement(records: &[&InventoryRecord], n: usize) -> UsageEngagement {
    let total_downloads = records.iter().fold(0u64, |acc, r| acc.saturating_add(r.downloads));
    let total_accesses = records.iter().fold(0u64, |acc, r| acc.saturating_add(r.accesses));

    let ranked = |value: fn(&InventoryRecord) -> u64| {
        let items = records.iter().map(|r| Ranked::new(r.id.clone(), value(r))).collect();
        top_n(items, n)
    };

    UsageEngagement {
        total_resources: records.len(),
        total_downloads,
        total_accesses,
        top_downloaded: ranked(|r| r.downloads),
        top_accessed: ranked(|r| r.accesses),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, downloads: u64, accesses: u64) -> InventoryRecord {
        let mut r = InventoryRecord::new(id);
        r.downloads = downloads;
        r.accesses = accesses;
        r
    }

    #[test]
    fn totals_and_descending_ranking() {
        let records = [rec("d", 0, 0), rec("b", 50, 0), rec("a", 100, 0), rec("c", 10, 0)];
        let refs: Vec<_> = records.iter().collect();
        let u = usage_engagement(&refs, 10);
        assert_eq!(u.total_downloads, 160);
        assert_eq!(u.total_accesses, 0);
        assert_eq!(
            u.top_downloaded,
            vec![
                Ranked::new("a", 100),
                Ranked::new("b", 50),
                Ranked::new("c", 10),
                Ranked::new("d", 0),
            ]
        );
    }

    #[test]
    fn equal_values_keep_input_order() {
        let records = [rec("x", 5, 1), rec("y", 5, 1), rec("z", 7, 1)];
        let refs: Vec<_> = records.iter().collect();
        let u = usage_engagement(&refs, 2);
        let ids: Vec<_> = u.top_downloaded.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(ids, ["z", "x"]);
        let ids: Vec<_> = u.top_accessed.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(ids, ["x", "y"]);
    }
}
