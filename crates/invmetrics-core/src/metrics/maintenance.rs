//! Maintenance activity and obsolescence.

use chrono::{DateTime, Utc};

use crate::record::InventoryRecord;

pub const DEFAULT_OBSOLETE_MONTHS: u32 = 12;

/// Months are counted as 30 days.
pub const DAYS_PER_MONTH: i64 = 30;

/// Maximum number of obsolete ids reported.
pub const OBSOLETE_EXAMPLES: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceActivity {
    pub total_resources: usize,
    pub obsolete_months: u32,
    /// Mean whole days since last update, over records that have one.
    /// Updates dated after `now` count as 0 days.
    pub avg_update_days: f64,
    pub obsolete_count: usize,
    pub obsolete_examples: Vec<String>,
}

/// `now` is passed in so repeated calls over the same input agree.
pub fn maintenance_activity(
    records: &[&InventoryRecord],
    obsolete_months: u32,
    now: DateTime<Utc>,
) -> MaintenanceActivity {
    let threshold = i64::from(obsolete_months) * DAYS_PER_MONTH;

    let mut days_sum: i64 = 0;
    let mut dated = 0usize;
    let mut obsolete_count = 0usize;
    let mut obsolete_examples = Vec::new();

    for r in records {
        let Some(updated) = r.updated_at else { continue };
        // future timestamps count as updated today
        let days = (now - updated).num_days().max(0);
        days_sum = days_sum.saturating_add(days);
        dated += 1;

        if days > threshold {
            obsolete_count += 1;
            if obsolete_examples.len() < OBSOLETE_EXAMPLES {
                obsolete_examples.push(r.id.clone());
            }
        }
    }

    let avg_update_days = if dated == 0 {
        0.0
    } else {
        days_sum as f64 / dated as f64
    };

    MaintenanceActivity {
        total_resources: records.len(),
        obsolete_months,
        avg_update_days,
        obsolete_count,
        obsolete_examples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn updated(id: &str, now: DateTime<Utc>, days_ago: i64) -> InventoryRecord {
        let mut r = InventoryRecord::new(id);
        r.updated_at = Some(now - Duration::days(days_ago));
        r
    }

    #[test]
    fn four_hundred_days_is_obsolete_at_twelve_months() {
        let now = Utc::now();
        let r = updated("old", now, 400);
        let m = maintenance_activity(&[&r], 12, now);
        assert_eq!(m.obsolete_count, 1);
        assert_eq!(m.obsolete_examples, vec!["old".to_string()]);
        assert_eq!(m.avg_update_days, 400.0);
    }

    #[test]
    fn threshold_is_strict_and_undated_records_are_ignored() {
        let now = Utc::now();
        let edge = updated("edge", now, 360);
        let fresh = updated("fresh", now, 10);
        let undated = InventoryRecord::new("undated");
        let m = maintenance_activity(&[&edge, &fresh, &undated], 12, now);
        assert_eq!(m.obsolete_count, 0);
        assert!(m.obsolete_examples.is_empty());
        assert_eq!(m.avg_update_days, 185.0);
        assert_eq!(m.total_resources, 3);
    }

    #[test]
    fn examples_capped_in_input_order() {
        let now = Utc::now();
        let records: Vec<_> = (0..8).map(|i| updated(&format!("r{i}"), now, 1000 + i)).collect();
        let refs: Vec<_> = records.iter().collect();
        let m = maintenance_activity(&refs, 1, now);
        assert_eq!(m.obsolete_count, 8);
        assert_eq!(m.obsolete_examples, ["r0", "r1", "r2", "r3", "r4"]);
    }

    #[test]
    fn future_updates_count_as_zero_days() {
        let now = Utc::now();
        let ahead = updated("ahead", now, -45);
        let old = updated("old", now, 100);
        let m = maintenance_activity(&[&ahead, &old], 12, now);
        assert_eq!(m.avg_update_days, 50.0);
        assert_eq!(m.obsolete_count, 0);
    }

    #[test]
    fn empty_input() {
        let m = maintenance_activity(&[], DEFAULT_OBSOLETE_MONTHS, Utc::now());
        assert_eq!(m.avg_update_days, 0.0);
        assert_eq!(m.obsolete_count, 0);
    }
}
