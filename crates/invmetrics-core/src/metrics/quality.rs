//! Metadata completeness.

use std::collections::BTreeMap;

use crate::record::InventoryRecord;

use super::percent;

/// Share of records carrying each descriptive field, plus the format mix.
/// Percentages are unrounded here; the report layer rounds them.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataQuality {
    pub total_resources: usize,
    pub percent_with_title: f64,
    pub percent_with_description: f64,
    pub percent_with_license: f64,
    pub percent_with_contact: f64,
    pub percent_with_schema: f64,
    pub formats_distribution: BTreeMap<String, usize>,
}

pub fn metadata_quality(records: &[&InventoryRecord]) -> MetadataQuality {
    let total = records.len();
    let share = |present: fn(&InventoryRecord) -> bool| {
        percent(records.iter().filter(|r| present(r)).count(), total)
    };

    let mut formats_distribution = BTreeMap::new();
    for r in records {
        *formats_distribution.entry(r.format.clone()).or_insert(0) += 1;
    }

    MetadataQuality {
        total_resources: total,
        percent_with_title: share(|r| r.title.is_some()),
        percent_with_description: share(|r| r.description.is_some()),
        percent_with_license: share(|r| r.license.is_some()),
        percent_with_contact: share(|r| r.contact.is_some()),
        percent_with_schema: share(|r| r.schema.is_some()),
        formats_distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_all_zero() {
        let q = metadata_quality(&[]);
        assert_eq!(q.total_resources, 0);
        assert_eq!(q.percent_with_title, 0.0);
        assert_eq!(q.percent_with_schema, 0.0);
        assert!(q.formats_distribution.is_empty());
    }

    #[test]
    fn shares_and_formats() {
        let mut a = InventoryRecord::new("a");
        a.title = Some("A".into());
        a.license = Some("cc-by".into());
        a.format = "csv".into();
        let mut b = InventoryRecord::new("b");
        b.title = Some("B".into());
        b.format = "csv".into();
        let c = InventoryRecord::new("c");

        let q = metadata_quality(&[&a, &b, &c]);
        assert_eq!(q.total_resources, 3);
        assert!((q.percent_with_title - 66.666).abs() < 0.01);
        assert!((q.percent_with_license - 33.333).abs() < 0.01);
        assert_eq!(q.percent_with_description, 0.0);
        assert_eq!(q.formats_distribution.get("csv"), Some(&2));
        assert_eq!(q.formats_distribution.get("unknown"), Some(&1));
    }
}
