//! End-to-end: fixture rows -> normalizer -> filter -> metrics -> report.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]


use serde_json::json;

use fixture_loader::{csv_inventory, fixed_now, json_inventory};
use invmetrics_core::filter::{available_types, filter_by_type};
use invmetrics_core::metrics::{self, DEFAULT_OPEN_LICENSE_MARKERS, DEFAULT_TOP_N};
use invmetrics_core::report;

#[test]
fn json_and_csv_normalize_identically() {
    let from_json = json_inventory();
    let from_csv = csv_inventory();
    assert_eq!(from_json.records(), from_csv.records());
    assert_eq!(from_json.rows_read(), 8);
    assert_eq!(from_json.rows_skipped(), 1);
    assert_eq!(from_csv.rows_skipped(), 1);
}

#[test]
fn filter_keeps_only_eligible_dataset_rows() {
    let inv = json_inventory();
    let records = filter_by_type(inv.records(), Some("dataset")).unwrap();
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["ds-001", "ds-002", "ds-003", "ds-006"]);
    for r in &records {
        assert_eq!(r.kind.as_deref(), Some("dataset"));
        assert_eq!(r.approval_status.as_deref(), Some("approved"));
        assert_eq!(r.audience.as_deref(), Some("public"));
    }
    assert_eq!(available_types(inv.records()), ["api", "dataset"]);
}

#[test]
fn metadata_quality_report() {
    let inv = json_inventory();
    let records = filter_by_type(inv.records(), Some("dataset")).unwrap();
    let body = serde_json::to_value(report::metadata_quality(&metrics::metadata_quality(&records))).unwrap();
    assert_eq!(
        body,
        json!({
            "total_resources": 4,
            "percent_with_title": 75.0,
            "percent_with_description": 50.0,
            "percent_with_license": 75.0,
            "percent_with_contact": 50.0,
            "percent_with_schema": 25.0,
            "formats_distribution": { "csv": 2, "json": 1, "unknown": 1 }
        })
    );
}

#[test]
fn content_coverage_report() {
    let inv = csv_inventory();
    let records = filter_by_type(inv.records(), Some("dataset")).unwrap();
    let body = serde_json::to_value(report::content_coverage(&metrics::content_coverage(
        &records,
        DEFAULT_TOP_N,
    )))
    .unwrap();
    assert_eq!(body["resources_by_year"], json!({ "2021": 2, "2022": 2 }));
    assert_eq!(body["top_publishers"], json!([["Parks", 2], ["Roads", 2]]));
    assert_eq!(body["top_categories"], json!([["mobility", 2], ["environment", 1]]));
    assert_eq!(
        body["size_stats"],
        json!({ "count": 3, "total_bytes": 7168, "avg_bytes": 2389, "min_bytes": 1024, "max_bytes": 4096 })
    );
}

#[test]
fn maintenance_activity_report() {
    let inv = json_inventory();
    let records = filter_by_type(inv.records(), Some("dataset")).unwrap();
    let m = metrics::maintenance_activity(&records, 12, fixed_now());
    let body = serde_json::to_value(report::maintenance_activity(&m)).unwrap();
    assert_eq!(body["avg_update_days"], 209.7);
    assert_eq!(body["obsolete_count"], 1);
    assert_eq!(body["obsolete_examples"], json!(["ds-001"]));
    assert_eq!(body["obsolete_months"], 12);
}

#[test]
fn usage_engagement_report() {
    let inv = json_inventory();
    let records = filter_by_type(inv.records(), Some("dataset")).unwrap();
    let u = metrics::usage_engagement(&records, DEFAULT_TOP_N);
    assert_eq!(u.total_downloads, records.iter().map(|r| r.downloads).sum::<u64>());
    let body = serde_json::to_value(report::usage_engagement(&u)).unwrap();
    assert_eq!(body["total_downloads"], 170);
    assert_eq!(body["total_accesses"], 47);
    assert_eq!(
        body["top_downloaded"],
        json!([["ds-001", 120], ["ds-002", 50], ["ds-003", 0], ["ds-006", 0]])
    );
    assert_eq!(
        body["top_accessed"],
        json!([["ds-001", 30], ["ds-003", 12], ["ds-002", 5], ["ds-006", 0]])
    );
}

#[test]
fn operational_kpis_report() {
    let inv = json_inventory();
    let records = filter_by_type(inv.records(), Some("dataset")).unwrap();
    let k = metrics::operational_kpis(&records, DEFAULT_OPEN_LICENSE_MARKERS);
    let body = serde_json::to_value(report::operational_kpis(&k)).unwrap();
    assert_eq!(
        body,
        json!({ "total_resources": 4, "percent_open_license": 50.0, "percent_schema_compliance": 25.0 })
    );
}

#[test]
fn advanced_analytics_report() {
    let inv = json_inventory();
    let records = filter_by_type(inv.records(), Some("dataset")).unwrap();
    let body = serde_json::to_value(report::advanced_analytics(&metrics::advanced_analytics(&records))).unwrap();
    assert_eq!(body["abc_classification_top_counts"], json!({ "A": 1, "B": 1, "C": 2 }));
    assert_eq!(
        body["abc_examples"],
        json!({
            "A": [["ds-001", 150]],
            "B": [["ds-002", 55]],
            "C": [["ds-003", 12], ["ds-006", 0]]
        })
    );
    assert_eq!(
        body["monthly_creations"],
        json!({ "2021-03": 1, "2021-07": 1, "2022-02": 2 })
    );
}

#[test]
fn unknown_type_yields_zeroed_reports() {
    let inv = json_inventory();
    let records = filter_by_type(inv.records(), Some("no-such-type")).unwrap();
    assert!(records.is_empty());

    let quality = report::metadata_quality(&metrics::metadata_quality(&records))
        .with_type_hint(available_types(inv.records()));
    assert_eq!(quality.total_resources, 0);
    assert_eq!(quality.percent_with_license, 0.0);
    assert!(quality.formats_distribution.is_empty());
    assert_eq!(quality.available_types_sample.as_ref().map(Vec::len), Some(2));

    let usage = metrics::usage_engagement(&records, DEFAULT_TOP_N);
    assert_eq!(usage.total_downloads, 0);
    assert!(usage.top_downloaded.is_empty());

    let analytics = report::advanced_analytics(&metrics::advanced_analytics(&records));
    assert_eq!(analytics.abc_classification_top_counts.a, 0);
    assert!(analytics.monthly_creations.is_empty());
}

#[test]
fn repeated_calls_are_identical() {
    let inv = json_inventory();
    let records = filter_by_type(inv.records(), Some("dataset")).unwrap();
    let first = serde_json::to_string(&report::content_coverage(&metrics::content_coverage(&records, 10))).unwrap();
    let second = serde_json::to_string(&report::content_coverage(&metrics::content_coverage(&records, 10))).unwrap();
    assert_eq!(first, second);

    let m1 = metrics::maintenance_activity(&records, 6, fixed_now());
    let m2 = metrics::maintenance_activity(&records, 6, fixed_now());
    assert_eq!(m1, m2);
}
