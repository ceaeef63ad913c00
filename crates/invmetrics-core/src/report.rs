//! Response assembler: engine results -> wire schemas.
//!
//! Only key naming and rounding happen here. Ranked pairs serialize as
//! two-element JSON arrays (`["name", 3]`); maps serialize with sorted keys.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::metrics::{
    AdvancedAnalytics, ContentCoverage, MaintenanceActivity, MetadataQuality, OperationalKpis,
    Ranked, SizeStats, UsageEngagement,
};

/// Examples reported per ABC class.
pub const ABC_EXAMPLES: usize = 3;

/// Upper bound on `available_types_sample`.
pub const AVAILABLE_TYPES_SAMPLE: usize = 50;

const NO_MATCH_NOTE: &str =
    "No records matched the requested type. Use one of the available type values shown.";

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn pairs(items: &[Ranked]) -> Vec<(String, u64)> {
    items.iter().map(|r| (r.key.clone(), r.value)).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataQualityResponse {
    pub total_resources: usize,
    pub percent_with_title: f64,
    pub percent_with_description: f64,
    pub percent_with_license: f64,
    pub percent_with_contact: f64,
    pub percent_with_schema: f64,
    pub formats_distribution: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_types_sample: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

impl MetadataQualityResponse {
    /// Attach a hint listing valid types; only applied when nothing matched.
    pub fn with_type_hint(mut self, mut available: Vec<String>) -> Self {
        if self.total_resources == 0 {
            available.truncate(AVAILABLE_TYPES_SAMPLE);
            self.available_types_sample = Some(available);
            self.note = Some(NO_MATCH_NOTE);
        }
        self
    }
}

pub fn metadata_quality(m: &MetadataQuality) -> MetadataQualityResponse {
    MetadataQualityResponse {
        total_resources: m.total_resources,
        percent_with_title: round_to(m.percent_with_title, 2),
        percent_with_description: round_to(m.percent_with_description, 2),
        percent_with_license: round_to(m.percent_with_license, 2),
        percent_with_contact: round_to(m.percent_with_contact, 2),
        percent_with_schema: round_to(m.percent_with_schema, 2),
        formats_distribution: m.formats_distribution.clone(),
        available_types_sample: None,
        note: None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentCoverageResponse {
    pub total_resources: usize,
    pub resources_by_year: BTreeMap<String, usize>,
    pub top_publishers: Vec<(String, u64)>,
    pub top_categories: Vec<(String, u64)>,
    pub size_stats: SizeStats,
}

pub fn content_coverage(c: &ContentCoverage) -> ContentCoverageResponse {
    ContentCoverageResponse {
        total_resources: c.total_resources,
        resources_by_year: c.resources_by_year.clone(),
        top_publishers: pairs(&c.top_publishers),
        top_categories: pairs(&c.top_categories),
        size_stats: c.size_stats,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceActivityResponse {
    pub total_resources: usize,
    pub obsolete_months: u32,
    pub avg_update_days: f64,
    pub obsolete_count: usize,
    pub obsolete_examples: Vec<String>,
}

pub fn maintenance_activity(m: &MaintenanceActivity) -> MaintenanceActivityResponse {
    MaintenanceActivityResponse {
        total_resources: m.total_resources,
        obsolete_months: m.obsolete_months,
        avg_update_days: round_to(m.avg_update_days, 1),
        obsolete_count: m.obsolete_count,
        obsolete_examples: m.obsolete_examples.clone(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageEngagementResponse {
    pub total_resources: usize,
    pub total_downloads: u64,
    pub total_accesses: u64,
    pub top_downloaded: Vec<(String, u64)>,
    pub top_accessed: Vec<(String, u64)>,
}

pub fn usage_engagement(u: &UsageEngagement) -> UsageEngagementResponse {
    UsageEngagementResponse {
        total_resources: u.total_resources,
        total_downloads: u.total_downloads,
        total_accesses: u.total_accesses,
        top_downloaded: pairs(&u.top_downloaded),
        top_accessed: pairs(&u.top_accessed),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationalKpisResponse {
    pub total_resources: usize,
    pub percent_open_license: f64,
    pub percent_schema_compliance: f64,
}

pub fn operational_kpis(k: &OperationalKpis) -> OperationalKpisResponse {
    OperationalKpisResponse {
        total_resources: k.total_resources,
        percent_open_license: round_to(k.percent_open_license, 2),
        percent_schema_compliance: round_to(k.percent_schema_compliance, 2),
    }
}

/// Per-class values keyed `A`, `B`, `C`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerClass<T> {
    #[serde(rename = "A")]
    pub a: T,
    #[serde(rename = "B")]
    pub b: T,
    #[serde(rename = "C")]
    pub c: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvancedAnalyticsResponse {
    pub total_resources: usize,
    pub abc_classification_top_counts: PerClass<usize>,
    pub abc_examples: PerClass<Vec<(String, u64)>>,
    pub monthly_creations: BTreeMap<String, usize>,
}

pub fn advanced_analytics(a: &AdvancedAnalytics) -> AdvancedAnalyticsResponse {
    let examples = |class: &[Ranked]| pairs(&class[..class.len().min(ABC_EXAMPLES)]);
    AdvancedAnalyticsResponse {
        total_resources: a.total_resources,
        abc_classification_top_counts: PerClass {
            a: a.abc.a.len(),
            b: a.abc.b.len(),
            c: a.abc.c.len(),
        },
        abc_examples: PerClass {
            a: examples(&a.abc.a),
            b: examples(&a.abc.b),
            c: examples(&a.abc.c),
        },
        monthly_creations: a.monthly_creations.clone(),
    }
}
