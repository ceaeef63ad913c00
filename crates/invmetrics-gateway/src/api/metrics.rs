//! `/api/v1/metrics/*` handlers.
//!
//! Each handler validates its query, takes one inventory snapshot, filters it
//! and hands the eligible records to a single metrics function.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use invmetrics_core::error::{MetricsError, Result};
use invmetrics_core::filter::{available_types, filter_by_type, require_type};
use invmetrics_core::metrics;
use invmetrics_core::report::{
    self, AdvancedAnalyticsResponse, ContentCoverageResponse, MaintenanceActivityResponse,
    MetadataQualityResponse, OperationalKpisResponse, UsageEngagementResponse,
};

use crate::app_state::AppState;
use crate::error::ApiError;

/// Query string shared by all metric endpoints. Values stay raw strings so
/// that validation failures use the service's own error body.
#[derive(Debug, Default, Deserialize)]
pub struct MetricsQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub obsolete_months: Option<String>,
}

/// Malformed query strings (e.g. a repeated `type`) become validation errors.
fn metrics_query(q: std::result::Result<Query<MetricsQuery>, QueryRejection>) -> Result<MetricsQuery> {
    q.map(|Query(q)| q)
        .map_err(|e| MetricsError::Validation(format!("invalid query string: {}", e.body_text())))
}

/// Blank or absent -> `default`.
pub fn parse_obsolete_months(raw: Option<&str>, default: u32) -> Result<u32> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(default),
        Some(s) => s.parse::<u32>().map_err(|_| {
            MetricsError::Validation(format!(
                "obsolete_months must be a non-negative integer, got {s:?}"
            ))
        }),
    }
}

pub async fn metadata_quality(
    State(state): State<AppState>,
    q: std::result::Result<Query<MetricsQuery>, QueryRejection>,
) -> std::result::Result<Json<MetadataQualityResponse>, ApiError> {
    let q = metrics_query(q)?;
    let kind = require_type(q.kind.as_deref())?;
    let inventory = state.inventory().snapshot().await?;
    let records = filter_by_type(inventory.records(), Some(kind))?;
    tracing::debug!(metric = "metadata-quality", kind, matched = records.len());

    let body = report::metadata_quality(&metrics::metadata_quality(&records));
    if records.is_empty() {
        return Ok(Json(body.with_type_hint(available_types(inventory.records()))));
    }
    Ok(Json(body))
}

pub async fn content_coverage(
    State(state): State<AppState>,
    q: std::result::Result<Query<MetricsQuery>, QueryRejection>,
) -> std::result::Result<Json<ContentCoverageResponse>, ApiError> {
    let q = metrics_query(q)?;
    let kind = require_type(q.kind.as_deref())?;
    let inventory = state.inventory().snapshot().await?;
    let records = filter_by_type(inventory.records(), Some(kind))?;
    tracing::debug!(metric = "content-coverage", kind, matched = records.len());

    let top_n = state.cfg().metrics.top_n;
    Ok(Json(report::content_coverage(&metrics::content_coverage(&records, top_n))))
}

pub async fn maintenance_activity(
    State(state): State<AppState>,
    q: std::result::Result<Query<MetricsQuery>, QueryRejection>,
) -> std::result::Result<Json<MaintenanceActivityResponse>, ApiError> {
    let q = metrics_query(q)?;
    let kind = require_type(q.kind.as_deref())?;
    let months = parse_obsolete_months(
        q.obsolete_months.as_deref(),
        state.cfg().metrics.default_obsolete_months,
    )?;
    let inventory = state.inventory().snapshot().await?;
    let records = filter_by_type(inventory.records(), Some(kind))?;
    tracing::debug!(
        metric = "maintenance-activity",
        kind,
        obsolete_months = months,
        matched = records.len()
    );

    let activity = metrics::maintenance_activity(&records, months, Utc::now());
    Ok(Json(report::maintenance_activity(&activity)))
}

pub async fn usage_engagement(
    State(state): State<AppState>,
    q: std::result::Result<Query<MetricsQuery>, QueryRejection>,
) -> std::result::Result<Json<UsageEngagementResponse>, ApiError> {
    let q = metrics_query(q)?;
    let kind = require_type(q.kind.as_deref())?;
    let inventory = state.inventory().snapshot().await?;
    let records = filter_by_type(inventory.records(), Some(kind))?;
    tracing::debug!(metric = "usage-engagement", kind, matched = records.len());

    let top_n = state.cfg().metrics.top_n;
    Ok(Json(report::usage_engagement(&metrics::usage_engagement(&records, top_n))))
}

pub async fn operational_kpis(
    State(state): State<AppState>,
    q: std::result::Result<Query<MetricsQuery>, QueryRejection>,
) -> std::result::Result<Json<OperationalKpisResponse>, ApiError> {
    let q = metrics_query(q)?;
    let kind = require_type(q.kind.as_deref())?;
    let inventory = state.inventory().snapshot().await?;
    let records = filter_by_type(inventory.records(), Some(kind))?;
    tracing::debug!(metric = "operational-kpis", kind, matched = records.len());

    let markers = state.cfg().metrics.open_license_markers.as_slice();
    Ok(Json(report::operational_kpis(&metrics::operational_kpis(&records, markers))))
}

pub async fn advanced_analytics(
    State(state): State<AppState>,
    q: std::result::Result<Query<MetricsQuery>, QueryRejection>,
) -> std::result::Result<Json<AdvancedAnalyticsResponse>, ApiError> {
    let q = metrics_query(q)?;
    let kind = require_type(q.kind.as_deref())?;
    let inventory = state.inventory().snapshot().await?;
    let records = filter_by_type(inventory.records(), Some(kind))?;
    tracing::debug!(metric = "advanced-analytics", kind, matched = records.len());

    Ok(Json(report::advanced_analytics(&metrics::advanced_analytics(&records))))
}
