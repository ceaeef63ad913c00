//! Axum router wiring.
//!
//! Public metrics live under `/api/v1`; ops endpoints sit at the root.

use axum::{middleware, routing::get, Router};

use crate::{api, app_state::AppState, obs, ops};

pub fn build_router(state: AppState) -> Router {
    let v1 = Router::new()
        .route("/health", get(api::health))
        .route("/metrics/metadata-quality", get(api::metrics::metadata_quality))
        .route("/metrics/content-coverage", get(api::metrics::content_coverage))
        .route("/metrics/maintenance-activity", get(api::metrics::maintenance_activity))
        .route("/metrics/usage-engagement", get(api::metrics::usage_engagement))
        .route("/metrics/operational-kpis", get(api::metrics::operational_kpis))
        .route("/metrics/advanced-analytics", get(api::metrics::advanced_analytics));

    Router::new()
        .nest("/api/v1", v1)
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .layer(middleware::from_fn_with_state(state.clone(), obs::track_requests))
        .with_state(state)
}
