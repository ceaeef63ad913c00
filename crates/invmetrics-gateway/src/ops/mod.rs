//! Operational HTTP endpoints.
//!
//! - `/healthz` : liveness
//! - `/readyz`  : readiness (503 while the inventory cannot be loaded)
//! - `/metrics` : Prometheus text format

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    match state.inventory().snapshot().await {
        Ok(_) => (StatusCode::OK, "ready"),
        Err(e) => {
            tracing::warn!(error = %e, "inventory not ready");
            (StatusCode::SERVICE_UNAVAILABLE, "inventory unavailable")
        }
    }
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let mut extra = Vec::new();
    if let Some(inv) = state.inventory().cached().await {
        extra.push(("invmetrics_inventory_records", inv.len() as u64));
        extra.push(("invmetrics_inventory_rows_skipped", inv.rows_skipped() as u64));
        extra.push((
            "invmetrics_inventory_loaded_timestamp_seconds",
            u64::try_from(inv.loaded_at().timestamp()).unwrap_or(0),
        ));
    }
    let body = state.metrics().render(&extra);

    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}
