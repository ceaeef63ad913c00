//! Lightweight in-process request metrics.
//!
//! Counters and histograms are stored as atomics, fed by the
//! `track_requests` middleware and rendered by the `/metrics` handler.

pub mod metrics;

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use crate::app_state::AppState;

pub use metrics::ServiceMetrics;

/// Route label for requests that matched no route.
const UNMATCHED: &str = "unmatched";

pub async fn track_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED.to_string());
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();
    let m = state.metrics();
    m.http_requests.inc(&[("route", &route), ("status", &status)]);
    m.http_duration.observe(&[("route", &route)], started.elapsed());
    response
}
