//! HTTP mapping for `MetricsError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use invmetrics_core::error::{ClientCode, MetricsError};

/// Handler error; renders as `{"error": CODE, "message": ...}`.
#[derive(Debug)]
pub struct ApiError(pub MetricsError);

impl From<MetricsError> for ApiError {
    fn from(e: MetricsError) -> Self {
        Self(e)
    }
}

pub fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ClientCode::DataSource => StatusCode::SERVICE_UNAVAILABLE,
        ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        match code {
            ClientCode::Validation => tracing::debug!(error = %self.0, "rejected request"),
            ClientCode::DataSource | ClientCode::Internal => {
                tracing::error!(error = %self.0, "request failed")
            }
        }
        let body = Json(json!({
            "error": code.as_str(),
            "message": self.0.to_string(),
        }));
        (status_for(code), body).into_response()
    }
}
