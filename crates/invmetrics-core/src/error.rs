//! Shared error type across invmetrics crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Missing or invalid request parameter.
    Validation,
    /// Inventory file missing or unparsable.
    DataSource,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::Validation => "VALIDATION_ERROR",
            ClientCode::DataSource => "DATA_SOURCE_ERROR",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Unified error type used by core and gateway.
///
/// Row-level problems inside the inventory never surface here; the
/// normalizer zero-fills or skips them instead.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("data source error: {0}")]
    DataSource(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl MetricsError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            MetricsError::Validation(_) => ClientCode::Validation,
            MetricsError::DataSource(_) => ClientCode::DataSource,
            MetricsError::Internal(_) => ClientCode::Internal,
        }
    }
}
