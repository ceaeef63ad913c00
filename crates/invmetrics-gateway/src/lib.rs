//! invmetrics gateway library entry.
//!
//! Wires the config loader, the inventory snapshot store and the axum
//! handlers that expose the metrics computed by `invmetrics-core`. Used by
//! the binary (`main.rs`) and by integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod inventory;
pub mod obs;
pub mod ops;
pub mod router;
