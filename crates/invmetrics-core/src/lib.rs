//! invmetrics core: inventory record model, normalizer, filter, metrics
//! engine, and response assembler.
//!
//! Everything here is pure and synchronous. File loading, HTTP and caching
//! live in `invmetrics-gateway`, which hands this crate raw rows and a
//! requested `type` and serializes what comes back.
//!
//! # Lint policy
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed inventory rows are zero-filled or skipped, never raised.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod filter;
pub mod metrics;
pub mod normalize;
pub mod record;
pub mod report;

/// Shared result type.
pub use error::{MetricsError, Result};
pub use record::{Inventory, InventoryRecord, SourceFormat};
