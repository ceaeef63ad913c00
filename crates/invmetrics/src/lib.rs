//! Top-level facade crate for invmetrics.
//!
//! Re-exports the metrics engine and the HTTP gateway so users can depend on a single crate.

pub mod core {
    pub use invmetrics_core::*;
}

pub mod gateway {
    pub use invmetrics_gateway::*;
}
