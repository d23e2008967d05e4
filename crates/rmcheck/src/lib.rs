//! Top-level facade crate for rmcheck.
//!
//! Re-exports the core vocabulary and the checking harness so tests can depend on a single crate.

pub mod core {
    pub use rmcheck_core::*;
}

pub mod harness {
    pub use rmcheck_harness::*;
}

pub use rmcheck_core::{MetricKey, MetricKind, MetricsSource, RmError};
pub use rmcheck_harness::{QueueMetrics, ResourceMetricsChecker};
