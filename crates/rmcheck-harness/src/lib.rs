//! rmcheck harness: expectation checking for scheduler resource metrics.
//!
//! Tests build a `ResourceMetricsChecker` from the all-zero baseline (or from
//! an earlier checker), override the values an operation should have produced,
//! and verify them against a live `MetricsSource`. Expectations can also come
//! from YAML files (`config`), and `queue` provides an in-memory queue metrics
//! source with per-user breakdowns for exercising the checker end to end.

pub mod checker;
pub mod config;
pub mod obs;
pub mod queue;

pub use checker::ResourceMetricsChecker;
pub use queue::QueueMetrics;
