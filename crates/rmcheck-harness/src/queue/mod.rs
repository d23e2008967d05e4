//! In-memory queue resource metrics.
//!
//! A scheduler under test updates a `QueueMetrics` as it pends, allocates,
//! releases and reserves containers; the checker then reads it through the
//! `MetricsSource` trait. Values are atomics and per-user breakdowns live in a
//! `DashMap`, so the source can be shared across threads without locking.

pub mod metrics;

pub use metrics::QueueMetrics;
