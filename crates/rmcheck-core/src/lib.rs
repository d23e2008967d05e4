//! rmcheck core: metric keys, snapshot records, sources, and assertion primitives.
//!
//! This crate defines the vocabulary shared by the checker and by anything
//! that exposes scheduler resource metrics: the closed set of metric keys and
//! their display names, the typed snapshot record, the `MetricsSource` trait,
//! and the exact-equality assertions run against a snapshot.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! Every failed expectation surfaces as an `RmError` so callers decide whether
//! it becomes a test failure or gets reported some other way.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod asserts;
pub mod error;
pub mod key;
pub mod record;
pub mod source;

pub use asserts::{assert_counter, assert_gauge_int, assert_gauge_long};
pub use error::{ErrorClass, Result, RmError};
pub use key::{MetricKey, MetricKind};
pub use record::{MetricSample, MetricsRecord};
pub use source::{get_metrics, MetricsSource, RecordedSource};
