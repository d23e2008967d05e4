//! Shared error type across rmcheck crates.

use thiserror::Error;

use crate::key::{MetricKey, MetricKind};

/// Stable error classification (what kind of failure the caller is looking at).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The check itself was set up wrongly (no source, wrong category, bad file).
    Configuration,
    /// A live value did not match its expectation.
    Assertion,
    /// I/O or other environment failure.
    Internal,
}

impl ErrorClass {
    /// String representation used in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorClass::Configuration => "CONFIGURATION",
            ErrorClass::Assertion => "ASSERTION",
            ErrorClass::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, RmError>;

/// Unified error type used by core and harness.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RmError {
    #[error("metrics source must not be absent")]
    MissingSource,
    #[error("metric {key} is registered as {registered}, not {requested}")]
    CategoryMismatch {
        key: MetricKey,
        registered: MetricKind,
        requested: MetricKind,
    },
    #[error("metric {name}: not present in snapshot")]
    MissingMetric { name: String },
    #[error("metric {name}: expected {expected} ({expected_kind}), actual {actual} ({actual_kind})")]
    KindMismatch {
        name: String,
        expected_kind: MetricKind,
        actual_kind: MetricKind,
        expected: i64,
        actual: i64,
    },
    #[error("metric {name}: expected {expected}, actual {actual}")]
    Mismatch {
        name: String,
        expected: i64,
        actual: i64,
    },
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported expectation file version {0}")]
    UnsupportedVersion(u32),
    #[error("internal: {0}")]
    Internal(String),
}

impl RmError {
    /// Map an error to its stable class.
    pub fn class(&self) -> ErrorClass {
        match self {
            RmError::MissingSource
            | RmError::CategoryMismatch { .. }
            | RmError::BadConfig(_)
            | RmError::UnsupportedVersion(_) => ErrorClass::Configuration,
            RmError::MissingMetric { .. }
            | RmError::KindMismatch { .. }
            | RmError::Mismatch { .. } => ErrorClass::Assertion,
            RmError::Internal(_) => ErrorClass::Internal,
        }
    }
}
