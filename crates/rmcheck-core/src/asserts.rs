//! Exact-equality assertions against a snapshot record.
//!
//! The kind is checked before the value: a metric published as a long gauge
//! never satisfies an int-gauge expectation, even when the numbers agree.

use crate::error::{Result, RmError};
use crate::key::MetricKind;
use crate::record::MetricsRecord;

pub fn assert_gauge_long(name: &str, expected: i64, record: &MetricsRecord) -> Result<()> {
    assert_sample(name, MetricKind::LongGauge, expected, record)
}

pub fn assert_gauge_int(name: &str, expected: i32, record: &MetricsRecord) -> Result<()> {
    assert_sample(name, MetricKind::IntGauge, i64::from(expected), record)
}

pub fn assert_counter(name: &str, expected: i64, record: &MetricsRecord) -> Result<()> {
    assert_sample(name, MetricKind::Counter, expected, record)
}

fn assert_sample(name: &str, kind: MetricKind, expected: i64, record: &MetricsRecord) -> Result<()> {
    let sample = record.get(name).ok_or_else(|| RmError::MissingMetric {
        name: name.to_string(),
    })?;

    if sample.kind != kind {
        return Err(RmError::KindMismatch {
            name: name.to_string(),
            expected_kind: kind,
            actual_kind: sample.kind,
            expected,
            actual: sample.value,
        });
    }
    if sample.value != expected {
        return Err(RmError::Mismatch {
            name: name.to_string(),
            expected,
            actual: sample.value,
        });
    }
    Ok(())
}
