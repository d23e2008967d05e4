//! Point-in-time snapshot of named metric values.
//!
//! A record is what a source hands out when asked for its metrics: every
//! published name with its kind and value, read once. Records are plain data
//! and serialize to JSON so fixtures can be stored next to the tests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::key::MetricKind;

/// One published value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricSample {
    pub kind: MetricKind,
    /// Int gauges are widened to `i64`.
    pub value: i64,
}

/// Snapshot of a single source, keyed by display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsRecord {
    source: String,
    #[serde(default)]
    metrics: BTreeMap<String, MetricSample>,
}

impl MetricsRecord {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            metrics: BTreeMap::new(),
        }
    }

    /// Name of the source this record was taken from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn add_gauge_long(&mut self, name: impl Into<String>, value: i64) -> &mut Self {
        self.insert(name.into(), MetricKind::LongGauge, value)
    }

    pub fn add_gauge_int(&mut self, name: impl Into<String>, value: i32) -> &mut Self {
        self.insert(name.into(), MetricKind::IntGauge, i64::from(value))
    }

    pub fn add_counter(&mut self, name: impl Into<String>, value: i64) -> &mut Self {
        self.insert(name.into(), MetricKind::Counter, value)
    }

    fn insert(&mut self, name: String, kind: MetricKind, value: i64) -> &mut Self {
        self.metrics.insert(name, MetricSample { kind, value });
        self
    }

    pub fn get(&self, name: &str) -> Option<MetricSample> {
        self.metrics.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Iterate in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, MetricSample)> + '_ {
        self.metrics.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
