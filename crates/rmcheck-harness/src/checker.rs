//! Accumulate expected metric values, then assert them against a snapshot.

use std::collections::HashMap;
use std::sync::OnceLock;

use rmcheck_core::error::{Result, RmError};
use rmcheck_core::{
    assert_counter, assert_gauge_int, assert_gauge_long, get_metrics, MetricKey, MetricKind,
    MetricsSource,
};

/// Expected values for the resource metrics of one source.
///
/// Every key lives in exactly one of three maps, picked by its registered
/// [`MetricKind`]. Cloning (or [`create_from`](Self::create_from)) copies all
/// maps, so a derived checker never affects the one it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMetricsChecker {
    gauges_long: HashMap<MetricKey, i64>,
    gauges_int: HashMap<MetricKey, i32>,
    counters: HashMap<MetricKey, i64>,
    /// First setter call made with a key of the wrong category.
    rejected: Option<RmError>,
}

/// All-zero expectations for every key. Built once, never mutated.
fn initial_checker() -> &'static ResourceMetricsChecker {
    static INITIAL: OnceLock<ResourceMetricsChecker> = OnceLock::new();
    INITIAL.get_or_init(|| {
        let mut checker = ResourceMetricsChecker::empty();
        for key in MetricKey::ALL {
            match key.kind() {
                MetricKind::LongGauge => checker.gauge_long(key, 0),
                MetricKind::IntGauge => checker.gauge_int(key, 0),
                MetricKind::Counter => checker.counter(key, 0),
            };
        }
        checker
    })
}

impl ResourceMetricsChecker {
    fn empty() -> Self {
        Self {
            gauges_long: HashMap::new(),
            gauges_int: HashMap::new(),
            counters: HashMap::new(),
            rejected: None,
        }
    }

    /// Checker expecting every known metric to be zero.
    pub fn create() -> Self {
        initial_checker().clone()
    }

    /// Independent copy of `checker`.
    pub fn create_from(checker: &ResourceMetricsChecker) -> Self {
        checker.clone()
    }

    pub fn gauge_long(&mut self, key: MetricKey, value: i64) -> &mut Self {
        if self.accept(key, MetricKind::LongGauge) {
            self.gauges_long.insert(key, value);
        }
        self
    }

    pub fn gauge_int(&mut self, key: MetricKey, value: i32) -> &mut Self {
        if self.accept(key, MetricKind::IntGauge) {
            self.gauges_int.insert(key, value);
        }
        self
    }

    pub fn counter(&mut self, key: MetricKey, value: i64) -> &mut Self {
        if self.accept(key, MetricKind::Counter) {
            self.counters.insert(key, value);
        }
        self
    }

    fn accept(&mut self, key: MetricKey, requested: MetricKind) -> bool {
        let registered = key.kind();
        if registered == requested {
            return true;
        }
        tracing::warn!(%key, %registered, %requested, "expectation set through the wrong category, ignored");
        if self.rejected.is_none() {
            self.rejected = Some(RmError::CategoryMismatch {
                key,
                registered,
                requested,
            });
        }
        false
    }

    /// Expected value for `key`, widened to `i64`.
    pub fn expected(&self, key: MetricKey) -> Option<i64> {
        match key.kind() {
            MetricKind::LongGauge => self.gauges_long.get(&key).copied(),
            MetricKind::IntGauge => self.gauges_int.get(&key).map(|v| i64::from(*v)),
            MetricKind::Counter => self.counters.get(&key).copied(),
        }
    }

    /// Number of accumulated expectations.
    pub fn len(&self) -> usize {
        self.gauges_long.len() + self.gauges_int.len() + self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Verify every expectation against a fresh snapshot of `source`.
    ///
    /// Stops at the first mismatch. An absent source, or an earlier setter call
    /// made with a key of the wrong category, is a configuration error and is
    /// reported before any snapshot is taken.
    pub fn check_against<S>(&self, source: Option<&S>) -> Result<&Self>
    where
        S: MetricsSource + ?Sized,
    {
        let source = source.ok_or(RmError::MissingSource)?;
        if let Some(e) = &self.rejected {
            return Err(e.clone());
        }

        let record = get_metrics(source);
        tracing::debug!(
            source = %source.describe(),
            expectations = self.len(),
            "asserting resource metrics"
        );

        for (key, value) in &self.gauges_long {
            assert_gauge_long(key.display_name(), *value, &record)?;
        }
        for (key, value) in &self.gauges_int {
            assert_gauge_int(key.display_name(), *value, &record)?;
        }
        for (key, value) in &self.counters {
            assert_counter(key.display_name(), *value, &record)?;
        }
        Ok(self)
    }

    /// Same as [`check_against`](Self::check_against), failing the calling test on error.
    #[track_caller]
    pub fn assert_against<S>(&self, source: Option<&S>) -> &Self
    where
        S: MetricsSource + ?Sized,
    {
        match self.check_against(source) {
            Ok(checker) => checker,
            Err(e) => panic!("resource metrics check failed [{}]: {e}", e.class().as_str()),
        }
    }
}
