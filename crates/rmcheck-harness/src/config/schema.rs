use std::collections::BTreeMap;

use serde::Deserialize;

use rmcheck_core::error::{Result, RmError};
use rmcheck_core::{MetricKey, MetricKind};

use crate::checker::ResourceMetricsChecker;

/// Overrides applied on top of the all-zero baseline, keyed by display name.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpectationFile {
    pub version: u32,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub gauges_long: BTreeMap<MetricKey, i64>,

    #[serde(default)]
    pub gauges_int: BTreeMap<MetricKey, i32>,

    #[serde(default)]
    pub counters: BTreeMap<MetricKey, i64>,
}

impl ExpectationFile {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(RmError::UnsupportedVersion(self.version));
        }

        check_section(self.gauges_long.keys(), MetricKind::LongGauge)?;
        check_section(self.gauges_int.keys(), MetricKind::IntGauge)?;
        check_section(self.counters.keys(), MetricKind::Counter)?;

        Ok(())
    }

    /// Write every override into `checker`.
    pub fn apply_to<'c>(&self, checker: &'c mut ResourceMetricsChecker) -> &'c mut ResourceMetricsChecker {
        for (key, value) in &self.gauges_long {
            checker.gauge_long(*key, *value);
        }
        for (key, value) in &self.gauges_int {
            checker.gauge_int(*key, *value);
        }
        for (key, value) in &self.counters {
            checker.counter(*key, *value);
        }
        checker
    }

    /// Baseline checker with this file's overrides applied.
    pub fn to_checker(&self) -> ResourceMetricsChecker {
        let mut checker = ResourceMetricsChecker::create();
        self.apply_to(&mut checker);
        checker
    }
}

fn check_section<'a>(keys: impl Iterator<Item = &'a MetricKey>, requested: MetricKind) -> Result<()> {
    for key in keys {
        let registered = key.kind();
        if registered != requested {
            return Err(RmError::CategoryMismatch {
                key: *key,
                registered,
                requested,
            });
        }
    }
    Ok(())
}
