//! Metrics sources: anything that can hand out a snapshot of named values.

use std::fs;

use crate::error::{Result, RmError};
use crate::record::MetricsRecord;

/// A metrics-emitting object under test.
pub trait MetricsSource {
    /// Stable identity (queue name, component name).
    fn name(&self) -> &str;

    /// Read every published value once.
    fn snapshot(&self) -> MetricsRecord;

    /// Free-form diagnostic description, used only for logging.
    fn describe(&self) -> String {
        self.name().to_string()
    }
}

/// Take a snapshot of `source`.
pub fn get_metrics<S: MetricsSource + ?Sized>(source: &S) -> MetricsRecord {
    let record = source.snapshot();
    tracing::trace!(source = %source.name(), metrics = record.len(), "metrics snapshot taken");
    record
}

/// Source that always reports the same, previously captured record.
#[derive(Debug, Clone)]
pub struct RecordedSource {
    record: MetricsRecord,
}

impl RecordedSource {
    pub fn new(record: MetricsRecord) -> Self {
        Self { record }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let record: MetricsRecord = serde_json::from_str(s)
            .map_err(|e| RmError::BadConfig(format!("invalid metrics record json: {e}")))?;
        Ok(Self::new(record))
    }

    pub fn from_json_file(path: &str) -> Result<Self> {
        let s = fs::read_to_string(path)
            .map_err(|e| RmError::Internal(format!("read metrics record failed: {e}")))?;
        Self::from_json_str(&s)
    }

    pub fn record(&self) -> &MetricsRecord {
        &self.record
    }

    /// Mutable access, for tweaking a loaded fixture.
    pub fn record_mut(&mut self) -> &mut MetricsRecord {
        &mut self.record
    }
}

impl MetricsSource for RecordedSource {
    fn name(&self) -> &str {
        self.record.source()
    }

    fn snapshot(&self) -> MetricsRecord {
        self.record.clone()
    }

    fn describe(&self) -> String {
        format!("recorded source={}", self.record.source())
    }
}
