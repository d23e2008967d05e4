//! The closed set of scheduler resource metric keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Value domain a metric is exported with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Point-in-time value with a 64-bit range (memory in MB).
    LongGauge,
    /// Point-in-time value with a 32-bit range (cores, containers).
    IntGauge,
    /// Monotonic cumulative total.
    Counter,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::LongGauge => "long gauge",
            MetricKind::IntGauge => "int gauge",
            MetricKind::Counter => "counter",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource metric identifiers. Serialized by display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetricKey {
    #[serde(rename = "AllocatedMB")]
    AllocatedMb,
    #[serde(rename = "AllocatedVCores")]
    AllocatedVCores,
    #[serde(rename = "AllocatedContainers")]
    AllocatedContainers,
    #[serde(rename = "AggregateContainersAllocated")]
    AggregateContainersAllocated,
    #[serde(rename = "AggregateContainersReleased")]
    AggregateContainersReleased,
    #[serde(rename = "AvailableMB")]
    AvailableMb,
    #[serde(rename = "AvailableVCores")]
    AvailableVCores,
    #[serde(rename = "PendingMB")]
    PendingMb,
    #[serde(rename = "PendingVCores")]
    PendingVCores,
    #[serde(rename = "PendingContainers")]
    PendingContainers,
    #[serde(rename = "ReservedMB")]
    ReservedMb,
    #[serde(rename = "ReservedVCores")]
    ReservedVCores,
    #[serde(rename = "ReservedContainers")]
    ReservedContainers,
}

impl MetricKey {
    /// Every key, in display order.
    pub const ALL: [MetricKey; 13] = [
        MetricKey::AllocatedMb,
        MetricKey::AllocatedVCores,
        MetricKey::AllocatedContainers,
        MetricKey::AggregateContainersAllocated,
        MetricKey::AggregateContainersReleased,
        MetricKey::AvailableMb,
        MetricKey::AvailableVCores,
        MetricKey::PendingMb,
        MetricKey::PendingVCores,
        MetricKey::PendingContainers,
        MetricKey::ReservedMb,
        MetricKey::ReservedVCores,
        MetricKey::ReservedContainers,
    ];

    /// Name the metric is published under.
    pub fn display_name(self) -> &'static str {
        match self {
            MetricKey::AllocatedMb => "AllocatedMB",
            MetricKey::AllocatedVCores => "AllocatedVCores",
            MetricKey::AllocatedContainers => "AllocatedContainers",
            MetricKey::AggregateContainersAllocated => "AggregateContainersAllocated",
            MetricKey::AggregateContainersReleased => "AggregateContainersReleased",
            MetricKey::AvailableMb => "AvailableMB",
            MetricKey::AvailableVCores => "AvailableVCores",
            MetricKey::PendingMb => "PendingMB",
            MetricKey::PendingVCores => "PendingVCores",
            MetricKey::PendingContainers => "PendingContainers",
            MetricKey::ReservedMb => "ReservedMB",
            MetricKey::ReservedVCores => "ReservedVCores",
            MetricKey::ReservedContainers => "ReservedContainers",
        }
    }

    /// Category the key is registered under.
    pub fn kind(self) -> MetricKind {
        match self {
            MetricKey::AllocatedMb
            | MetricKey::AvailableMb
            | MetricKey::PendingMb
            | MetricKey::ReservedMb => MetricKind::LongGauge,
            MetricKey::AggregateContainersAllocated
            | MetricKey::AggregateContainersReleased => MetricKind::Counter,
            MetricKey::AllocatedVCores
            | MetricKey::AllocatedContainers
            | MetricKey::AvailableVCores
            | MetricKey::PendingVCores
            | MetricKey::PendingContainers
            | MetricKey::ReservedVCores
            | MetricKey::ReservedContainers => MetricKind::IntGauge,
        }
    }

    /// Reverse lookup by display name.
    pub fn from_display_name(name: &str) -> Option<MetricKey> {
        MetricKey::ALL.into_iter().find(|k| k.display_name() == name)
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
