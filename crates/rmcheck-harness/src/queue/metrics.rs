use std::fmt::Write;
use std::sync::atomic::{AtomicI32, AtomicI64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use rmcheck_core::{MetricKey, MetricKind, MetricsRecord, MetricsSource};

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Storage for one metric. Int gauges are 32-bit and wrap on overflow.
enum Slot {
    Long(AtomicI64),
    Int(AtomicI32),
}

impl Slot {
    fn for_key(key: MetricKey) -> Self {
        match key.kind() {
            MetricKind::IntGauge => Slot::Int(AtomicI32::new(0)),
            MetricKind::LongGauge | MetricKind::Counter => Slot::Long(AtomicI64::new(0)),
        }
    }
}

/// Resource metrics of one queue, or of one user within a queue.
///
/// Resource arguments are per container: `allocate(_, 2, 1024, 1, _)` adds
/// 2048 MB and 2 vcores.
pub struct QueueMetrics {
    queue_name: String,
    /// Set on per-user metrics only.
    user: Option<String>,
    values: [Slot; 13],
    users: DashMap<String, Arc<QueueMetrics>>,
}

impl QueueMetrics {
    pub fn new(queue_name: impl Into<String>) -> Self {
        Self::build(queue_name.into(), None)
    }

    fn build(queue_name: String, user: Option<String>) -> Self {
        Self {
            queue_name,
            user,
            values: std::array::from_fn(|i| Slot::for_key(MetricKey::ALL[i])),
            users: DashMap::new(),
        }
    }

    pub fn queue_name(&self) -> &str {
        &self.queue_name
    }

    /// `Some(user)` for per-user metrics.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Per-user metrics, created on first use. `None` on per-user metrics themselves.
    pub fn user_metrics(&self, user: &str) -> Option<Arc<QueueMetrics>> {
        if self.user.is_some() {
            return None;
        }
        let entry = self
            .users
            .entry(user.to_string())
            .or_insert_with(|| Arc::new(Self::build(self.queue_name.clone(), Some(user.to_string()))));
        Some(Arc::clone(entry.value()))
    }

    /// Existing per-user metrics, without creating them.
    pub fn get_user_metrics(&self, user: &str) -> Option<Arc<QueueMetrics>> {
        self.users.get(user).map(|r| Arc::clone(r.value()))
    }

    /// Users with a breakdown, sorted.
    pub fn users(&self) -> Vec<String> {
        let mut users: Vec<String> = self.users.iter().map(|r| r.key().clone()).collect();
        users.sort();
        users
    }

    /// Current value of `key`.
    pub fn value(&self, key: MetricKey) -> i64 {
        match self.slot(key) {
            Slot::Long(v) => v.load(Ordering::Relaxed),
            Slot::Int(v) => i64::from(v.load(Ordering::Relaxed)),
        }
    }

    fn slot(&self, key: MetricKey) -> &Slot {
        &self.values[key as usize]
    }

    // Atomic adds wrap, so the truncated delta keeps int gauges correct mod 2^32.
    fn add(&self, key: MetricKey, delta: i64) {
        match self.slot(key) {
            Slot::Long(v) => {
                v.fetch_add(delta, Ordering::Relaxed);
            }
            Slot::Int(v) => {
                v.fetch_add(delta as i32, Ordering::Relaxed);
            }
        }
    }

    fn set(&self, key: MetricKey, value: i64) {
        match self.slot(key) {
            Slot::Long(v) => v.store(value, Ordering::Relaxed),
            Slot::Int(v) => v.store(value as i32, Ordering::Relaxed),
        }
    }

    /// Apply `f` to this queue and, when `user` is given, to that user's metrics.
    fn with_user(&self, user: Option<&str>, f: impl Fn(&QueueMetrics)) {
        f(self);
        if let Some(m) = user.and_then(|u| self.user_metrics(u)) {
            f(m.as_ref());
        }
    }

    /// Headroom left in the queue.
    pub fn set_available(&self, mb: i64, vcores: i32) {
        tracing::trace!(queue = %self.queue_name, mb, vcores, "set available");
        self.set(MetricKey::AvailableMb, mb);
        self.set(MetricKey::AvailableVCores, i64::from(vcores));
    }

    pub fn incr_pending(&self, user: Option<&str>, containers: i32, mb: i64, vcores: i32) {
        tracing::trace!(queue = %self.queue_name, ?user, containers, "incr pending");
        self.with_user(user, |m| m.shift_pending(containers, mb, vcores, 1));
    }

    pub fn decr_pending(&self, user: Option<&str>, containers: i32, mb: i64, vcores: i32) {
        tracing::trace!(queue = %self.queue_name, ?user, containers, "decr pending");
        self.with_user(user, |m| m.shift_pending(containers, mb, vcores, -1));
    }

    fn shift_pending(&self, containers: i32, mb: i64, vcores: i32, sign: i64) {
        let n = i64::from(containers);
        self.add(MetricKey::PendingContainers, sign * n);
        self.add(MetricKey::PendingMb, sign.wrapping_mul(n).wrapping_mul(mb));
        self.add(MetricKey::PendingVCores, sign.wrapping_mul(n).wrapping_mul(i64::from(vcores)));
    }

    /// Allocate containers; `decr_pending` also retires the matching pending request.
    pub fn allocate(&self, user: Option<&str>, containers: i32, mb: i64, vcores: i32, decr_pending: bool) {
        tracing::trace!(queue = %self.queue_name, ?user, containers, decr_pending, "allocate");
        self.with_user(user, |m| {
            let n = i64::from(containers);
            m.add(MetricKey::AllocatedContainers, n);
            m.add(MetricKey::AggregateContainersAllocated, n);
            m.add(MetricKey::AllocatedMb, n.wrapping_mul(mb));
            m.add(MetricKey::AllocatedVCores, n.wrapping_mul(i64::from(vcores)));
            if decr_pending {
                m.shift_pending(containers, mb, vcores, -1);
            }
        });
    }

    pub fn release(&self, user: Option<&str>, containers: i32, mb: i64, vcores: i32) {
        tracing::trace!(queue = %self.queue_name, ?user, containers, "release");
        self.with_user(user, |m| {
            let n = i64::from(containers);
            m.add(MetricKey::AllocatedContainers, n.wrapping_neg());
            m.add(MetricKey::AggregateContainersReleased, n);
            m.add(MetricKey::AllocatedMb, n.wrapping_mul(mb).wrapping_neg());
            m.add(MetricKey::AllocatedVCores, n.wrapping_mul(i64::from(vcores)).wrapping_neg());
        });
    }

    /// Reserve a single container.
    pub fn reserve(&self, user: Option<&str>, mb: i64, vcores: i32) {
        tracing::trace!(queue = %self.queue_name, ?user, mb, vcores, "reserve");
        self.with_user(user, |m| m.shift_reserved(mb, vcores, 1));
    }

    pub fn unreserve(&self, user: Option<&str>, mb: i64, vcores: i32) {
        tracing::trace!(queue = %self.queue_name, ?user, mb, vcores, "unreserve");
        self.with_user(user, |m| m.shift_reserved(mb, vcores, -1));
    }

    fn shift_reserved(&self, mb: i64, vcores: i32, sign: i64) {
        self.add(MetricKey::ReservedContainers, sign);
        self.add(MetricKey::ReservedMb, sign.wrapping_mul(mb));
        self.add(MetricKey::ReservedVCores, sign.wrapping_mul(i64::from(vcores)));
    }

    /// Render in Prometheus text exposition format, per-user series included.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let users: Vec<Arc<QueueMetrics>> = self
            .users()
            .iter()
            .filter_map(|u| self.get_user_metrics(u))
            .collect();

        for key in MetricKey::ALL {
            let ty = match key.kind() {
                MetricKind::Counter => "counter",
                MetricKind::LongGauge | MetricKind::IntGauge => "gauge",
            };
            let _ = writeln!(out, "# TYPE {} {}", key.display_name(), ty);
            self.render_line(key, &mut out);
            for m in &users {
                m.render_line(key, &mut out);
            }
        }
        out
    }

    fn render_line(&self, key: MetricKey, out: &mut String) {
        let mut label_str = format!("queue=\"{}\"", escape_label(&self.queue_name));
        if let Some(user) = &self.user {
            let _ = write!(label_str, ",user=\"{}\"", escape_label(user));
        }
        let _ = writeln!(out, "{}{{{}}} {}", key.display_name(), label_str, self.value(key));
    }
}

impl MetricsSource for QueueMetrics {
    fn name(&self) -> &str {
        &self.queue_name
    }

    fn snapshot(&self) -> MetricsRecord {
        let mut record = MetricsRecord::new(self.queue_name.clone());
        for key in MetricKey::ALL {
            let name = key.display_name();
            match (self.slot(key), key.kind()) {
                (Slot::Int(v), _) => record.add_gauge_int(name, v.load(Ordering::Relaxed)),
                (Slot::Long(v), MetricKind::Counter) => record.add_counter(name, v.load(Ordering::Relaxed)),
                (Slot::Long(v), _) => record.add_gauge_long(name, v.load(Ordering::Relaxed)),
            };
        }
        record
    }

    fn describe(&self) -> String {
        match &self.user {
            Some(user) => format!("queue={}, user={}", self.queue_name, user),
            None => format!("queue={}, users=[{}]", self.queue_name, self.users().join(", ")),
        }
    }
}
