#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use rmcheck_core::{MetricKey, MetricKind, MetricsRecord, RecordedSource, RmError};
use rmcheck_harness::ResourceMetricsChecker;

/// Record with every key published at zero, then `overrides` applied.
fn record_with(overrides: &[(MetricKey, i64)]) -> MetricsRecord {
    let mut record = MetricsRecord::new("root.default");
    for key in MetricKey::ALL {
        let v = overrides
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .unwrap_or(0);
        match key.kind() {
            MetricKind::LongGauge => record.add_gauge_long(key.display_name(), v),
            MetricKind::IntGauge => record.add_gauge_int(key.display_name(), i32::try_from(v).unwrap()),
            MetricKind::Counter => record.add_counter(key.display_name(), v),
        };
    }
    record
}

#[test]
fn baseline_expects_zero_for_every_key() {
    let checker = ResourceMetricsChecker::create();
    assert_eq!(checker.len(), 13);
    assert!(!checker.is_empty());
    for key in MetricKey::ALL {
        assert_eq!(checker.expected(key), Some(0), "key={key}");
    }
}

#[test]
fn baseline_instances_are_independent() {
    let mut a = ResourceMetricsChecker::create();
    a.gauge_long(MetricKey::AllocatedMb, 4096);

    let b = ResourceMetricsChecker::create();
    assert_eq!(b.expected(MetricKey::AllocatedMb), Some(0));
}

#[test]
fn create_from_is_a_deep_copy() {
    let mut original = ResourceMetricsChecker::create();
    original.gauge_int(MetricKey::PendingContainers, 3);

    for key in MetricKey::ALL {
        let mut copy = ResourceMetricsChecker::create_from(&original);
        match key.kind() {
            MetricKind::LongGauge => copy.gauge_long(key, 99),
            MetricKind::IntGauge => copy.gauge_int(key, 99),
            MetricKind::Counter => copy.counter(key, 99),
        };
        assert_eq!(copy.expected(key), Some(99));

        let want = if key == MetricKey::PendingContainers { 3 } else { 0 };
        assert_eq!(original.expected(key), Some(want), "key={key}");
    }

    // and the other direction
    let copy = ResourceMetricsChecker::create_from(&original);
    original.gauge_int(MetricKey::PendingContainers, 8);
    assert_eq!(copy.expected(MetricKey::PendingContainers), Some(3));
}

#[test]
fn override_keeps_last_value() {
    let mut checker = ResourceMetricsChecker::create();
    checker
        .gauge_int(MetricKey::AllocatedContainers, 5)
        .gauge_int(MetricKey::AllocatedContainers, 7);
    assert_eq!(checker.expected(MetricKey::AllocatedContainers), Some(7));
    assert_eq!(checker.len(), 13);
}

#[test]
fn absent_source_is_configuration_error() {
    let mut checker = ResourceMetricsChecker::create();
    checker
        .gauge_long(MetricKey::ReservedMb, 512)
        .counter(MetricKey::AggregateContainersAllocated, 1);

    let err = checker.check_against(None::<&RecordedSource>).expect_err("must fail");
    assert_eq!(err, RmError::MissingSource);
    assert_eq!(err.class().as_str(), "CONFIGURATION");
}

#[test]
#[should_panic(expected = "CONFIGURATION")]
fn assert_against_absent_source_panics() {
    ResourceMetricsChecker::create().assert_against(None::<&RecordedSource>);
}

#[test]
fn matching_snapshot_returns_same_checker() {
    let source = RecordedSource::new(record_with(&[]));
    let checker = ResourceMetricsChecker::create();

    let returned = checker.check_against(Some(&source)).unwrap();
    assert!(std::ptr::eq(returned, &checker));

    let again = checker.assert_against(Some(&source));
    assert!(std::ptr::eq(again, &checker));
}

#[test]
fn single_mismatch_names_the_key() {
    for key in MetricKey::ALL {
        let source = RecordedSource::new(record_with(&[(key, 1)]));
        let err = ResourceMetricsChecker::create()
            .check_against(Some(&source))
            .expect_err("must fail");

        assert_eq!(err.class().as_str(), "ASSERTION");
        assert_eq!(
            err.to_string(),
            format!("metric {}: expected 0, actual 1", key.display_name())
        );
    }
}

#[test]
fn verification_does_not_mutate_checker() {
    let source = RecordedSource::new(record_with(&[(MetricKey::PendingMb, 10)]));
    let checker = ResourceMetricsChecker::create();
    let before = checker.clone();

    let _ = checker.check_against(Some(&source));
    assert_eq!(checker, before);
}

#[test]
fn wrong_category_is_rejected() {
    let mut checker = ResourceMetricsChecker::create();
    checker
        .gauge_int(MetricKey::AllocatedMb, 1024)
        .counter(MetricKey::PendingContainers, 1);

    // rejected values are not stored
    assert_eq!(checker.expected(MetricKey::AllocatedMb), Some(0));
    assert_eq!(checker.expected(MetricKey::PendingContainers), Some(0));

    let source = RecordedSource::new(record_with(&[]));
    let err = checker.check_against(Some(&source)).expect_err("must fail");
    assert_eq!(
        err,
        RmError::CategoryMismatch {
            key: MetricKey::AllocatedMb,
            registered: MetricKind::LongGauge,
            requested: MetricKind::IntGauge,
        }
    );
    assert_eq!(err.class().as_str(), "CONFIGURATION");
    assert_eq!(
        err.to_string(),
        "metric AllocatedMB is registered as long gauge, not int gauge"
    );
}

#[test]
fn kind_published_differently_fails() {
    let mut record = record_with(&[]);
    record.add_gauge_int("AllocatedMB", 0);
    let source = RecordedSource::new(record);

    let err = ResourceMetricsChecker::create()
        .check_against(Some(&source))
        .expect_err("must fail");
    assert_eq!(
        err,
        RmError::KindMismatch {
            name: "AllocatedMB".into(),
            expected_kind: MetricKind::LongGauge,
            actual_kind: MetricKind::IntGauge,
            expected: 0,
            actual: 0,
        }
    );
}

#[test]
fn kind_mismatch_reports_both_values() {
    let mut record = record_with(&[]);
    record.add_counter("PendingContainers", 6);
    let source = RecordedSource::new(record);

    let mut checker = ResourceMetricsChecker::create();
    let err = checker
        .gauge_int(MetricKey::PendingContainers, 2)
        .check_against(Some(&source))
        .expect_err("must fail");
    assert_eq!(err.class().as_str(), "ASSERTION");
    assert_eq!(
        err.to_string(),
        "metric PendingContainers: expected 2 (int gauge), actual 6 (counter)"
    );
}

#[test]
fn missing_metric_fails() {
    let mut record = MetricsRecord::new("partial");
    record.add_gauge_long("AllocatedMB", 0);
    let source = RecordedSource::new(record);

    let err = ResourceMetricsChecker::create()
        .check_against(Some(&source))
        .expect_err("must fail");
    assert!(matches!(err, RmError::MissingMetric { .. }), "got {err}");
}

#[test]
fn extra_metrics_in_snapshot_are_ignored() {
    let mut record = record_with(&[]);
    record.add_counter("AggregateContainersPreempted", 4);
    let source = RecordedSource::new(record);

    ResourceMetricsChecker::create().assert_against(Some(&source));
}
