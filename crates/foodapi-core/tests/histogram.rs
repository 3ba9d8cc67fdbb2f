//! Histogram semantics and concurrent recording.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use foodapi_core::metrics::{
    exponential_buckets, linear_buckets, BucketSpec, MetricsError, Registry,
};

#[test]
fn default_layout_is_twelve_doubling_buckets() {
    let b = BucketSpec::default().buckets().unwrap();
    assert_eq!(b.len(), 12);
    assert_eq!(b[0], 0.005);
    assert_eq!(b[1], 0.01);
    assert_eq!(b[11], 10.24);
}

#[test]
fn bucket_helpers_reject_bad_parameters() {
    assert!(exponential_buckets(0.0, 2.0, 3).is_err());
    assert!(exponential_buckets(0.1, 1.0, 3).is_err());
    assert!(exponential_buckets(0.1, 2.0, 0).is_err());
    assert!(linear_buckets(0.0, 0.0, 3).is_err());
    assert_eq!(linear_buckets(1.0, 0.5, 3).unwrap(), vec![1.0, 1.5, 2.0]);
}

#[test]
fn buckets_must_be_strictly_ascending() {
    let reg = Registry::new();
    for bad in [&[][..], &[0.1, 0.1][..], &[1.0, 0.5][..], &[0.1, f64::INFINITY][..]] {
        assert!(matches!(
            reg.histogram("h", "h", bad).err().unwrap(),
            MetricsError::InvalidBuckets { .. }
        ));
    }
}

#[test]
fn observe_is_cumulative_and_inclusive() {
    let reg = Registry::new();
    let h = reg.histogram("h", "h", &[0.1, 0.2, 0.4]).unwrap();
    h.observe(0.1).unwrap(); // on the bound counts in that bucket
    h.observe(0.15).unwrap();
    h.observe(0.3).unwrap();
    h.observe(9.0).unwrap(); // overflow only

    let snap = h.snapshot();
    assert_eq!(snap.buckets, vec![(0.1, 1), (0.2, 2), (0.4, 3)]);
    assert_eq!(snap.count, 4);
    assert!((snap.sum - 9.55).abs() < 1e-9);
}

#[test]
fn negative_and_nan_observations_are_rejected() {
    let reg = Registry::new();
    let h = reg.histogram("h", "h", &[1.0]).unwrap();

    assert!(matches!(h.observe(-0.001).unwrap_err(), MetricsError::InvalidObservation { .. }));
    assert!(h.observe(f64::NAN).is_err());
    assert_eq!(h.snapshot().count, 0);
}

#[test]
fn observe_duration_uses_seconds() {
    let reg = Registry::new();
    let h = reg.histogram("h", "h", &[0.005, 0.01]).unwrap();
    h.observe_duration(Duration::from_micros(7_500));

    let snap = h.snapshot();
    assert_eq!(snap.buckets, vec![(0.005, 0), (0.01, 1)]);
    assert!((snap.sum - 0.0075).abs() < 1e-12);
}

#[test]
fn concurrent_recording_is_exact() {
    let reg = Arc::new(Registry::new());
    let c = reg.counter("c_total", "c", &["k"]).unwrap();
    let h = reg.histogram("h", "h", &exponential_buckets(0.005, 2.0, 12).unwrap()).unwrap();

    let threads: Vec<_> = (0..8)
        .map(|t| {
            let c = c.clone();
            let h = h.clone();
            thread::spawn(move || {
                for i in 0..1_000 {
                    c.inc(&["same"]).unwrap();
                    h.observe(((t * 1_000 + i) % 50) as f64 * 0.01).unwrap();
                }
            })
        })
        .collect();

    // Scrape while writers are running; cumulative shape must hold every time.
    for _ in 0..50 {
        let snap = h.snapshot();
        assert!(snap.buckets.windows(2).all(|w| w[0].1 <= w[1].1));
        assert!(snap.buckets.last().unwrap().1 <= snap.count);
    }
    for t in threads {
        t.join().unwrap();
    }

    assert_eq!(c.get(&["same"]).unwrap(), 8_000);
    let snap = h.snapshot();
    assert_eq!(snap.count, 8_000);
    assert!(snap.buckets.windows(2).all(|w| w[0].1 <= w[1].1));
}

#[test]
fn bucket_spec_parses_strictly() {
    let spec: BucketSpec = serde_yaml::from_str("{ start: 0.01, factor: 4, count: 3 }").unwrap();
    assert_eq!(spec.buckets().unwrap(), vec![0.01, 0.04, 0.16]);

    assert!(serde_yaml::from_str::<BucketSpec>("{ start: 0.01, factor: 4, count: 3, extra: 1 }").is_err());
}
