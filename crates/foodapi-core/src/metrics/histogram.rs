use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::gauge::add_f64;
use super::text;
use super::MetricsError;

/// Unlabelled cumulative histogram over fixed upper bounds.
///
/// Each bucket counts observations `<=` its bound; the `+Inf` bucket is the
/// total count. Sum is kept as `f64` bits.
#[derive(Clone)]
pub struct Histogram {
    inner: Arc<HistogramInner>,
}

struct HistogramInner {
    name: String,
    help: String,
    bounds: Vec<f64>,
    buckets: Vec<AtomicU64>,
    count: AtomicU64,
    sum: AtomicU64,
}

/// Point-in-time copy of a histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSnapshot {
    /// `(upper bound, cumulative count)` per finite bucket, ascending.
    pub buckets: Vec<(f64, u64)>,
    pub sum: f64,
    pub count: u64,
}

impl Histogram {
    pub(crate) fn new(name: &str, help: &str, bounds: Vec<f64>) -> Self {
        let buckets = bounds.iter().map(|_| AtomicU64::new(0)).collect();
        Self {
            inner: Arc::new(HistogramInner {
                name: name.to_string(),
                help: help.to_string(),
                bounds,
                buckets,
                count: AtomicU64::new(0),
                sum: AtomicU64::new(0f64.to_bits()),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn bounds(&self) -> &[f64] {
        &self.inner.bounds
    }

    /// Record one value in seconds. Negative and NaN values are rejected.
    pub fn observe(&self, value: f64) -> Result<(), MetricsError> {
        if value.is_nan() || value < 0.0 {
            return Err(MetricsError::InvalidObservation {
                name: self.inner.name.clone(),
                value,
            });
        }
        self.record(value);
        Ok(())
    }

    /// Record an elapsed duration; cannot be negative, so cannot fail.
    pub fn observe_duration(&self, elapsed: Duration) {
        self.record(elapsed.as_secs_f64());
    }

    // Write order is count, sum, then buckets from the highest bound down.
    // `snapshot` reads buckets lowest first and count last, so a reader never
    // sees a lower bucket ahead of a higher one or any bucket ahead of count.
    fn record(&self, value: f64) {
        let inner = &self.inner;
        inner.count.fetch_add(1, Ordering::AcqRel);
        add_f64(&inner.sum, value);

        let first = inner.bounds.partition_point(|b| *b < value);
        for bucket in inner.buckets[first..].iter().rev() {
            bucket.fetch_add(1, Ordering::AcqRel);
        }
    }

    pub fn snapshot(&self) -> HistogramSnapshot {
        let inner = &self.inner;
        let buckets = inner
            .bounds
            .iter()
            .zip(&inner.buckets)
            .map(|(b, c)| (*b, c.load(Ordering::Acquire)))
            .collect();
        let sum = f64::from_bits(inner.sum.load(Ordering::Acquire));
        let count = inner.count.load(Ordering::Acquire);
        HistogramSnapshot { buckets, sum, count }
    }

    pub(crate) fn render(&self, out: &mut String) {
        let name = &self.inner.name;
        text::write_preamble(out, name, &self.inner.help, "histogram");

        let snap = self.snapshot();
        for (le, count) in &snap.buckets {
            let _ = writeln!(out, "{}_bucket{{le=\"{}\"}} {}", name, text::format_float(*le), count);
        }
        let _ = writeln!(out, "{}_bucket{{le=\"+Inf\"}} {}", name, snap.count);
        let _ = writeln!(out, "{}_sum {}", name, text::format_float(snap.sum));
        let _ = writeln!(out, "{}_count {}", name, snap.count);
    }
}
