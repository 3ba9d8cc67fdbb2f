//! In-process metrics registry with Prometheus text exposition.
//!
//! Counters, gauges and histograms are registered once at startup and handed
//! out as cheap `Clone` handles. Every increment/observe is a handful of
//! atomic operations; labelled counter series live in a `DashMap` keyed by the
//! label-value tuple and are created lazily on first use. Rendering walks the
//! registry without blocking writers, so a scrape may observe a value that is
//! concurrently being updated.

mod buckets;
mod counter;
mod gauge;
mod histogram;
mod text;

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use thiserror::Error;

pub use buckets::{exponential_buckets, linear_buckets, BucketSpec};
pub use counter::Counter;
pub use gauge::Gauge;
pub use histogram::{Histogram, HistogramSnapshot};

/// Content type served alongside [`Registry::render`] output.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Registration and observation failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    #[error("invalid metric name: {0:?}")]
    InvalidName(String),
    #[error("invalid label name {label:?} on metric {metric}")]
    InvalidLabelName { metric: String, label: String },
    #[error("duplicate label name {label:?} on metric {metric}")]
    DuplicateLabelName { metric: String, label: String },
    #[error("metric {name} already registered: {reason}")]
    Conflict { name: String, reason: &'static str },
    #[error("invalid buckets for {name}: {reason}")]
    InvalidBuckets { name: String, reason: String },
    #[error("invalid bucket layout: {0}")]
    InvalidBucketSpec(String),
    #[error("metric {name} expects {expected} label values, got {got}")]
    LabelArity { name: String, expected: usize, got: usize },
    #[error("metric {name} rejects observation {value}: must be a non-negative number")]
    InvalidObservation { name: String, value: f64 },
}

#[derive(Clone)]
enum Metric {
    Counter(Counter),
    Gauge(Gauge),
    Histogram(Histogram),
}

impl Metric {
    fn render(&self, out: &mut String) {
        match self {
            Metric::Counter(c) => c.render(out),
            Metric::Gauge(g) => g.render(out),
            Metric::Histogram(h) => h.render(out),
        }
    }
}

struct Family {
    seq: u64,
    metric: Metric,
}

/// Process-wide collection of named metrics.
///
/// Construct once at startup and share it (or the handles it returns) with
/// whatever records into it. Families render in registration order.
#[derive(Default)]
pub struct Registry {
    families: DashMap<String, Family>,
    next_seq: AtomicU64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a counter, or return the existing one when `name` is already a
    /// counter with the same label names.
    pub fn counter(&self, name: &str, help: &str, label_names: &[&str]) -> Result<Counter, MetricsError> {
        validate_metric_name(name)?;
        let labels = validate_label_names(name, label_names)?;

        match self.families.entry(name.to_string()) {
            Entry::Occupied(e) => match &e.get().metric {
                Metric::Counter(c) if c.label_names() == labels.as_slice() => Ok(c.clone()),
                Metric::Counter(_) => Err(conflict(name, "label names differ")),
                other => Err(conflict(name, kind_mismatch(other))),
            },
            Entry::Vacant(e) => {
                let counter = Counter::new(name, help, labels);
                e.insert(Family { seq: self.seq(), metric: Metric::Counter(counter.clone()) });
                tracing::debug!(metric = name, "counter registered");
                Ok(counter)
            }
        }
    }

    /// Register an unlabelled gauge, or return the existing one.
    pub fn gauge(&self, name: &str, help: &str) -> Result<Gauge, MetricsError> {
        validate_metric_name(name)?;

        match self.families.entry(name.to_string()) {
            Entry::Occupied(e) => match &e.get().metric {
                Metric::Gauge(g) => Ok(g.clone()),
                other => Err(conflict(name, kind_mismatch(other))),
            },
            Entry::Vacant(e) => {
                let gauge = Gauge::new(name, help);
                e.insert(Family { seq: self.seq(), metric: Metric::Gauge(gauge.clone()) });
                tracing::debug!(metric = name, "gauge registered");
                Ok(gauge)
            }
        }
    }

    /// Register an unlabelled histogram with the given upper bounds (strictly
    /// ascending, finite). The `+Inf` bucket is implicit.
    pub fn histogram(&self, name: &str, help: &str, buckets: &[f64]) -> Result<Histogram, MetricsError> {
        validate_metric_name(name)?;
        buckets::validate(name, buckets)?;

        match self.families.entry(name.to_string()) {
            Entry::Occupied(e) => match &e.get().metric {
                Metric::Histogram(h) if h.bounds() == buckets => Ok(h.clone()),
                Metric::Histogram(_) => Err(conflict(name, "bucket bounds differ")),
                other => Err(conflict(name, kind_mismatch(other))),
            },
            Entry::Vacant(e) => {
                let histogram = Histogram::new(name, help, buckets.to_vec());
                e.insert(Family { seq: self.seq(), metric: Metric::Histogram(histogram.clone()) });
                tracing::debug!(metric = name, buckets = buckets.len(), "histogram registered");
                Ok(histogram)
            }
        }
    }

    /// Names of every registered family, in registration order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<(u64, String)> = self
            .families
            .iter()
            .map(|r| (r.value().seq, r.key().clone()))
            .collect();
        names.sort_unstable_by_key(|(seq, _)| *seq);
        names.into_iter().map(|(_, n)| n).collect()
    }

    /// Render every registered metric in Prometheus text exposition format.
    pub fn render(&self) -> String {
        // Clone the handles out first so no registry shard stays locked while
        // series are rendered.
        let mut metrics: Vec<(u64, Metric)> = self
            .families
            .iter()
            .map(|r| (r.value().seq, r.value().metric.clone()))
            .collect();
        metrics.sort_unstable_by_key(|(seq, _)| *seq);

        let mut out = String::new();
        for (_, m) in &metrics {
            m.render(&mut out);
        }
        out
    }

    fn seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::Relaxed)
    }
}

fn conflict(name: &str, reason: &'static str) -> MetricsError {
    MetricsError::Conflict { name: name.to_string(), reason }
}

fn kind_mismatch(existing: &Metric) -> &'static str {
    match existing {
        Metric::Counter(_) => "registered as a counter",
        Metric::Gauge(_) => "registered as a gauge",
        Metric::Histogram(_) => "registered as a histogram",
    }
}

fn validate_metric_name(name: &str) -> Result<(), MetricsError> {
    let mut chars = name.chars();
    let ok = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
        }
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        Err(MetricsError::InvalidName(name.to_string()))
    }
}

fn validate_label_names(metric: &str, labels: &[&str]) -> Result<Vec<String>, MetricsError> {
    let mut out: Vec<String> = Vec::with_capacity(labels.len());
    for &label in labels {
        let mut chars = label.chars();
        let well_formed = match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        };
        // `__` is reserved for internal use; `le` belongs to histogram buckets.
        if !well_formed || label.starts_with("__") || label == "le" {
            return Err(MetricsError::InvalidLabelName {
                metric: metric.to_string(),
                label: label.to_string(),
            });
        }
        if out.iter().any(|l| l == label) {
            return Err(MetricsError::DuplicateLabelName {
                metric: metric.to_string(),
                label: label.to_string(),
            });
        }
        out.push(label.to_string());
    }
    Ok(out)
}
