use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use super::text;
use super::MetricsError;

/// Monotonic counter partitioned by a fixed, ordered list of label names.
///
/// Series are keyed by their label values in declaration order and created on
/// first increment. They are never removed.
#[derive(Clone)]
pub struct Counter {
    inner: Arc<CounterInner>,
}

struct CounterInner {
    name: String,
    help: String,
    label_names: Vec<String>,
    series: DashMap<Vec<String>, AtomicU64>,
}

impl Counter {
    pub(crate) fn new(name: &str, help: &str, label_names: Vec<String>) -> Self {
        let series = DashMap::new();
        // An unlabelled counter always has exactly one series; expose it at 0.
        if label_names.is_empty() {
            series.insert(Vec::new(), AtomicU64::new(0));
        }
        Self {
            inner: Arc::new(CounterInner {
                name: name.to_string(),
                help: help.to_string(),
                label_names,
                series,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn label_names(&self) -> &[String] {
        &self.inner.label_names
    }

    /// Increment by 1.
    pub fn inc(&self, label_values: &[&str]) -> Result<(), MetricsError> {
        self.add(label_values, 1)
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, label_values: &[&str], v: u64) -> Result<(), MetricsError> {
        let key = self.key(label_values)?;

        // Fast path: existing series only needs a shard read lock.
        if let Some(counter) = self.inner.series.get(&key) {
            counter.fetch_add(v, Ordering::Relaxed);
            return Ok(());
        }
        let counter = self.inner.series.entry(key).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
        Ok(())
    }

    /// Current value of one series; 0 if it has never been incremented.
    pub fn get(&self, label_values: &[&str]) -> Result<u64, MetricsError> {
        let key = self.key(label_values)?;
        Ok(self
            .inner
            .series
            .get(&key)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0))
    }

    /// Number of distinct label-value tuples seen so far.
    pub fn series_count(&self) -> usize {
        self.inner.series.len()
    }

    fn key(&self, label_values: &[&str]) -> Result<Vec<String>, MetricsError> {
        if label_values.len() != self.inner.label_names.len() {
            return Err(MetricsError::LabelArity {
                name: self.inner.name.clone(),
                expected: self.inner.label_names.len(),
                got: label_values.len(),
            });
        }
        Ok(label_values.iter().map(|v| v.to_string()).collect())
    }

    pub(crate) fn render(&self, out: &mut String) {
        let name = &self.inner.name;
        text::write_preamble(out, name, &self.inner.help, "counter");

        let mut rows: Vec<(Vec<String>, u64)> = self
            .inner
            .series
            .iter()
            .map(|r| (r.key().clone(), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        for (values, v) in rows {
            let labels = text::label_set(&self.inner.label_names, &values);
            let _ = writeln!(out, "{}{} {}", name, labels, v);
        }
    }
}
