//! Histogram bucket layouts.

use serde::Deserialize;

use super::MetricsError;

/// `count` bounds starting at `start`, each `factor` times the previous.
pub fn exponential_buckets(start: f64, factor: f64, count: usize) -> Result<Vec<f64>, MetricsError> {
    if !(start.is_finite() && start > 0.0) {
        return Err(MetricsError::InvalidBucketSpec(format!(
            "exponential start must be positive, got {start}"
        )));
    }
    if !(factor.is_finite() && factor > 1.0) {
        return Err(MetricsError::InvalidBucketSpec(format!(
            "exponential factor must be greater than 1, got {factor}"
        )));
    }
    if count == 0 {
        return Err(MetricsError::InvalidBucketSpec("bucket count must be at least 1".into()));
    }

    let mut out = Vec::with_capacity(count);
    let mut next = start;
    for _ in 0..count {
        out.push(next);
        next *= factor;
    }
    Ok(out)
}

/// `count` bounds starting at `start`, each `width` above the previous.
pub fn linear_buckets(start: f64, width: f64, count: usize) -> Result<Vec<f64>, MetricsError> {
    if !start.is_finite() {
        return Err(MetricsError::InvalidBucketSpec(format!(
            "linear start must be finite, got {start}"
        )));
    }
    if !(width.is_finite() && width > 0.0) {
        return Err(MetricsError::InvalidBucketSpec(format!(
            "linear width must be positive, got {width}"
        )));
    }
    if count == 0 {
        return Err(MetricsError::InvalidBucketSpec("bucket count must be at least 1".into()));
    }

    Ok((0..count).map(|i| start + width * i as f64).collect())
}

/// Exponential layout as it appears in config.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BucketSpec {
    pub start: f64,
    pub factor: f64,
    pub count: usize,
}

impl Default for BucketSpec {
    /// 0.005s doubling twelve times, up to 10.24s.
    fn default() -> Self {
        Self { start: 0.005, factor: 2.0, count: 12 }
    }
}

impl BucketSpec {
    pub fn buckets(&self) -> Result<Vec<f64>, MetricsError> {
        exponential_buckets(self.start, self.factor, self.count)
    }
}

pub(crate) fn validate(name: &str, bounds: &[f64]) -> Result<(), MetricsError> {
    let invalid = |reason: &str| MetricsError::InvalidBuckets {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if bounds.is_empty() {
        return Err(invalid("at least one bucket is required"));
    }
    if bounds.iter().any(|b| !b.is_finite()) {
        return Err(invalid("bounds must be finite (+Inf is implicit)"));
    }
    if bounds.windows(2).any(|w| w[0] >= w[1]) {
        return Err(invalid("bounds must be strictly ascending"));
    }
    Ok(())
}
