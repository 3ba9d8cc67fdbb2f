use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::text;

/// Single floating point value that can go up and down.
///
/// Stored as `f64` bits in an `AtomicU64`.
#[derive(Clone)]
pub struct Gauge {
    inner: Arc<GaugeInner>,
}

struct GaugeInner {
    name: String,
    help: String,
    bits: AtomicU64,
}

impl Gauge {
    pub(crate) fn new(name: &str, help: &str) -> Self {
        Self {
            inner: Arc::new(GaugeInner {
                name: name.to_string(),
                help: help.to_string(),
                bits: AtomicU64::new(0f64.to_bits()),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn set(&self, v: f64) {
        self.inner.bits.store(v.to_bits(), Ordering::Relaxed);
    }

    pub fn add(&self, v: f64) {
        add_f64(&self.inner.bits, v);
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.inner.bits.load(Ordering::Relaxed))
    }

    pub(crate) fn render(&self, out: &mut String) {
        let name = &self.inner.name;
        text::write_preamble(out, name, &self.inner.help, "gauge");
        let _ = writeln!(out, "{} {}", name, text::format_float(self.get()));
    }
}

/// CAS loop adding `v` to an `f64` stored as bits.
pub(crate) fn add_f64(bits: &AtomicU64, v: f64) {
    let mut current = bits.load(Ordering::Relaxed);
    loop {
        let next = (f64::from_bits(current) + v).to_bits();
        match bits.compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Relaxed) {
            Ok(_) => return,
            Err(actual) => current = actual,
        }
    }
}
