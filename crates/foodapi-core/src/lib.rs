//! foodapi core: error surface and in-process metrics primitives.
//!
//! This crate defines the counters, gauges and histograms the HTTP service
//! records into, plus the Prometheus text rendering the scrape endpoint
//! serves. It carries no transport or runtime dependencies so the metrics
//! can be exercised on their own.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed registrations and observations surface as `MetricsError`
//! instead of being dropped.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metrics;

/// Shared result type.
pub use error::{FoodApiError, Result};
