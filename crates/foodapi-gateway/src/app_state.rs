//! Shared application state.
//!
//! Built once at startup and cloned into handlers; holds the config and the
//! metric handles every request records into.

use std::sync::Arc;

use foodapi_core::error::Result;

use crate::config::FoodApiConfig;
use crate::obs::FoodApiMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<FoodApiMetrics>,
}

struct AppStateInner {
    cfg: FoodApiConfig,
}

impl AppState {
    /// Build application state.
    /// Fails if any metric cannot be registered.
    pub fn new(cfg: FoodApiConfig) -> Result<Self> {
        let metrics = FoodApiMetrics::new(&cfg.metrics.duration_buckets)?;
        tracing::debug!(families = ?metrics.registry().names(), "metrics registered");

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg }),
            metrics: Arc::new(metrics),
        })
    }

    pub fn cfg(&self) -> &FoodApiConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> Arc<FoodApiMetrics> {
        Arc::clone(&self.metrics)
    }
}
