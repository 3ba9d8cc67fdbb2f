//! Metric families exported by the service.
//!
//! Everything is registered up front in [`FoodApiMetrics::new`]; a conflict
//! or bad bucket layout fails startup instead of surfacing on the request path.

use std::time::{SystemTime, UNIX_EPOCH};

use foodapi_core::error::Result;
use foodapi_core::metrics::{BucketSpec, Counter, Gauge, Histogram, Registry};

pub const HTTP_REQUESTS_TOTAL: &str = "foodapi_http_requests_total";
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "foodapi_http_request_duration_seconds";
pub const ORDERS_CREATED_TOTAL: &str = "foodapi_orders_created_total";
pub const PROCESS_START_TIME_SECONDS: &str = "foodapi_process_start_time_seconds";

pub struct FoodApiMetrics {
    registry: Registry,
    /// Labels: `method`, `endpoint`, `code`.
    pub http_requests: Counter,
    /// Unlabelled; only the request counter carries method/endpoint/code.
    pub http_request_duration: Histogram,
    pub orders_created: Counter,
    pub process_start_time: Gauge,
}

impl FoodApiMetrics {
    pub fn new(duration_buckets: &BucketSpec) -> Result<Self> {
        let registry = Registry::new();

        let http_requests = registry.counter(
            HTTP_REQUESTS_TOTAL,
            "HTTP requests total",
            &["method", "endpoint", "code"],
        )?;
        let http_request_duration = registry.histogram(
            HTTP_REQUEST_DURATION_SECONDS,
            "HTTP request duration in seconds",
            &duration_buckets.buckets()?,
        )?;
        let orders_created = registry.counter(
            ORDERS_CREATED_TOTAL,
            "Total number of orders created",
            &[],
        )?;
        let process_start_time = registry.gauge(
            PROCESS_START_TIME_SECONDS,
            "Start time of the process since unix epoch in seconds",
        )?;

        let started = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        process_start_time.set(started);

        Ok(Self {
            registry,
            http_requests,
            http_request_duration,
            orders_created,
            process_start_time,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Render all registered metrics in Prometheus text format.
    pub fn render(&self) -> String {
        self.registry.render()
    }
}
