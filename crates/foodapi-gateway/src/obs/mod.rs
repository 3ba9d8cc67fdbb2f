//! Observability: metric handles, the per-request observer and HTTP logging.

pub mod logging;
pub mod metrics;
pub mod observer;

pub use metrics::FoodApiMetrics;
pub use observer::{named, observe_requests, RouteSlot, UNKNOWN_ENDPOINT};
