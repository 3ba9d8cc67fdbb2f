//! Request observer middleware.
//!
//! Every request that passes through [`observe_requests`] produces exactly one
//! `foodapi_http_requests_total{method,endpoint,code}` increment and one
//! `foodapi_http_request_duration_seconds` observation. Recording happens in
//! the `Drop` of [`RequestTimer`], so it also runs when the downstream handler
//! panics or the request future is dropped mid-flight. The observer never
//! catches anything: a panic keeps unwinding after the guard has recorded.

use std::sync::{Arc, OnceLock};
use std::time::Instant;

use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::MethodRouter;

use crate::obs::FoodApiMetrics;

/// `endpoint` label for requests that matched no named route.
pub const UNKNOWN_ENDPOINT: &str = "unknown";

/// Per-request cell the matched route writes its display name into.
///
/// The observer inserts one into the request extensions before routing; the
/// layer added by [`named`] fills it once the route has matched. The name is
/// readable even when no response is ever produced.
#[derive(Debug, Clone, Default)]
pub struct RouteSlot(Arc<OnceLock<&'static str>>);

impl RouteSlot {
    /// First write wins.
    pub fn set(&self, name: &'static str) {
        let _ = self.0.set(name);
    }

    pub fn get(&self) -> Option<&'static str> {
        self.0.get().copied()
    }
}

/// Attach a display name to a route; reported as the `endpoint` label.
///
/// Uses `route_layer`, so a `405 Method Not Allowed` from the same path is not
/// attributed to the route.
pub fn named<S>(name: &'static str, route: MethodRouter<S>) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(middleware::map_request::<_, (Request,)>(
        move |req: Request| async move {
            if let Some(slot) = req.extensions().get::<RouteSlot>() {
                slot.set(name);
            }
            req
        },
    ))
}

/// In-flight timer for one request. Records on drop.
pub struct RequestTimer {
    metrics: Arc<FoodApiMetrics>,
    method: Method,
    route: RouteSlot,
    status: StatusCode,
    started: Instant,
}

impl RequestTimer {
    /// Start timing. Status starts out as 200, the status of a response that
    /// was never written.
    pub fn start(metrics: Arc<FoodApiMetrics>, method: Method, route: RouteSlot) -> Self {
        Self {
            metrics,
            method,
            route,
            status: StatusCode::OK,
            started: Instant::now(),
        }
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }
}

impl Drop for RequestTimer {
    fn drop(&mut self) {
        let elapsed = self.started.elapsed();
        let endpoint = self.route.get().unwrap_or(UNKNOWN_ENDPOINT);

        if std::thread::panicking() {
            tracing::warn!(method = %self.method, endpoint, "handler panicked; recording request");
        }

        let labels = [self.method.as_str(), endpoint, self.status.as_str()];
        if let Err(e) = self.metrics.http_requests.inc(&labels) {
            tracing::error!(error = %e, "http request counter rejected labels");
        }
        self.metrics.http_request_duration.observe_duration(elapsed);
    }
}

/// Middleware: time the rest of the pipeline and record one observation.
pub async fn observe_requests(
    State(metrics): State<Arc<FoodApiMetrics>>,
    mut req: Request,
    next: Next,
) -> Response {
    let route = RouteSlot::default();
    req.extensions_mut().insert(route.clone());

    let mut timer = RequestTimer::start(metrics, req.method().clone(), route);
    let res = next.run(req).await;
    timer.set_status(res.status());
    res
}
