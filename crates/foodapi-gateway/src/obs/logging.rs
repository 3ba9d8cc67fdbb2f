//! HTTP request logging.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Middleware: one `info` event per completed request.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = Instant::now();

    let res = next.run(req).await;

    let latency_ms = started.elapsed().as_secs_f64() * 1_000.0;
    tracing::info!(
        %method,
        %path,
        status = res.status().as_u16(),
        latency_ms,
        "http request"
    );
    res
}
