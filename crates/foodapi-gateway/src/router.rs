//! Axum router wiring.
//!
//! Layer order, outermost first: request logging, then the metrics scrape
//! route, then the request observer around the API routes and the 404
//! fallback. Scrapes are logged but not observed.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{
    app_state::AppState,
    obs::{self, named},
    ops, services,
};

pub fn build_router(state: AppState) -> Router {
    let metrics_path = state.cfg().metrics.path.clone();

    Router::new()
        .route("/health", named("health", get(ops::health)))
        .route("/orders", named("create_order", post(services::orders::create_order)))
        .fallback(ops::not_found)
        .layer(middleware::from_fn_with_state(state.metrics(), obs::observe_requests))
        .route(&metrics_path, get(ops::metrics))
        .layer(middleware::from_fn(obs::logging::log_requests))
        .with_state(state)
}
