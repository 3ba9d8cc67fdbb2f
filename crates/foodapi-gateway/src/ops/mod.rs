//! Operational HTTP endpoints.
//!
//! - `/health`  : liveness
//! - `/metrics` : Prometheus text format (path configurable)
//! - fallback   : 404 JSON

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use foodapi_core::{error::FoodApiError, metrics::TEXT_CONTENT_TYPE};
use serde_json::json;

use crate::{app_state::AppState, error::HttpError};

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "ok": true })))
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.metrics().render();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)],
        body,
    )
        .into_response()
}

pub async fn not_found() -> HttpError {
    HttpError(FoodApiError::NotFound)
}
