//! `POST /orders`.
//!
//! Order creation only counts: no body is read and nothing is stored.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::app_state::AppState;

pub async fn create_order(State(state): State<AppState>) -> impl IntoResponse {
    if let Err(e) = state.metrics().orders_created.inc(&[]) {
        tracing::error!(error = %e, "orders counter rejected increment");
    }
    (StatusCode::ACCEPTED, Json(json!({ "status": "created" })))
}
