//! HTTP mapping for [`FoodApiError`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use foodapi_core::error::{ClientCode, FoodApiError};
use serde_json::json;
use thiserror::Error;

/// Handler-facing error; renders as `{"error": CODE, "message": ...}`.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct HttpError(#[from] pub FoodApiError);

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let status = match code {
            ClientCode::BadRequest => StatusCode::BAD_REQUEST,
            ClientCode::NotFound => StatusCode::NOT_FOUND,
            ClientCode::Config | ClientCode::Metrics | ClientCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(json!({
            "error": code.as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
