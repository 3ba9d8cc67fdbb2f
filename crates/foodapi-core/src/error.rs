//! Shared error type across foodapi crates.

use thiserror::Error;

use crate::metrics::MetricsError;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request.
    BadRequest,
    /// No route matched.
    NotFound,
    /// Configuration rejected at startup.
    Config,
    /// Metric registration or observation rejected.
    Metrics,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::Config => "CONFIG",
            ClientCode::Metrics => "METRICS",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, FoodApiError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum FoodApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found")]
    NotFound,
    #[error("config: {0}")]
    Config(String),
    #[error("metrics: {0}")]
    Metrics(#[from] MetricsError),
    #[error("internal: {0}")]
    Internal(String),
}

impl FoodApiError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            FoodApiError::BadRequest(_) => ClientCode::BadRequest,
            FoodApiError::NotFound => ClientCode::NotFound,
            FoodApiError::Config(_) => ClientCode::Config,
            FoodApiError::Metrics(_) => ClientCode::Metrics,
            FoodApiError::Internal(_) => ClientCode::Internal,
        }
    }
}
