//! foodapi gateway library entry.
//!
//! Wires config, metrics, the request observer and the route handlers into an
//! axum router. Consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod error;
pub mod obs;
pub mod ops;
pub mod router;
pub mod services;
