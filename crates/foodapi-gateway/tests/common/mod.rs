#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::collections::HashMap;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use foodapi_gateway::{app_state::AppState, config::FoodApiConfig};

pub fn state() -> AppState {
    AppState::new(FoodApiConfig::default()).expect("state")
}

pub fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Drive one request through the router in-process.
pub async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, String) {
    let res = app.clone().oneshot(request(method, uri)).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Parse sample lines of the text exposition format into
/// `series (name plus label set) -> value`. Comment lines are skipped.
pub fn parse_exposition(text: &str) -> HashMap<String, f64> {
    text.lines()
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|l| {
            let (series, value) = l.rsplit_once(' ').expect("sample line");
            let value = match value {
                "+Inf" => f64::INFINITY,
                v => v.parse::<f64>().expect("numeric sample"),
            };
            (series.to_string(), value)
        })
        .collect()
}
