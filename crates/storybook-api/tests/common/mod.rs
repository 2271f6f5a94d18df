//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::num::NonZeroU32;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use storybook_core::clock::Clock;
use storybook_core::generation::{ImageGenerator, TextGenerator};
use storybook_pipeline::application::rate_limiter::{RateLimitPolicy, RateLimiter};
use storybook_pipeline::domain::prompt::PromptComposer;
use storybook_test_support::FixedClock;
use tower::ServiceExt;

use storybook_api::routes;
use storybook_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Build the full app router with the given providers and a generous quota.
pub fn build_test_app(
    text_generator: Arc<dyn TextGenerator>,
    image_generator: Arc<dyn ImageGenerator>,
) -> Router {
    build_test_app_with_quota(text_generator, image_generator, 100)
}

/// Build the full app router with the given providers and `max_requests`
/// per 15-minute window. Clients are keyed by `X-Forwarded-For`.
pub fn build_test_app_with_quota(
    text_generator: Arc<dyn TextGenerator>,
    image_generator: Arc<dyn ImageGenerator>,
    max_requests: u32,
) -> Router {
    let policy = RateLimitPolicy::new(
        NonZeroU32::new(max_requests).unwrap(),
        NonZeroU32::new(900).unwrap(),
    );
    let rate_limiter = Arc::new(RateLimiter::new(policy, fixed_clock()));
    let app_state = AppState::new(
        PromptComposer::default(),
        text_generator,
        image_generator,
        rate_limiter,
    )
    .with_trust_forwarded_for(true);

    routes::app(app_state)
}

/// Send a POST request with a JSON body from `client` and return the
/// response status, headers and body.
pub async fn post_json_from(
    app: Router,
    client: &str,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, HeaderMap, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-forwarded-for", client)
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, headers, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let (status, _, json) = post_json_from(app, "198.51.100.1", uri, body).await;
    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
