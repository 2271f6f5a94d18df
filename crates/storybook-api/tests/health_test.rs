//! Integration tests for the health endpoint.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use storybook_test_support::{StubImageGenerator, StubTextGenerator};

#[tokio::test]
async fn test_health_returns_200_with_status_ok() {
    let app = common::build_test_app(
        Arc::new(StubTextGenerator::new("unused")),
        Arc::new(StubImageGenerator::new("unused")),
    );

    let (status, json) = common::get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["chat_model"], "gpt-3.5-turbo");
}

#[tokio::test]
async fn test_health_is_not_rate_limited() {
    let app = common::build_test_app_with_quota(
        Arc::new(StubTextGenerator::new("unused")),
        Arc::new(StubImageGenerator::new("unused")),
        1,
    );

    for _ in 0..3 {
        let (status, _) = common::get_json(app.clone(), "/health").await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = common::build_test_app(
        Arc::new(StubTextGenerator::new("unused")),
        Arc::new(StubImageGenerator::new("unused")),
    );

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/v1/nonexistent")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
