//! In-process fake provider for client wire tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode, Uri};
use serde_json::Value;
use storybook_openai::OpenAiSettings;

pub const API_KEY: &str = "sk-test";

/// One request as seen by the fake provider.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

/// A provider listening on an ephemeral port that answers every request
/// with a canned status and body.
pub struct FakeProvider {
    pub base_url: String,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl FakeProvider {
    pub async fn spawn(status: StatusCode, response_body: impl Into<String>) -> Self {
        let response_body: String = response_body.into();
        let captured = Arc::new(Mutex::new(Vec::new()));
        let handler_captured = Arc::clone(&captured);

        let app = Router::new().fallback(move |uri: Uri, headers: HeaderMap, body: Bytes| {
            let captured = Arc::clone(&handler_captured);
            let response_body = response_body.clone();
            async move {
                let authorization = headers
                    .get(AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_owned);
                let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
                captured.lock().unwrap().push(CapturedRequest {
                    path: uri.path().to_owned(),
                    authorization,
                    body,
                });
                (status, [(CONTENT_TYPE, "application/json")], response_body)
            }
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/v1"),
            captured,
        }
    }

    pub fn settings(&self) -> OpenAiSettings {
        OpenAiSettings::new(&self.base_url, API_KEY)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().unwrap().clone()
    }
}

/// Settings pointing at a port nothing listens on.
pub async fn unreachable_settings() -> OpenAiSettings {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    OpenAiSettings::new(format!("http://{addr}/v1"), API_KEY)
}
