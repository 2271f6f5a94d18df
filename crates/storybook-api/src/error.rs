//! Storybook — API error types.

use axum::Json;
use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use storybook_core::error::StoryError;
use thiserror::Error;

/// Message returned for every upstream or internal failure.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Message returned when a client exceeds its quota.
pub const RATE_LIMITED_MESSAGE: &str = "Too many requests, please try again later";

/// Startup errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The outbound HTTP client could not be built.
    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub error: String,
}

/// HTTP-layer wrapper around `StoryError` that implements `IntoResponse`.
///
/// Validation messages pass through; everything else collapses to a
/// generic message so provider detail never reaches the caller.
#[derive(Debug)]
pub struct ApiError(pub StoryError);

impl From<StoryError> for ApiError {
    fn from(err: StoryError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            StoryError::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
            StoryError::RateLimitExceeded { .. } => {
                (StatusCode::TOO_MANY_REQUESTS, RATE_LIMITED_MESSAGE.to_owned())
            }
            StoryError::UpstreamText(_)
            | StoryError::UpstreamImage(_)
            | StoryError::UpstreamEmptyResult { .. }
            | StoryError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                GENERIC_ERROR_MESSAGE.to_owned(),
            ),
        };

        let mut response = (status, Json(ErrorBody { error: message })).into_response();

        if let StoryError::RateLimitExceeded { retry_after_secs } = self.0 {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(retry_after_secs));
        }

        response
    }
}
