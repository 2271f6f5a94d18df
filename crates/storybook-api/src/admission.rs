//! Admission control middleware.
//!
//! Runs before the story handler so a rejected request never reaches a
//! provider.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use storybook_core::error::StoryError;
use storybook_pipeline::application::command_handlers::PipelineStage;
use storybook_pipeline::application::rate_limiter::Admission;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::AppState;

/// Key shared by requests whose origin cannot be determined.
pub const UNKNOWN_CLIENT: &str = "unknown";

const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Identifies the client behind `request`.
///
/// With `trust_forwarded_for` set the first `X-Forwarded-For` entry wins;
/// otherwise the peer IP is used.
pub fn client_key(request: &Request, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for {
        let forwarded = request
            .headers()
            .get(X_FORWARDED_FOR)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());
        if let Some(ip) = forwarded {
            return ip.to_owned();
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(
            || UNKNOWN_CLIENT.to_owned(),
            |ConnectInfo(addr)| addr.ip().to_string(),
        )
}

/// Rejects the request with 429 once its client has spent the window quota.
///
/// # Errors
///
/// Returns `StoryError::RateLimitExceeded` wrapped in `ApiError`.
pub async fn enforce_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let client = client_key(&request, state.trust_forwarded_for);

    match state.rate_limiter.admit(&client) {
        Admission::Allowed { remaining } => {
            debug!(%client, remaining, "request admitted");
            Ok(next.run(request).await)
        }
        Admission::Rejected { retry_after_secs } => {
            warn!(
                %client,
                retry_after_secs,
                stage = %PipelineStage::RejectedRateLimit,
                "rate limit exceeded"
            );
            Err(ApiError(StoryError::RateLimitExceeded { retry_after_secs }))
        }
    }
}
