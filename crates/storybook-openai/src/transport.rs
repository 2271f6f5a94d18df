//! Single-attempt JSON POST shared by both clients.

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::settings::OpenAiSettings;

/// Longest slice of an error body kept for logs.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Why a provider call did not yield a decodable body.
#[derive(Debug, Error)]
pub(crate) enum TransportError {
    #[error("request error ({kind}): {source}")]
    Request {
        kind: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("provider returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed response: {0}")]
    Decode(#[source] reqwest::Error),
}

fn request_kind(err: &reqwest::Error) -> &'static str {
    if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connection"
    } else {
        "other"
    }
}

pub(crate) async fn post_json<B, R>(
    http: &Client,
    settings: &OpenAiSettings,
    path: &str,
    body: &B,
) -> Result<R, TransportError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let response = http
        .post(settings.endpoint(path))
        .bearer_auth(settings.api_key())
        .json(body)
        .send()
        .await
        .map_err(|source| TransportError::Request {
            kind: request_kind(&source),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_owned());
        return Err(TransportError::Status {
            status,
            body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        });
    }

    response.json::<R>().await.map_err(TransportError::Decode)
}
