//! Chat completion client.

use async_trait::async_trait;
use reqwest::Client;
use storybook_core::error::StoryError;
use storybook_core::generation::{ChatCompletionRequest, TextGenerator};
use tracing::debug;

use crate::settings::OpenAiSettings;
use crate::transport::post_json;
use crate::wire::ChatCompletionResponse;

const CHAT_COMPLETIONS_PATH: &str = "chat/completions";

/// Calls `POST {base_url}/chat/completions` and returns the first choice's
/// message content.
#[derive(Debug, Clone)]
pub struct TextGenerationClient {
    http: Client,
    settings: OpenAiSettings,
}

impl TextGenerationClient {
    /// Create a client sharing the given connection pool.
    #[must_use]
    pub fn new(http: Client, settings: OpenAiSettings) -> Self {
        Self { http, settings }
    }
}

#[async_trait]
impl TextGenerator for TextGenerationClient {
    async fn generate(&self, request: &ChatCompletionRequest) -> Result<String, StoryError> {
        let response: ChatCompletionResponse =
            post_json(&self.http, &self.settings, CHAT_COMPLETIONS_PATH, request)
                .await
                .map_err(|e| StoryError::UpstreamText(e.to_string()))?;

        debug!(choices = response.choices.len(), "chat completion received");

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(StoryError::UpstreamEmptyResult { what: "story text" })
    }
}
