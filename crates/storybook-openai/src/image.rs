//! Image generation client.

use async_trait::async_trait;
use reqwest::Client;
use storybook_core::error::StoryError;
use storybook_core::generation::{ImageGenerationRequest, ImageGenerator};
use tracing::debug;

use crate::settings::OpenAiSettings;
use crate::transport::post_json;
use crate::wire::ImageGenerationResponse;

const IMAGE_GENERATIONS_PATH: &str = "images/generations";

/// Calls `POST {base_url}/images/generations` for one 1024x1024 image and
/// returns its URL.
#[derive(Debug, Clone)]
pub struct ImageGenerationClient {
    http: Client,
    settings: OpenAiSettings,
}

impl ImageGenerationClient {
    /// Create a client sharing the given connection pool.
    #[must_use]
    pub fn new(http: Client, settings: OpenAiSettings) -> Self {
        Self { http, settings }
    }
}

#[async_trait]
impl ImageGenerator for ImageGenerationClient {
    async fn generate(&self, image_prompt: &str) -> Result<String, StoryError> {
        let request = ImageGenerationRequest::single_url(image_prompt);

        let response: ImageGenerationResponse =
            post_json(&self.http, &self.settings, IMAGE_GENERATIONS_PATH, &request)
                .await
                .map_err(|e| StoryError::UpstreamImage(e.to_string()))?;

        debug!(images = response.data.len(), "image generation received");

        response
            .data
            .into_iter()
            .next()
            .and_then(|image| image.url)
            .filter(|url| !url.trim().is_empty())
            .ok_or(StoryError::UpstreamEmptyResult { what: "image url" })
    }
}
