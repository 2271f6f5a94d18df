//! Generation abstractions.
//!
//! Request payloads for the two external providers and the traits the
//! pipeline calls them through. Production implementations live in
//! `storybook-openai`; tests inject mocks from `storybook-test-support`.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::StoryError;

/// Token ceiling for a generated story.
pub const STORY_MAX_TOKENS: u32 = 200;

/// Sampling temperature for a generated story.
pub const STORY_TEMPERATURE: f64 = 0.7;

/// Edge length requested for generated images.
pub const IMAGE_SIZE: &str = "1024x1024";

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Instructions that frame the conversation.
    System,
    /// Input supplied on behalf of the end user.
    User,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    /// Who wrote the message.
    pub role: ChatRole,
    /// Message text.
    pub content: String,
}

/// Payload for a chat completion call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    /// Model identifier.
    pub model: String,
    /// Ordered conversation.
    pub messages: Vec<ChatMessage>,
    /// Token ceiling.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

/// Format in which a generated image is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageResponseFormat {
    /// A hosted URL.
    Url,
}

/// Payload for an image generation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageGenerationRequest {
    /// Text description of the image.
    pub prompt: String,
    /// Number of images.
    pub n: u8,
    /// Image dimensions.
    pub size: &'static str,
    /// How the image is returned.
    pub response_format: ImageResponseFormat,
}

impl ImageGenerationRequest {
    /// Requests exactly one 1024x1024 image returned as a URL.
    #[must_use]
    pub fn single_url(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            n: 1,
            size: IMAGE_SIZE,
            response_format: ImageResponseFormat::Url,
        }
    }
}

/// Produces story text from a chat completion request.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Makes a single attempt and returns the first completion's content.
    async fn generate(&self, request: &ChatCompletionRequest) -> Result<String, StoryError>;
}

/// Produces an image URL from an image prompt.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Makes a single attempt and returns the generated image's URL.
    async fn generate(&self, image_prompt: &str) -> Result<String, StoryError>;
}
