//! Mock `TextGenerator` and `ImageGenerator` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use storybook_core::error::StoryError;
use storybook_core::generation::{ChatCompletionRequest, ImageGenerator, TextGenerator};

/// A text generator that returns the same story on every call and records
/// each request it receives.
#[derive(Debug)]
pub struct StubTextGenerator {
    story: String,
    requests: Mutex<Vec<ChatCompletionRequest>>,
}

impl StubTextGenerator {
    /// Create a generator that answers every call with `story`.
    #[must_use]
    pub fn new(story: impl Into<String>) -> Self {
        Self {
            story: story.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all requests received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StubTextGenerator {
    async fn generate(&self, request: &ChatCompletionRequest) -> Result<String, StoryError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.story.clone())
    }
}

/// A text generator that always fails as if the provider were unreachable.
#[derive(Debug)]
pub struct FailingTextGenerator;

#[async_trait]
impl TextGenerator for FailingTextGenerator {
    async fn generate(&self, _request: &ChatCompletionRequest) -> Result<String, StoryError> {
        Err(StoryError::UpstreamText("connection refused".into()))
    }
}

/// An image generator that returns the same URL on every call and records
/// each prompt it receives.
#[derive(Debug)]
pub struct StubImageGenerator {
    url: String,
    prompts: Mutex<Vec<String>>,
}

impl StubImageGenerator {
    /// Create a generator that answers every call with `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all prompts received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for StubImageGenerator {
    async fn generate(&self, image_prompt: &str) -> Result<String, StoryError> {
        self.prompts.lock().unwrap().push(image_prompt.to_owned());
        Ok(self.url.clone())
    }
}

/// An image generator that always fails as if the provider returned an error.
#[derive(Debug)]
pub struct FailingImageGenerator;

#[async_trait]
impl ImageGenerator for FailingImageGenerator {
    async fn generate(&self, _image_prompt: &str) -> Result<String, StoryError> {
        Err(StoryError::UpstreamImage("provider returned 500".into()))
    }
}
