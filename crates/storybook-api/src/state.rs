//! Shared application state.

use std::sync::Arc;

use storybook_core::generation::{ImageGenerator, TextGenerator};
use storybook_pipeline::application::rate_limiter::RateLimiter;
use storybook_pipeline::domain::prompt::PromptComposer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Builds chat payloads.
    pub composer: Arc<PromptComposer>,
    /// Story text provider.
    pub text_generator: Arc<dyn TextGenerator>,
    /// Illustration provider.
    pub image_generator: Arc<dyn ImageGenerator>,
    /// Per-client admission control, shared for the server's lifetime.
    pub rate_limiter: Arc<RateLimiter>,
    /// Key clients by the first `X-Forwarded-For` entry.
    pub trust_forwarded_for: bool,
}

impl AppState {
    /// Create new application state. Clients are keyed by peer address.
    #[must_use]
    pub fn new(
        composer: PromptComposer,
        text_generator: Arc<dyn TextGenerator>,
        image_generator: Arc<dyn ImageGenerator>,
        rate_limiter: Arc<RateLimiter>,
    ) -> Self {
        Self {
            composer: Arc::new(composer),
            text_generator,
            image_generator,
            rate_limiter,
            trust_forwarded_for: false,
        }
    }

    /// Key clients by the first `X-Forwarded-For` entry when `trust` is set.
    #[must_use]
    pub fn with_trust_forwarded_for(mut self, trust: bool) -> Self {
        self.trust_forwarded_for = trust;
        self
    }
}
