//! Error taxonomy for the story pipeline.

use thiserror::Error;

/// Top-level error type shared by every stage of the pipeline.
#[derive(Debug, Error)]
pub enum StoryError {
    /// The caller supplied incomplete input. The message is user-facing.
    #[error("{0}")]
    Validation(String),

    /// The client exhausted its quota for the current window.
    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimitExceeded {
        /// Whole seconds until the window resets.
        retry_after_secs: u64,
    },

    /// The text-generation provider could not be reached or answered badly.
    #[error("text generation failed: {0}")]
    UpstreamText(String),

    /// The image-generation provider could not be reached or answered badly.
    #[error("image generation failed: {0}")]
    UpstreamImage(String),

    /// A provider answered successfully but without usable content.
    #[error("upstream returned no {what}")]
    UpstreamEmptyResult {
        /// What was missing, e.g. "story text".
        what: &'static str,
    },

    /// Anything else that should never happen.
    #[error("internal error: {0}")]
    Internal(String),
}

impl StoryError {
    /// Returns `true` for failures caused by an external provider.
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::UpstreamText(_) | Self::UpstreamImage(_) | Self::UpstreamEmptyResult { .. }
        )
    }
}
