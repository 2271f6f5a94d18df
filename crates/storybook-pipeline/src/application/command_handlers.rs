//! Command handlers for the story pipeline.
//!
//! `handle_generate_story` runs one request through
//! `Received → Validated → TextPending → ImagePending → Succeeded`.
//! Any failure stops the pipeline; no partial result leaves this module.

use std::fmt;

use storybook_core::error::StoryError;
use storybook_core::generation::{ImageGenerator, TextGenerator};
use tracing::{debug, error, info, instrument, warn};

use crate::domain::commands::GenerateStory;
use crate::domain::prompt::PromptComposer;
use crate::domain::sanitizer::to_image_prompt;
use crate::domain::story::StoryResult;

/// Lifecycle stages of a story request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// The request arrived.
    Received,
    /// Both fields are present.
    Validated,
    /// Waiting on the text provider.
    TextPending,
    /// Waiting on the image provider.
    ImagePending,
    /// Both providers delivered.
    Succeeded,
    /// Admission control turned the request away.
    RejectedRateLimit,
    /// Input was incomplete.
    RejectedValidation,
    /// A provider call failed or came back empty.
    FailedUpstream,
}

impl PipelineStage {
    /// Stable name used in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Validated => "validated",
            Self::TextPending => "text_pending",
            Self::ImagePending => "image_pending",
            Self::Succeeded => "succeeded",
            Self::RejectedRateLimit => "rejected_rate_limit",
            Self::RejectedValidation => "rejected_validation",
            Self::FailedUpstream => "failed_upstream",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn upstream_failure(during: PipelineStage, err: StoryError) -> StoryError {
    error!(
        stage = %PipelineStage::FailedUpstream,
        during = %during,
        error = %err,
        "story generation failed"
    );
    err
}

/// Handles the `GenerateStory` command: validates input, generates the
/// story text, derives an image prompt from it, generates the image, and
/// assembles the result.
///
/// The image call starts only after the text call has returned non-empty
/// content.
///
/// # Errors
///
/// Returns `StoryError::Validation` for incomplete input (no provider is
/// called), or the provider's error for any upstream failure.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id))]
pub async fn handle_generate_story(
    command: &GenerateStory,
    composer: &PromptComposer,
    text_generator: &dyn TextGenerator,
    image_generator: &dyn ImageGenerator,
) -> Result<StoryResult, StoryError> {
    debug!(stage = %PipelineStage::Received, "story request received");

    if let Err(err) = command.request.validate() {
        warn!(stage = %PipelineStage::RejectedValidation, "story request rejected");
        return Err(err);
    }
    debug!(stage = %PipelineStage::Validated, "story request validated");

    let chat_request = composer.compose(&command.request.name, &command.request.prompt);

    debug!(stage = %PipelineStage::TextPending, model = %chat_request.model, "requesting story text");
    let story = text_generator
        .generate(&chat_request)
        .await
        .map_err(|err| upstream_failure(PipelineStage::TextPending, err))?;
    if story.trim().is_empty() {
        return Err(upstream_failure(
            PipelineStage::TextPending,
            StoryError::UpstreamEmptyResult { what: "story text" },
        ));
    }

    let image_prompt = to_image_prompt(&story);

    debug!(stage = %PipelineStage::ImagePending, image_prompt = %image_prompt, "requesting illustration");
    let image_url = image_generator
        .generate(&image_prompt)
        .await
        .map_err(|err| upstream_failure(PipelineStage::ImagePending, err))?;

    let result = StoryResult::new(story, image_url)
        .map_err(|err| upstream_failure(PipelineStage::ImagePending, err))?;

    info!(stage = %PipelineStage::Succeeded, "story generated");
    Ok(result)
}
