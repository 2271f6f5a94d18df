//! Commands for the story pipeline.

use uuid::Uuid;

use super::story::StoryRequest;

/// Command to generate an illustrated story.
#[derive(Debug, Clone)]
pub struct GenerateStory {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The caller's input, not yet validated.
    pub request: StoryRequest,
}
