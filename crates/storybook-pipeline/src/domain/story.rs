//! Story request and result contracts.

use serde::{Deserialize, Serialize};
use storybook_core::error::StoryError;

/// User-facing message for incomplete input.
pub const MISSING_FIELDS_MESSAGE: &str = "Please provide both a name and a story prompt";

/// Inbound story request.
///
/// Missing fields deserialize as empty strings so that they are reported by
/// [`StoryRequest::validate`] instead of by the JSON extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StoryRequest {
    /// Name of the story's main character.
    #[serde(default)]
    pub name: String,
    /// The story idea.
    #[serde(default)]
    pub prompt: String,
}

impl StoryRequest {
    /// Creates a request from its two fields.
    #[must_use]
    pub fn new(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
        }
    }

    /// Checks that both fields carry non-whitespace text.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::Validation` if either field is blank.
    pub fn validate(&self) -> Result<(), StoryError> {
        if self.name.trim().is_empty() || self.prompt.trim().is_empty() {
            return Err(StoryError::Validation(MISSING_FIELDS_MESSAGE.to_owned()));
        }
        Ok(())
    }
}

/// A generated story and its illustration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryResult {
    story: String,
    image_url: String,
}

impl StoryResult {
    /// Assembles a result from both upstream outputs.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::UpstreamEmptyResult` if either value is empty.
    pub fn new(story: String, image_url: String) -> Result<Self, StoryError> {
        if story.trim().is_empty() {
            return Err(StoryError::UpstreamEmptyResult { what: "story text" });
        }
        if image_url.trim().is_empty() {
            return Err(StoryError::UpstreamEmptyResult { what: "image url" });
        }
        Ok(Self { story, image_url })
    }

    /// The story text.
    #[must_use]
    pub fn story(&self) -> &str {
        &self.story
    }

    /// The illustration URL.
    #[must_use]
    pub fn image_url(&self) -> &str {
        &self.image_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_complete_request() {
        let request = StoryRequest::new("Mia", "a dragon who bakes bread");

        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let cases = [
            StoryRequest::new("", "a dragon"),
            StoryRequest::new("Mia", ""),
            StoryRequest::new("   ", "a dragon"),
            StoryRequest::new("Mia", "\n\t"),
            StoryRequest::default(),
        ];

        for request in cases {
            let err = request.validate().unwrap_err();
            assert!(
                matches!(&err, StoryError::Validation(msg) if msg == MISSING_FIELDS_MESSAGE),
                "unexpected error for {request:?}: {err:?}"
            );
        }
    }

    #[test]
    fn test_missing_fields_deserialize_as_empty() {
        let request: StoryRequest = serde_json::from_str(r#"{"prompt":"a dragon"}"#).unwrap();

        assert_eq!(request.name, "");
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_result_serializes_image_url_in_camel_case() {
        let result = StoryResult::new(
            "Once upon a time...".into(),
            "https://example/img.png".into(),
        )
        .unwrap();

        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "story": "Once upon a time...",
                "imageUrl": "https://example/img.png",
            })
        );
    }

    #[test]
    fn test_result_rejects_empty_parts() {
        assert!(matches!(
            StoryResult::new(String::new(), "https://example/img.png".into()),
            Err(StoryError::UpstreamEmptyResult { what: "story text" })
        ));
        assert!(matches!(
            StoryResult::new("Once".into(), String::new()),
            Err(StoryError::UpstreamEmptyResult { what: "image url" })
        ));
    }
}
