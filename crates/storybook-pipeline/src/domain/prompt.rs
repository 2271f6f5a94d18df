//! Prompt composition for the text-generation call.

use storybook_core::generation::{
    ChatCompletionRequest, ChatMessage, ChatRole, STORY_MAX_TOKENS, STORY_TEMPERATURE,
};

/// Chat model used when none is configured.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

/// Fixed system instruction for every story.
pub const SYSTEM_PROMPT: &str = "You are a children's book writer, please spell check before returning a story. Aim for 50 words and finish the story.";

/// Builds chat completion payloads from user input.
///
/// Inputs are assumed to be validated already.
#[derive(Debug, Clone)]
pub struct PromptComposer {
    model: String,
}

impl PromptComposer {
    /// Creates a composer targeting the given chat model.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    /// The chat model this composer targets.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Builds the request for one story.
    #[must_use]
    pub fn compose(&self, name: &str, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: ChatRole::System,
                    content: SYSTEM_PROMPT.to_owned(),
                },
                ChatMessage {
                    role: ChatRole::User,
                    content: format!("{prompt} use the name {name} in the story"),
                },
            ],
            max_tokens: STORY_MAX_TOKENS,
            temperature: STORY_TEMPERATURE,
        }
    }
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self::new(DEFAULT_CHAT_MODEL)
    }
}
