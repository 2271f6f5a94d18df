//! Response payloads returned by the provider.
//!
//! Only the fields the pipeline reads are modelled; everything else is
//! ignored during deserialization.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageGenerationResponse {
    pub data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeneratedImage {
    pub url: Option<String>,
}
