//! Storybook OpenAI — provider clients.
//!
//! reqwest-backed implementations of `TextGenerator` and `ImageGenerator`
//! speaking the OpenAI chat completion and image generation contracts.
//! Each call is a single attempt; there is no retry.

pub mod image;
pub mod settings;
pub mod text;
mod transport;
mod wire;

pub use image::ImageGenerationClient;
pub use settings::{DEFAULT_BASE_URL, OpenAiSettings};
pub use text::TextGenerationClient;
