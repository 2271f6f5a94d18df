//! Domain layer for the story pipeline.

pub mod commands;
pub mod prompt;
pub mod sanitizer;
pub mod story;
