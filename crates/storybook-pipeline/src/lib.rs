//! Storybook — story request orchestration pipeline.
//!
//! Responsible for admission control, input validation, prompt composition,
//! sanitization of generated text, and sequencing the text and image
//! provider calls.

pub mod application;
pub mod domain;
