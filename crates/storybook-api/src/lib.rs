//! Storybook API — HTTP surface of the story generator.

pub mod admission;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
