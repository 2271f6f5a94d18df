//! Application layer for the story pipeline.

pub mod command_handlers;
pub mod rate_limiter;
