//! Storybook Core — shared abstractions.
//!
//! This crate defines the traits and types that the pipeline, the provider
//! clients and the HTTP layer all depend on. It contains no infrastructure
//! code.

pub mod clock;
pub mod error;
pub mod generation;
