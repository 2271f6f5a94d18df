//! Shared test mocks and utilities for the Storybook story generator.

mod clock;
mod generators;

pub use clock::{FixedClock, ManualClock};
pub use generators::{
    FailingImageGenerator, FailingTextGenerator, StubImageGenerator, StubTextGenerator,
};
