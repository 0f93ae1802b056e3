//! Use cases - User story orchestration.
//!
//! Use cases orchestrate the progress store and the infrastructure ports.

pub mod story_mode;

pub use story_mode::StoryModeUseCases;
