//! Aggregate mutation events
//!
//! Return types from `GameProgress` mutations, communicating what happened when
//! a finished game session was merged into the player's progress.

pub mod progress_events;

pub use progress_events::*;
