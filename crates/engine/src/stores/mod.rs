//! Runtime state stores.

mod progress;

pub use progress::{ProgressStore, RecordedCompletion, ScenarioView};
