//! Progress-related domain events

use crate::entities::CompletionRecord;
use crate::value_objects::Score;

/// What recording a session result did to the stored completion record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionChange {
    /// First completion of this scenario at this level
    Recorded { record: CompletionRecord },
    /// The new score beat the stored one
    Improved {
        previous: Score,
        record: CompletionRecord,
    },
    /// The new score did not beat the stored one; nothing changed
    Unchanged { best: Score, attempted: Score },
}

impl CompletionChange {
    /// Whether the aggregate was modified.
    pub fn is_change(&self) -> bool {
        !matches!(self, CompletionChange::Unchanged { .. })
    }
}

/// Outcome of `GameProgress::record_completion`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOutcome {
    pub change: CompletionChange,
    /// Story-mode flag after the mutation
    pub story_mode_completed: bool,
    /// True only for the call that completed story mode
    pub story_mode_newly_completed: bool,
}
