//! Sprachreise domain - story-mode progress for the German learning game.
//!
//! Pure, synchronous, I/O-free. Holds the scenario catalog, the player's
//! `GameProgress` aggregate with its completion rules, and the unlock policy
//! that gates the story map.

pub mod aggregates;
pub mod catalog;
pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod unlock;
pub mod value_objects;

pub use aggregates::{GameProgress, ProgressSnapshot};
pub use catalog::{CatalogState, ScenarioCatalog};
pub use entities::{CompletionRecord, DedupKey, GameKind, Scenario, ScenarioConfig};
pub use error::{DomainError, InvalidCompletionError};
pub use events::{CompletionChange, CompletionOutcome};
pub use ids::{PlayerId, ScenarioId};
pub use unlock::{is_unlocked, scenario_status, story_map, ScenarioMarker, ScenarioStatus};
pub use value_objects::{DifficultyLevel, MapPosition, ScenarioName, Score};
