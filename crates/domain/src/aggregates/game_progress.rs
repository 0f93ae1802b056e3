//! GameProgress aggregate - one player's story-mode completion state
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: records are only reachable through accessors
//! - **Single mutator**: `record_completion` is the only way to add or improve
//!   a record, so the dedup and best-score rules live in one place
//! - **Events**: mutations return `CompletionOutcome` describing what changed
//! - **Injected time**: callers pass `now`; the aggregate never reads a clock

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogState, ScenarioCatalog};
use crate::entities::{CompletionRecord, DedupKey};
use crate::error::InvalidCompletionError;
use crate::events::{CompletionChange, CompletionOutcome};
use crate::ids::ScenarioId;
use crate::value_objects::{DifficultyLevel, Score};

/// Completion state of one player for the current session.
///
/// # Invariants
///
/// - At most one `CompletionRecord` per `(scenario, level)` pair
/// - A stored score never decreases
/// - Records are never removed, so with a fixed catalog
///   `story_mode_completed` never goes from true back to false
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use sprachreise_domain::{
///     CatalogState, DifficultyLevel, GameProgress, Scenario, ScenarioCatalog, ScenarioId,
///     ScenarioName, Score,
/// };
///
/// let s1 = ScenarioId::new("s1").unwrap();
/// let scenario = Scenario::new(
///     s1.clone(),
///     ScenarioName::new("Accommodation").unwrap(),
///     1,
///     vec![DifficultyLevel::A1],
/// )
/// .unwrap();
/// let catalog = CatalogState::from(ScenarioCatalog::new(vec![scenario]).unwrap());
///
/// let mut progress = GameProgress::new();
/// let outcome = progress
///     .record_completion(&catalog, &s1, DifficultyLevel::A1, Score::new(85), Utc::now())
///     .unwrap();
///
/// assert!(progress.is_scenario_completed(&s1));
/// assert!(outcome.story_mode_newly_completed);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameProgress {
    completions: HashMap<DedupKey, CompletionRecord>,
    story_mode_completed: bool,
}

impl GameProgress {
    /// Empty progress for a player with no completions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild progress from a persisted snapshot.
    ///
    /// Duplicate keys in the snapshot collapse to the record with the higher
    /// score (the earlier record wins a tie). The stored story-mode flag is
    /// kept until the next recompute against a loaded catalog.
    pub fn from_snapshot(snapshot: ProgressSnapshot) -> Self {
        let mut completions: HashMap<DedupKey, CompletionRecord> =
            HashMap::with_capacity(snapshot.records.len());
        for record in snapshot.records {
            let key = record.key();
            match completions.get(&key) {
                Some(existing) if existing.score() >= record.score() => {}
                _ => {
                    completions.insert(key, record);
                }
            }
        }
        Self {
            completions,
            story_mode_completed: snapshot.story_mode_completed,
        }
    }

    /// Serializable copy of the current state, records sorted by key.
    pub fn snapshot(&self) -> ProgressSnapshot {
        let mut records: Vec<CompletionRecord> = self.completions.values().cloned().collect();
        records.sort_by_key(CompletionRecord::key);
        ProgressSnapshot {
            records,
            story_mode_completed: self.story_mode_completed,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn get_completion(
        &self,
        scenario_id: &ScenarioId,
        level: DifficultyLevel,
    ) -> Option<&CompletionRecord> {
        self.completions.get(&DedupKey::new(scenario_id.clone(), level))
    }

    /// A scenario counts as completed once any of its levels has a record.
    pub fn is_scenario_completed(&self, scenario_id: &ScenarioId) -> bool {
        self.completion_count(scenario_id) > 0
    }

    /// Number of distinct levels completed for the scenario (map "stars").
    pub fn completion_count(&self, scenario_id: &ScenarioId) -> usize {
        DifficultyLevel::all()
            .iter()
            .filter(|level| self.get_completion(scenario_id, **level).is_some())
            .count()
    }

    /// All stored records, in no particular order.
    pub fn records(&self) -> impl Iterator<Item = &CompletionRecord> {
        self.completions.values()
    }

    pub fn len(&self) -> usize {
        self.completions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completions.is_empty()
    }

    #[inline]
    pub fn story_mode_completed(&self) -> bool {
        self.story_mode_completed
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Merge a finished game session into the progress.
    ///
    /// Inserts a record for a new `(scenario, level)` pair, or replaces the
    /// stored score and timestamp when `score` is strictly higher. A
    /// non-improving replay leaves the record untouched. Story-mode completion
    /// is recomputed afterwards.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCompletionError` without modifying anything if the
    /// scenario is not in the loaded catalog (or no catalog is loaded), or if
    /// the scenario does not offer `level`.
    pub fn record_completion(
        &mut self,
        catalog: &CatalogState,
        scenario_id: &ScenarioId,
        level: DifficultyLevel,
        score: Score,
        now: DateTime<Utc>,
    ) -> Result<CompletionOutcome, InvalidCompletionError> {
        let scenario = catalog
            .scenario(scenario_id)
            .ok_or_else(|| InvalidCompletionError::UnknownScenario(scenario_id.clone()))?;
        if !scenario.offers_level(level) {
            return Err(InvalidCompletionError::LevelNotAvailable {
                scenario_id: scenario_id.clone(),
                level,
            });
        }

        let key = DedupKey::new(scenario_id.clone(), level);
        let change = match self.completions.entry(key) {
            Entry::Vacant(slot) => {
                let record = CompletionRecord::new(scenario_id.clone(), level, score, now);
                slot.insert(record.clone());
                CompletionChange::Recorded { record }
            }
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                match existing.improve(score, now) {
                    Some(previous) => CompletionChange::Improved {
                        previous,
                        record: existing.clone(),
                    },
                    None => CompletionChange::Unchanged {
                        best: existing.score(),
                        attempted: score,
                    },
                }
            }
        };

        let was_completed = self.story_mode_completed;
        self.refresh_story_mode(catalog);

        Ok(CompletionOutcome {
            change,
            story_mode_completed: self.story_mode_completed,
            story_mode_newly_completed: !was_completed && self.story_mode_completed,
        })
    }

    /// Recompute the story-mode flag against `catalog`.
    ///
    /// Called after every mutation and whenever the catalog is replaced. With
    /// no catalog loaded the flag is left as it is, since required scenarios
    /// cannot be resolved.
    pub fn refresh_story_mode(&mut self, catalog: &CatalogState) -> bool {
        if let Some(catalog) = catalog.catalog() {
            self.story_mode_completed = self.required_scenarios_completed(catalog);
        }
        self.story_mode_completed
    }

    /// True iff every required scenario has a record at some level. A catalog
    /// without required scenarios counts as completed.
    fn required_scenarios_completed(&self, catalog: &ScenarioCatalog) -> bool {
        catalog
            .required()
            .all(|scenario| self.is_scenario_completed(scenario.id()))
    }
}

/// Persisted form of `GameProgress`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub records: Vec<CompletionRecord>,
    #[serde(default)]
    pub story_mode_completed: bool,
}
