//! Completion records - the best result a player achieved per scenario and level

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::ScenarioId;
use crate::value_objects::{DifficultyLevel, Score};

/// Identity of a completion record. The progress aggregate holds at most one
/// record per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DedupKey {
    scenario_id: ScenarioId,
    level: DifficultyLevel,
}

impl DedupKey {
    pub fn new(scenario_id: ScenarioId, level: DifficultyLevel) -> Self {
        Self { scenario_id, level }
    }

    pub fn scenario_id(&self) -> &ScenarioId {
        &self.scenario_id
    }

    pub fn level(&self) -> DifficultyLevel {
        self.level
    }
}

impl fmt::Display for DedupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.scenario_id, self.level)
    }
}

/// Best score a player has reached for one scenario at one difficulty level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    scenario_id: ScenarioId,
    difficulty_level: DifficultyLevel,
    score: Score,
    completed_at: DateTime<Utc>,
}

impl CompletionRecord {
    pub fn new(
        scenario_id: ScenarioId,
        difficulty_level: DifficultyLevel,
        score: Score,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            scenario_id,
            difficulty_level,
            score,
            completed_at,
        }
    }

    #[inline]
    pub fn scenario_id(&self) -> &ScenarioId {
        &self.scenario_id
    }

    #[inline]
    pub fn difficulty_level(&self) -> DifficultyLevel {
        self.difficulty_level
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    /// When the current best score was reached.
    #[inline]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    pub fn key(&self) -> DedupKey {
        DedupKey::new(self.scenario_id.clone(), self.difficulty_level)
    }

    /// Replace the stored result if `score` beats it. Returns the previous
    /// score when an update happened.
    pub(crate) fn improve(&mut self, score: Score, now: DateTime<Utc>) -> Option<Score> {
        if score > self.score {
            let previous = self.score;
            self.score = score;
            self.completed_at = now;
            Some(previous)
        } else {
            None
        }
    }
}
