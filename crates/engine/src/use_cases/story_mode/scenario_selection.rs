//! Scenario selection use cases - what the story map shows when a marker is
//! clicked, and launching the mini-game for a chosen level.

use std::sync::Arc;

use serde::Serialize;
use sprachreise_domain::{
    DifficultyLevel, GameKind, Scenario, ScenarioId, ScenarioStatus,
};

use crate::stores::{ProgressStore, ScenarioView};

// =============================================================================
// SelectScenario
// =============================================================================

/// Details panel for one scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioSelection {
    pub scenario: Scenario,
    pub status: ScenarioStatus,
    pub completion_count: usize,
    /// Level preselected in the level picker
    pub default_level: DifficultyLevel,
}

pub struct SelectScenario {
    store: Arc<ProgressStore>,
}

impl SelectScenario {
    pub fn new(store: Arc<ProgressStore>) -> Self {
        Self { store }
    }

    /// `None` if the scenario is not in the loaded catalog.
    pub async fn execute(&self, scenario_id: &ScenarioId) -> Option<ScenarioSelection> {
        let ScenarioView {
            scenario,
            status,
            completion_count,
        } = self.store.scenario_view(scenario_id).await?;
        let default_level = scenario.default_level();

        Some(ScenarioSelection {
            scenario,
            status,
            completion_count,
            default_level,
        })
    }
}

// =============================================================================
// StartScenario
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StartScenarioError {
    #[error("Scenario not found: {0}")]
    UnknownScenario(ScenarioId),
    #[error("Scenario {0} is locked")]
    Locked(ScenarioId),
    #[error("Scenario {scenario_id} is not available at level {level}")]
    LevelNotAvailable {
        scenario_id: ScenarioId,
        level: DifficultyLevel,
    },
}

/// Which game the scenario level is played with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameAssignment {
    MiniGame {
        kind: GameKind,
        instructions: Option<String>,
    },
    /// No game configured; the scenario can be completed without playing
    Unconfigured,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLaunch {
    pub scenario_id: ScenarioId,
    pub level: DifficultyLevel,
    pub assignment: GameAssignment,
}

/// Checks the player may play a scenario level and resolves its mini-game.
pub struct StartScenario {
    store: Arc<ProgressStore>,
}

impl StartScenario {
    pub fn new(store: Arc<ProgressStore>) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        scenario_id: &ScenarioId,
        level: DifficultyLevel,
    ) -> Result<GameLaunch, StartScenarioError> {
        let ScenarioView {
            scenario, status, ..
        } = self
            .store
            .scenario_view(scenario_id)
            .await
            .ok_or_else(|| StartScenarioError::UnknownScenario(scenario_id.clone()))?;

        // Completed scenarios stay replayable
        if !status.is_playable() {
            return Err(StartScenarioError::Locked(scenario_id.clone()));
        }
        if !scenario.offers_level(level) {
            return Err(StartScenarioError::LevelNotAvailable {
                scenario_id: scenario_id.clone(),
                level,
            });
        }

        let assignment = match self.store.config_for(scenario_id, level).await {
            Some(config) => GameAssignment::MiniGame {
                kind: config.game,
                instructions: config.instructions,
            },
            None => GameAssignment::Unconfigured,
        };

        tracing::debug!(
            scenario_id = %scenario_id,
            level = %level,
            assignment = ?assignment,
            "Starting scenario"
        );

        Ok(GameLaunch {
            scenario_id: scenario_id.clone(),
            level,
            assignment,
        })
    }
}
