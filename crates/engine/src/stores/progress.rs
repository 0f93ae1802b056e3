//! Session progress store.
//!
//! Holds everything the story mode needs for the logged-in player: the
//! scenario catalog, mini-game configs and the player's progress. One store
//! per player session; constructed explicitly and shared through `Arc`.

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use sprachreise_domain::{
    self as domain, CatalogState, CompletionOutcome, CompletionRecord, DifficultyLevel,
    GameProgress, InvalidCompletionError, PlayerId, ProgressSnapshot, Scenario, ScenarioCatalog,
    ScenarioConfig, ScenarioId, ScenarioMarker, ScenarioStatus, Score,
};

#[derive(Debug, Default)]
struct SessionState {
    player_id: Option<PlayerId>,
    catalog: CatalogState,
    configs: Vec<ScenarioConfig>,
    progress: GameProgress,
    /// Bumped on every progress change
    revision: u64,
}

/// A completion merged under the write guard, with the state it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCompletion {
    pub outcome: CompletionOutcome,
    pub player_id: Option<PlayerId>,
    /// Progress right after this completion. `None` when nothing changed.
    pub snapshot: Option<ProgressSnapshot>,
    /// Orders snapshots taken from the same store; later changes are higher
    pub revision: u64,
}

/// One scenario together with the player's state for it, read consistently.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioView {
    pub scenario: Scenario,
    pub status: ScenarioStatus,
    pub completion_count: usize,
}

/// Store for catalog and progress of the current session.
#[derive(Debug, Default)]
pub struct ProgressStore {
    state: RwLock<SessionState>,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Start a session for `player_id` with previously saved progress.
    ///
    /// The story-mode flag is re-evaluated against the catalog if one is
    /// already loaded.
    pub async fn begin_session(&self, player_id: PlayerId, mut progress: GameProgress) {
        let mut state = self.state.write().await;
        progress.refresh_story_mode(&state.catalog);
        state.player_id = Some(player_id);
        state.progress = progress;
        state.revision += 1;
    }

    /// Drop the player's progress. The catalog stays loaded.
    pub async fn end_session(&self) {
        let mut state = self.state.write().await;
        state.player_id = None;
        state.progress = GameProgress::new();
        state.revision += 1;
    }

    pub async fn player_id(&self) -> Option<PlayerId> {
        self.state.read().await.player_id
    }

    /// Replace the progress with a saved snapshot.
    pub async fn restore(&self, snapshot: ProgressSnapshot) {
        let mut state = self.state.write().await;
        let mut progress = GameProgress::from_snapshot(snapshot);
        progress.refresh_story_mode(&state.catalog);
        state.progress = progress;
        state.revision += 1;
    }

    pub async fn snapshot(&self) -> ProgressSnapshot {
        self.state.read().await.progress.snapshot()
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Install a freshly fetched catalog and its configs.
    ///
    /// Returns the recomputed story-mode flag.
    pub async fn set_catalog(&self, catalog: ScenarioCatalog, configs: Vec<ScenarioConfig>) -> bool {
        let mut state = self.state.write().await;
        state.catalog = CatalogState::Loaded(catalog);
        state.configs = configs;
        let SessionState {
            catalog, progress, ..
        } = &mut *state;
        progress.refresh_story_mode(catalog)
    }

    pub async fn is_catalog_loaded(&self) -> bool {
        self.state.read().await.catalog.is_loaded()
    }

    /// True when a loaded catalog holds at least one scenario.
    pub async fn has_scenarios(&self) -> bool {
        !self.state.read().await.catalog.is_empty()
    }

    pub async fn scenario(&self, scenario_id: &ScenarioId) -> Option<Scenario> {
        self.state.read().await.catalog.scenario(scenario_id).cloned()
    }

    /// Scenarios in unlock order. Empty while no catalog is loaded.
    pub async fn scenarios(&self) -> Vec<Scenario> {
        self.state
            .read()
            .await
            .catalog
            .catalog()
            .map(|catalog| catalog.scenarios().to_vec())
            .unwrap_or_default()
    }

    /// Mini-game config for a scenario level, if one is assigned.
    pub async fn config_for(
        &self,
        scenario_id: &ScenarioId,
        level: DifficultyLevel,
    ) -> Option<ScenarioConfig> {
        self.state
            .read()
            .await
            .configs
            .iter()
            .find(|config| config.applies_to(scenario_id, level))
            .cloned()
    }

    // =========================================================================
    // Progress queries
    // =========================================================================

    pub async fn get_completion(
        &self,
        scenario_id: &ScenarioId,
        level: DifficultyLevel,
    ) -> Option<CompletionRecord> {
        self.state
            .read()
            .await
            .progress
            .get_completion(scenario_id, level)
            .cloned()
    }

    pub async fn is_scenario_completed(&self, scenario_id: &ScenarioId) -> bool {
        self.state
            .read()
            .await
            .progress
            .is_scenario_completed(scenario_id)
    }

    pub async fn completion_count(&self, scenario_id: &ScenarioId) -> usize {
        self.state.read().await.progress.completion_count(scenario_id)
    }

    pub async fn story_mode_completed(&self) -> bool {
        self.state.read().await.progress.story_mode_completed()
    }

    pub async fn is_unlocked(&self, scenario_id: &ScenarioId) -> bool {
        let state = self.state.read().await;
        domain::is_unlocked(scenario_id, &state.catalog, &state.progress)
    }

    pub async fn scenario_status(&self, scenario_id: &ScenarioId) -> ScenarioStatus {
        let state = self.state.read().await;
        domain::scenario_status(scenario_id, &state.catalog, &state.progress)
    }

    /// Scenario, status and completion count under one read guard.
    pub async fn scenario_view(&self, scenario_id: &ScenarioId) -> Option<ScenarioView> {
        let state = self.state.read().await;
        let scenario = state.catalog.scenario(scenario_id)?.clone();
        Some(ScenarioView {
            scenario,
            status: domain::scenario_status(scenario_id, &state.catalog, &state.progress),
            completion_count: state.progress.completion_count(scenario_id),
        })
    }

    pub async fn story_map(&self) -> Vec<ScenarioMarker> {
        let state = self.state.read().await;
        domain::story_map(&state.catalog, &state.progress)
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Merge a finished session into the progress.
    ///
    /// Insert-or-update, the story-mode recompute and the snapshot of the
    /// result all happen under one write guard; readers never see a
    /// half-applied completion.
    pub async fn record_completion(
        &self,
        scenario_id: &ScenarioId,
        level: DifficultyLevel,
        score: Score,
        now: DateTime<Utc>,
    ) -> Result<RecordedCompletion, InvalidCompletionError> {
        let mut state = self.state.write().await;
        let SessionState {
            catalog,
            progress,
            revision,
            player_id,
            ..
        } = &mut *state;
        let outcome = progress.record_completion(catalog, scenario_id, level, score, now)?;

        let snapshot = if outcome.change.is_change() {
            *revision += 1;
            Some(progress.snapshot())
        } else {
            None
        };

        Ok(RecordedCompletion {
            outcome,
            player_id: *player_id,
            snapshot,
            revision: *revision,
        })
    }
}
