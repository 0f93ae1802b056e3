//! Session adapter - bridges a finished mini-game to the progress store.
//!
//! Mini-games only know their raw score. Scenario and level come from the
//! navigation state that launched them.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use sprachreise_domain::{
    CompletionChange, CompletionOutcome, DifficultyLevel, InvalidCompletionError, ScenarioId,
    Score,
};

use crate::infrastructure::ports::{ClockPort, NavigatorPort, ProgressRepo};
use crate::stores::{ProgressStore, RecordedCompletion};

/// What happened to the snapshot after a completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    Saved,
    /// No repo, no active player, nothing changed, or a newer snapshot
    /// was already saved
    Skipped,
    /// In-memory progress is kept; the next successful save catches up
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    pub outcome: CompletionOutcome,
    pub persistence: Persistence,
}

pub struct SessionAdapter {
    store: Arc<ProgressStore>,
    clock: Arc<dyn ClockPort>,
    navigator: Arc<dyn NavigatorPort>,
    repo: Option<Arc<dyn ProgressRepo>>,
    return_delay: Duration,
    demo_score: Score,
    /// Store revision of the last snapshot written to the repo
    last_saved: Mutex<u64>,
}

impl SessionAdapter {
    pub fn new(
        store: Arc<ProgressStore>,
        clock: Arc<dyn ClockPort>,
        navigator: Arc<dyn NavigatorPort>,
        repo: Option<Arc<dyn ProgressRepo>>,
        return_delay: Duration,
        demo_score: Score,
    ) -> Self {
        Self {
            store,
            clock,
            navigator,
            repo,
            return_delay,
            demo_score,
            last_saved: Mutex::new(0),
        }
    }

    /// Called by a mini-game when the player finishes it.
    ///
    /// Validates the raw score, records it, persists the new snapshot and
    /// sends the player back to the story map after the return delay.
    ///
    /// # Errors
    ///
    /// `InvalidCompletionError` for a bad score, an unknown scenario or a
    /// level the scenario does not offer. Progress is unchanged and the
    /// player stays on the game screen.
    pub async fn on_session_complete(
        &self,
        scenario_id: &ScenarioId,
        level: DifficultyLevel,
        raw_score: f64,
    ) -> Result<SessionResult, InvalidCompletionError> {
        let score = Score::from_raw(raw_score).inspect_err(|e| {
            tracing::warn!(
                scenario_id = %scenario_id,
                level = %level,
                raw_score,
                error = %e,
                "Rejected mini-game score"
            )
        })?;
        self.complete(scenario_id, level, score).await
    }

    /// Mark a scenario level without a configured mini-game as played,
    /// using the demo score.
    pub async fn complete_without_game(
        &self,
        scenario_id: &ScenarioId,
        level: DifficultyLevel,
    ) -> Result<SessionResult, InvalidCompletionError> {
        self.complete(scenario_id, level, self.demo_score).await
    }

    async fn complete(
        &self,
        scenario_id: &ScenarioId,
        level: DifficultyLevel,
        score: Score,
    ) -> Result<SessionResult, InvalidCompletionError> {
        let now = self.clock.now();
        let recorded = self
            .store
            .record_completion(scenario_id, level, score, now)
            .await
            .inspect_err(|e| {
                tracing::warn!(
                    scenario_id = %scenario_id,
                    level = %level,
                    score = score.points(),
                    error = %e,
                    "Rejected completion"
                )
            })?;

        log_outcome(scenario_id, level, &recorded.outcome);

        let persistence = self.persist(&recorded).await;

        self.navigator.return_to_story_map(self.return_delay).await;

        Ok(SessionResult {
            outcome: recorded.outcome,
            persistence,
        })
    }

    /// Saves the snapshot taken together with the completion. Saves are
    /// serialized, and one older than the last written snapshot is dropped.
    async fn persist(&self, recorded: &RecordedCompletion) -> Persistence {
        let Some(repo) = &self.repo else {
            return Persistence::Skipped;
        };
        let (Some(player_id), Some(snapshot)) = (recorded.player_id, &recorded.snapshot) else {
            return Persistence::Skipped;
        };

        let mut last_saved = self.last_saved.lock().await;
        if *last_saved >= recorded.revision {
            tracing::debug!(
                player_id = %player_id,
                revision = recorded.revision,
                last_saved = *last_saved,
                "Newer progress already saved"
            );
            return Persistence::Skipped;
        }

        match repo.save(player_id, snapshot).await {
            Ok(()) => {
                *last_saved = recorded.revision;
                Persistence::Saved
            }
            Err(e) => {
                tracing::warn!(player_id = %player_id, error = %e, "Failed to save progress");
                Persistence::Failed(e.to_string())
            }
        }
    }
}

fn log_outcome(scenario_id: &ScenarioId, level: DifficultyLevel, outcome: &CompletionOutcome) {
    match &outcome.change {
        CompletionChange::Recorded { record } => tracing::info!(
            scenario_id = %scenario_id,
            level = %level,
            score = record.score().points(),
            "Recorded completion"
        ),
        CompletionChange::Improved { previous, record } => tracing::info!(
            scenario_id = %scenario_id,
            level = %level,
            previous = previous.points(),
            score = record.score().points(),
            "Improved best score"
        ),
        CompletionChange::Unchanged { best, attempted } => tracing::debug!(
            scenario_id = %scenario_id,
            level = %level,
            best = best.points(),
            attempted = attempted.points(),
            "Score did not beat best, progress unchanged"
        ),
    }
    if outcome.story_mode_newly_completed {
        tracing::info!("Story mode completed");
    }
}
