//! Begin player session use case - restores saved progress at login.

use std::sync::Arc;

use sprachreise_domain::{GameProgress, PlayerId};

use crate::infrastructure::ports::{ProgressRepo, RepoError};
use crate::stores::ProgressStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStart {
    pub player_id: PlayerId,
    /// Completion records restored from storage
    pub restored_records: usize,
    pub story_mode_completed: bool,
}

/// Installs the player's saved progress in the store.
///
/// Without a repo, or for a player with nothing saved, the session starts
/// with empty progress.
pub struct BeginPlayerSession {
    store: Arc<ProgressStore>,
    repo: Option<Arc<dyn ProgressRepo>>,
}

impl BeginPlayerSession {
    pub fn new(store: Arc<ProgressStore>, repo: Option<Arc<dyn ProgressRepo>>) -> Self {
        Self { store, repo }
    }

    /// # Errors
    ///
    /// A failed load is returned and the store keeps its previous session;
    /// starting empty here would let the next save overwrite the player's
    /// real progress.
    pub async fn execute(&self, player_id: PlayerId) -> Result<SessionStart, RepoError> {
        let snapshot = match &self.repo {
            Some(repo) => repo.load(player_id).await.inspect_err(|e| {
                tracing::warn!(player_id = %player_id, error = %e, "Failed to load progress")
            })?,
            None => None,
        };

        let progress = snapshot
            .map(GameProgress::from_snapshot)
            .unwrap_or_default();
        let restored_records = progress.len();
        self.store.begin_session(player_id, progress).await;
        let story_mode_completed = self.store.story_mode_completed().await;

        tracing::info!(
            player_id = %player_id,
            restored_records,
            story_mode_completed,
            "Player session started"
        );

        Ok(SessionStart {
            player_id,
            restored_records,
            story_mode_completed,
        })
    }
}
