//! Progress persistence adapters.
//!
//! Progress belongs to the player's session; these adapters let it survive a
//! reload. The JSON adapter keeps one file per player.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sprachreise_domain::{PlayerId, ProgressSnapshot};
use tokio::sync::RwLock;

use crate::infrastructure::ports::{ProgressRepo, RepoError};

/// Process-local progress storage. Lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryProgressRepo {
    snapshots: RwLock<HashMap<PlayerId, ProgressSnapshot>>,
}

impl InMemoryProgressRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressRepo for InMemoryProgressRepo {
    async fn load(&self, player_id: PlayerId) -> Result<Option<ProgressSnapshot>, RepoError> {
        Ok(self.snapshots.read().await.get(&player_id).cloned())
    }

    async fn save(&self, player_id: PlayerId, snapshot: &ProgressSnapshot) -> Result<(), RepoError> {
        self.snapshots
            .write()
            .await
            .insert(player_id, snapshot.clone());
        Ok(())
    }
}

/// Stores `<dir>/<player_id>.json` per player.
#[derive(Debug, Clone)]
pub struct JsonFileProgressRepo {
    dir: PathBuf,
}

impl JsonFileProgressRepo {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, player_id: PlayerId) -> PathBuf {
        self.dir.join(format!("{}.json", player_id))
    }
}

#[async_trait]
impl ProgressRepo for JsonFileProgressRepo {
    async fn load(&self, player_id: PlayerId) -> Result<Option<ProgressSnapshot>, RepoError> {
        let path = self.path_for(player_id);
        let json = match tokio::fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(RepoError::io("load_progress", e)),
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(RepoError::serialization)
    }

    async fn save(&self, player_id: PlayerId, snapshot: &ProgressSnapshot) -> Result<(), RepoError> {
        let json = serde_json::to_string_pretty(snapshot).map_err(RepoError::serialization)?;
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| RepoError::io("save_progress", e))?;

        // Write then rename so a crash never leaves a half-written file behind
        let path = self.path_for(player_id);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| RepoError::io("save_progress", e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| RepoError::io("save_progress", e))?;

        tracing::debug!(player_id = %player_id, path = %path.display(), "Saved progress snapshot");
        Ok(())
    }
}
