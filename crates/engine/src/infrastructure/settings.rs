//! Engine settings read from the environment.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use sprachreise_domain::Score;

pub const CATALOG_PATH_VAR: &str = "SPRACHREISE_CATALOG_PATH";
pub const PROGRESS_DIR_VAR: &str = "SPRACHREISE_PROGRESS_DIR";
pub const RETURN_DELAY_VAR: &str = "SPRACHREISE_RETURN_DELAY_MS";
pub const DEMO_SCORE_VAR: &str = "SPRACHREISE_DEMO_SCORE";

const DEFAULT_RETURN_DELAY: Duration = Duration::from_millis(2000);
const DEFAULT_DEMO_SCORE: Score = Score::new(85);

#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    /// JSON catalog file. In-memory catalog when unset.
    pub catalog_path: Option<PathBuf>,
    /// Directory for per-player progress files. In-memory progress when unset.
    pub progress_dir: Option<PathBuf>,
    /// Pause between the end of a mini-game and the story map.
    pub return_delay: Duration,
    /// Score recorded for scenarios completed without a configured game.
    pub demo_score: Score,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            catalog_path: None,
            progress_dir: None,
            return_delay: DEFAULT_RETURN_DELAY,
            demo_score: DEFAULT_DEMO_SCORE,
        }
    }
}

impl EngineSettings {
    /// Startup hook for the embedding binary: load env files from `dir`
    /// (usually the repo root), then read the environment. Call before
    /// spawning threads, since env files are applied to the process.
    pub fn load(dir: &Path) -> Self {
        load_dotenv(dir);
        Self::from_env()
    }

    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`. Values that fail to parse fall back to
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let path = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };

        Self {
            catalog_path: path(CATALOG_PATH_VAR),
            progress_dir: path(PROGRESS_DIR_VAR),
            return_delay: parse_var::<u64>(&lookup, RETURN_DELAY_VAR)
                .map_or(defaults.return_delay, Duration::from_millis),
            demo_score: parse_var::<u32>(&lookup, DEMO_SCORE_VAR)
                .map_or(defaults.demo_score, Score::new),
        }
    }
}

/// `None` when unset or unparseable; the latter is logged.
fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(variable = key, value = %raw, "Ignoring unparseable setting, using default");
            None
        }
    }
}

/// Load `.env.local` then `.env` from `dir`. Variables already set win, so
/// local overrides take precedence over `.env`.
pub fn load_dotenv(dir: &Path) {
    for filename in [".env.local", ".env"] {
        let path = dir.join(filename);
        if path.exists() {
            if let Err(e) = dotenvy::from_path(&path) {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read env file");
            }
        }
    }
}
