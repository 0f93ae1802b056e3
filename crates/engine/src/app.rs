//! Application state and composition.

use std::path::Path;
use std::sync::Arc;

use crate::infrastructure::{
    catalog::{InMemoryCatalogSource, JsonFileCatalogSource},
    clock::SystemClock,
    ports::{CatalogSource, ClockPort, NavigatorPort, ProgressRepo},
    progress_repo::{InMemoryProgressRepo, JsonFileProgressRepo},
    settings::EngineSettings,
};
use crate::stores::ProgressStore;
use crate::use_cases::story_mode::{
    BeginPlayerSession, LoadCatalog, SelectScenario, SessionAdapter, StartScenario,
};
use crate::use_cases::StoryModeUseCases;

/// Main application state.
///
/// One `App` per player session. The UI shell owns it and routes mini-game
/// callbacks to `use_cases.story_mode.session_adapter`.
pub struct App {
    pub store: Arc<ProgressStore>,
    pub catalog: Arc<dyn CatalogSource>,
    pub progress_repo: Option<Arc<dyn ProgressRepo>>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub story_mode: StoryModeUseCases,
}

impl App {
    /// Wire the use cases around explicit adapters.
    pub fn new(
        settings: &EngineSettings,
        catalog: Arc<dyn CatalogSource>,
        progress_repo: Option<Arc<dyn ProgressRepo>>,
        navigator: Arc<dyn NavigatorPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let store = Arc::new(ProgressStore::new());

        let story_mode = StoryModeUseCases::new(
            Arc::new(LoadCatalog::new(catalog.clone(), store.clone())),
            Arc::new(BeginPlayerSession::new(
                store.clone(),
                progress_repo.clone(),
            )),
            Arc::new(SelectScenario::new(store.clone())),
            Arc::new(StartScenario::new(store.clone())),
            Arc::new(SessionAdapter::new(
                store.clone(),
                clock,
                navigator,
                progress_repo.clone(),
                settings.return_delay,
                settings.demo_score,
            )),
        );

        Self {
            store,
            catalog,
            progress_repo,
            use_cases: UseCases { story_mode },
        }
    }

    /// Build the app for a binary started from `dir`, reading settings from
    /// its env files and the process environment.
    pub fn from_env(dir: &Path, navigator: Arc<dyn NavigatorPort>) -> Self {
        let settings = EngineSettings::load(dir);
        tracing::info!(
            catalog_path = ?settings.catalog_path,
            progress_dir = ?settings.progress_dir,
            "Loaded engine settings"
        );
        Self::from_settings(&settings, navigator)
    }

    /// Pick adapters from the settings: file-backed where a path is
    /// configured, in-memory otherwise.
    pub fn from_settings(settings: &EngineSettings, navigator: Arc<dyn NavigatorPort>) -> Self {
        let catalog: Arc<dyn CatalogSource> = match &settings.catalog_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Using JSON catalog file");
                Arc::new(JsonFileCatalogSource::new(path.clone()))
            }
            None => {
                tracing::warn!("No catalog path configured, story map will be empty");
                Arc::new(InMemoryCatalogSource::default())
            }
        };

        let progress_repo: Arc<dyn ProgressRepo> = match &settings.progress_dir {
            Some(dir) => {
                tracing::info!(dir = %dir.display(), "Persisting progress to JSON files");
                Arc::new(JsonFileProgressRepo::new(dir.clone()))
            }
            None => Arc::new(InMemoryProgressRepo::new()),
        };

        Self::new(
            settings,
            catalog,
            Some(progress_repo),
            navigator,
            Arc::new(SystemClock::new()),
        )
    }
}
