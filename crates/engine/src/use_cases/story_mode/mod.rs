//! Story-mode use cases.
//!
//! Catalog loading, session start, scenario selection and the completion
//! callback used by the mini-games.

use std::sync::Arc;

mod begin_session;
mod load_catalog;
mod scenario_selection;
mod session_adapter;

pub use begin_session::{BeginPlayerSession, SessionStart};
pub use load_catalog::{CatalogLoad, LoadCatalog};
pub use scenario_selection::{
    GameAssignment, GameLaunch, ScenarioSelection, SelectScenario, StartScenario,
    StartScenarioError,
};
pub use session_adapter::{Persistence, SessionAdapter, SessionResult};

/// Container for story-mode use cases.
pub struct StoryModeUseCases {
    pub load_catalog: Arc<LoadCatalog>,
    pub begin_session: Arc<BeginPlayerSession>,
    pub select_scenario: Arc<SelectScenario>,
    pub start_scenario: Arc<StartScenario>,
    pub session_adapter: Arc<SessionAdapter>,
}

impl StoryModeUseCases {
    pub fn new(
        load_catalog: Arc<LoadCatalog>,
        begin_session: Arc<BeginPlayerSession>,
        select_scenario: Arc<SelectScenario>,
        start_scenario: Arc<StartScenario>,
        session_adapter: Arc<SessionAdapter>,
    ) -> Self {
        Self {
            load_catalog,
            begin_session,
            select_scenario,
            start_scenario,
            session_adapter,
        }
    }
}
