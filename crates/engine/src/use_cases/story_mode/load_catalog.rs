//! Load catalog use case - fetches scenarios and mini-game configs into the store.

use std::sync::Arc;

use sprachreise_domain::ScenarioCatalog;

use crate::infrastructure::ports::{CatalogError, CatalogSource};
use crate::stores::ProgressStore;

/// What a catalog load did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLoad {
    /// A non-empty catalog was already installed; nothing was fetched
    AlreadyLoaded,
    Loaded {
        scenarios: usize,
        configs: usize,
        story_mode_completed: bool,
    },
}

/// Fetches the scenario catalog and installs it in the progress store.
///
/// A failed fetch leaves whatever the store held before untouched, so the UI
/// can keep showing the old map (or its loading state) and retry.
pub struct LoadCatalog {
    source: Arc<dyn CatalogSource>,
    store: Arc<ProgressStore>,
}

impl LoadCatalog {
    pub fn new(source: Arc<dyn CatalogSource>, store: Arc<ProgressStore>) -> Self {
        Self { source, store }
    }

    /// Load the catalog unless one with scenarios is already installed.
    /// `force` refetches regardless.
    pub async fn execute(&self, force: bool) -> Result<CatalogLoad, CatalogError> {
        if !force && self.store.has_scenarios().await {
            return Ok(CatalogLoad::AlreadyLoaded);
        }

        let scenarios = self
            .source
            .fetch_scenarios()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to fetch scenarios"))?;
        let configs = self
            .source
            .fetch_scenario_configs()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to fetch scenario configs"))?;

        let catalog = ScenarioCatalog::new(scenarios)
            .inspect_err(|e| tracing::warn!(error = %e, "Rejected scenario catalog"))?;

        let scenario_count = catalog.len();
        let config_count = configs.len();
        let story_mode_completed = self.store.set_catalog(catalog, configs).await;

        tracing::info!(
            scenarios = scenario_count,
            configs = config_count,
            story_mode_completed,
            "Loaded scenario catalog"
        );

        Ok(CatalogLoad::Loaded {
            scenarios: scenario_count,
            configs: config_count,
            story_mode_completed,
        })
    }
}
