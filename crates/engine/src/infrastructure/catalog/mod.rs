//! Catalog source adapters.

pub mod wire;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use sprachreise_domain::{Scenario, ScenarioConfig};

use crate::infrastructure::ports::{CatalogError, CatalogSource};
use wire::CatalogDocument;

/// Catalog held in memory, for demos and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogSource {
    scenarios: Vec<Scenario>,
    configs: Vec<ScenarioConfig>,
}

impl InMemoryCatalogSource {
    pub fn new(scenarios: Vec<Scenario>, configs: Vec<ScenarioConfig>) -> Self {
        Self { scenarios, configs }
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalogSource {
    async fn fetch_scenarios(&self) -> Result<Vec<Scenario>, CatalogError> {
        Ok(self.scenarios.clone())
    }

    async fn fetch_scenario_configs(&self) -> Result<Vec<ScenarioConfig>, CatalogError> {
        Ok(self.configs.clone())
    }
}

/// Catalog read from a JSON export of the backend endpoints.
///
/// Each load reads and parses the file once: `fetch_scenarios` keeps the
/// parsed document and the following `fetch_scenario_configs` consumes it,
/// so both halves of a load come from the same file contents. Edits show up
/// on the next load.
#[derive(Debug)]
pub struct JsonFileCatalogSource {
    path: PathBuf,
    pending: Mutex<Option<CatalogDocument>>,
}

impl JsonFileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pending: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<CatalogDocument, CatalogError> {
        let json = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            CatalogError::unavailable(format!("{}: {}", self.path.display(), e))
        })?;
        CatalogDocument::parse(&json)
    }
}

#[async_trait]
impl CatalogSource for JsonFileCatalogSource {
    async fn fetch_scenarios(&self) -> Result<Vec<Scenario>, CatalogError> {
        let mut pending = self.pending.lock().await;
        *pending = None;
        let document = self.read_document().await?;
        let scenarios = document.scenarios()?;
        *pending = Some(document);
        Ok(scenarios)
    }

    async fn fetch_scenario_configs(&self) -> Result<Vec<ScenarioConfig>, CatalogError> {
        let cached = self.pending.lock().await.take();
        match cached {
            Some(document) => document.configs(),
            None => self.read_document().await?.configs(),
        }
    }
}
