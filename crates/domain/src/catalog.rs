//! Scenario catalog - the ordered, read-only list of story scenarios
//!
//! The backend returns scenarios in no particular order. The catalog sorts
//! them once by `order` (stable, so ties keep fetch order) and answers every
//! unlock question from that sequence.

use std::collections::HashMap;

use crate::entities::Scenario;
use crate::error::DomainError;
use crate::ids::ScenarioId;

/// Scenarios of one story, sorted into unlock order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioCatalog {
    ordered: Vec<Scenario>,
    index: HashMap<ScenarioId, usize>,
}

impl ScenarioCatalog {
    /// Build a catalog from scenarios in fetch order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Duplicate` if two scenarios share an id.
    pub fn new(scenarios: Vec<Scenario>) -> Result<Self, DomainError> {
        let mut ordered = scenarios;
        ordered.sort_by_key(Scenario::order);

        let mut index = HashMap::with_capacity(ordered.len());
        for (position, scenario) in ordered.iter().enumerate() {
            if index.insert(scenario.id().clone(), position).is_some() {
                return Err(DomainError::duplicate("Scenario", scenario.id().as_str()));
            }
        }

        Ok(Self { ordered, index })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Scenarios in unlock order.
    pub fn scenarios(&self) -> &[Scenario] {
        &self.ordered
    }

    pub fn get(&self, id: &ScenarioId) -> Option<&Scenario> {
        self.position(id).map(|position| &self.ordered[position])
    }

    /// Zero-based position of the scenario in unlock order.
    pub fn position(&self, id: &ScenarioId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Scenario that has to be completed before `id` opens. `None` for the
    /// first scenario and for ids outside the catalog.
    pub fn predecessor(&self, id: &ScenarioId) -> Option<&Scenario> {
        match self.position(id)? {
            0 => None,
            position => self.ordered.get(position - 1),
        }
    }

    /// Scenarios that count toward story-mode completion.
    pub fn required(&self) -> impl Iterator<Item = &Scenario> {
        self.ordered.iter().filter(|s| s.is_required())
    }
}

/// Whether the catalog fetch has finished.
///
/// "Not loaded yet" and "loaded but empty" are kept apart so the UI can show a
/// loading state; unlock and completion rules treat both as "nothing
/// resolvable".
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CatalogState {
    #[default]
    NotLoaded,
    Loaded(ScenarioCatalog),
}

impl CatalogState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, CatalogState::Loaded(_))
    }

    pub fn catalog(&self) -> Option<&ScenarioCatalog> {
        match self {
            CatalogState::NotLoaded => None,
            CatalogState::Loaded(catalog) => Some(catalog),
        }
    }

    pub fn scenario(&self, id: &ScenarioId) -> Option<&Scenario> {
        self.catalog()?.get(id)
    }

    /// True when nothing can be shown: not loaded, or loaded with no scenarios.
    pub fn is_empty(&self) -> bool {
        self.catalog().map_or(true, ScenarioCatalog::is_empty)
    }
}

impl From<ScenarioCatalog> for CatalogState {
    fn from(catalog: ScenarioCatalog) -> Self {
        CatalogState::Loaded(catalog)
    }
}
