//! Unlock policy and story-map view
//!
//! Scenarios open one after another: the first scenario in catalog order is
//! always playable, every later one opens once its immediate predecessor has
//! been completed at any level. `is_required` plays no part here; it only
//! matters for story-mode completion.
//!
//! Everything in this module is a pure function of the catalog and the
//! player's progress. A missing or empty catalog locks everything.

use serde::Serialize;

use crate::aggregates::GameProgress;
use crate::catalog::CatalogState;
use crate::ids::ScenarioId;
use crate::value_objects::{MapPosition, ScenarioName};

/// Whether the player may start `scenario_id`.
///
/// # Example
///
/// ```
/// use sprachreise_domain::{
///     is_unlocked, CatalogState, DifficultyLevel, GameProgress, Scenario, ScenarioCatalog,
///     ScenarioId, ScenarioName,
/// };
///
/// let make = |id: &str, order| {
///     Scenario::new(
///         ScenarioId::new(id).unwrap(),
///         ScenarioName::new(id).unwrap(),
///         order,
///         vec![DifficultyLevel::A1],
///     )
///     .unwrap()
/// };
/// let catalog = CatalogState::from(ScenarioCatalog::new(vec![make("b", 2), make("a", 1)]).unwrap());
/// let progress = GameProgress::new();
///
/// assert!(is_unlocked(&ScenarioId::new("a").unwrap(), &catalog, &progress));
/// assert!(!is_unlocked(&ScenarioId::new("b").unwrap(), &catalog, &progress));
/// ```
pub fn is_unlocked(
    scenario_id: &ScenarioId,
    catalog: &CatalogState,
    progress: &GameProgress,
) -> bool {
    let Some(catalog) = catalog.catalog() else {
        return false;
    };
    match catalog.position(scenario_id) {
        None => false,
        Some(0) => true,
        Some(_) => catalog
            .predecessor(scenario_id)
            .is_some_and(|previous| progress.is_scenario_completed(previous.id())),
    }
}

/// Marker state on the story map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStatus {
    /// Predecessor not yet completed
    Locked,
    /// Playable, no completion yet
    Available,
    /// At least one level completed
    Completed,
}

impl ScenarioStatus {
    pub fn is_playable(&self) -> bool {
        !matches!(self, ScenarioStatus::Locked)
    }
}

/// Status of one scenario. Completion wins over the lock state, so a scenario
/// that was finished before a catalog reorder still shows as completed.
pub fn scenario_status(
    scenario_id: &ScenarioId,
    catalog: &CatalogState,
    progress: &GameProgress,
) -> ScenarioStatus {
    if progress.is_scenario_completed(scenario_id) && catalog.scenario(scenario_id).is_some() {
        ScenarioStatus::Completed
    } else if is_unlocked(scenario_id, catalog, progress) {
        ScenarioStatus::Available
    } else {
        ScenarioStatus::Locked
    }
}

/// One marker on the story map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioMarker {
    pub scenario_id: ScenarioId,
    pub name: ScenarioName,
    pub position: MapPosition,
    pub order: u32,
    pub is_required: bool,
    pub status: ScenarioStatus,
    /// Distinct levels completed, shown as a badge
    pub completion_count: usize,
}

/// Markers for every scenario that has a map position, in unlock order.
pub fn story_map(catalog: &CatalogState, progress: &GameProgress) -> Vec<ScenarioMarker> {
    let Some(scenarios) = catalog.catalog().map(|c| c.scenarios()) else {
        return Vec::new();
    };
    scenarios
        .iter()
        .filter_map(|scenario| {
            let position = scenario.map_position()?;
            Some(ScenarioMarker {
                scenario_id: scenario.id().clone(),
                name: scenario.name().clone(),
                position,
                order: scenario.order(),
                is_required: scenario.is_required(),
                status: scenario_status(scenario.id(), catalog, progress),
                completion_count: progress.completion_count(scenario.id()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ScenarioCatalog;
    use crate::entities::Scenario;
    use crate::value_objects::{DifficultyLevel, Score};
    use chrono::{TimeZone, Utc};

    fn sid(id: &str) -> ScenarioId {
        ScenarioId::new(id).unwrap()
    }

    fn scenario(id: &str, order: u32) -> Scenario {
        Scenario::new(
            sid(id),
            ScenarioName::new(id).unwrap(),
            order,
            vec![DifficultyLevel::A1, DifficultyLevel::A2],
        )
        .unwrap()
    }

    /// A(1) required, B(2) optional, C(3) required
    fn abc() -> CatalogState {
        CatalogState::from(
            ScenarioCatalog::new(vec![
                scenario("c", 3),
                scenario("a", 1),
                scenario("b", 2).with_required(false),
            ])
            .unwrap(),
        )
    }

    fn complete(progress: &mut GameProgress, catalog: &CatalogState, id: &str) {
        progress
            .record_completion(
                catalog,
                &sid(id),
                DifficultyLevel::A1,
                Score::new(50),
                Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            )
            .unwrap();
    }

    #[test]
    fn first_scenario_always_unlocked() {
        let catalog = abc();
        let progress = GameProgress::new();
        assert!(is_unlocked(&sid("a"), &catalog, &progress));
        assert!(!is_unlocked(&sid("b"), &catalog, &progress));
        assert!(!is_unlocked(&sid("c"), &catalog, &progress));
    }

    #[test]
    fn chain_depends_only_on_immediate_predecessor() {
        let catalog = abc();
        let mut progress = GameProgress::new();

        complete(&mut progress, &catalog, "a");
        assert!(is_unlocked(&sid("b"), &catalog, &progress));
        assert!(!is_unlocked(&sid("c"), &catalog, &progress));

        // B completed while A is not: C opens anyway
        let mut skipped = GameProgress::new();
        complete(&mut skipped, &catalog, "b");
        assert!(is_unlocked(&sid("c"), &catalog, &skipped));
        assert!(!is_unlocked(&sid("b"), &catalog, &skipped));
    }

    #[test]
    fn optional_predecessor_still_gates() {
        let catalog = abc();
        let mut progress = GameProgress::new();
        complete(&mut progress, &catalog, "a");
        // B is optional but C still waits for it
        assert!(!is_unlocked(&sid("c"), &catalog, &progress));
    }

    #[test]
    fn unknown_scenario_is_locked() {
        assert!(!is_unlocked(&sid("zzz"), &abc(), &GameProgress::new()));
    }

    #[test]
    fn missing_or_empty_catalog_locks_everything() {
        let progress = GameProgress::new();
        assert!(!is_unlocked(&sid("a"), &CatalogState::NotLoaded, &progress));
        let empty = CatalogState::from(ScenarioCatalog::empty());
        assert!(!is_unlocked(&sid("a"), &empty, &progress));
        assert!(story_map(&CatalogState::NotLoaded, &progress).is_empty());
        assert!(story_map(&empty, &progress).is_empty());
    }

    #[test]
    fn status_reflects_progress() {
        let catalog = abc();
        let mut progress = GameProgress::new();
        assert_eq!(scenario_status(&sid("a"), &catalog, &progress), ScenarioStatus::Available);
        assert_eq!(scenario_status(&sid("b"), &catalog, &progress), ScenarioStatus::Locked);

        complete(&mut progress, &catalog, "a");
        assert_eq!(scenario_status(&sid("a"), &catalog, &progress), ScenarioStatus::Completed);
        assert_eq!(scenario_status(&sid("b"), &catalog, &progress), ScenarioStatus::Available);
        assert!(!ScenarioStatus::Locked.is_playable());
        assert_eq!(
            scenario_status(&sid("a"), &CatalogState::NotLoaded, &progress),
            ScenarioStatus::Locked
        );
    }

    #[test]
    fn story_map_skips_unpositioned_scenarios() {
        let catalog = CatalogState::from(
            ScenarioCatalog::new(vec![
                scenario("b", 2).with_map_position(MapPosition::new(60.0, 40.0).unwrap()),
                scenario("a", 1).with_map_position(MapPosition::new(20.0, 30.0).unwrap()),
                scenario("hidden", 3),
            ])
            .unwrap(),
        );
        let mut progress = GameProgress::new();
        complete(&mut progress, &catalog, "a");
        progress
            .record_completion(
                &catalog,
                &sid("a"),
                DifficultyLevel::A2,
                Score::new(10),
                Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap(),
            )
            .unwrap();

        let markers = story_map(&catalog, &progress);
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].scenario_id, sid("a"));
        assert_eq!(markers[0].status, ScenarioStatus::Completed);
        assert_eq!(markers[0].completion_count, 2);
        assert_eq!(markers[1].scenario_id, sid("b"));
        assert_eq!(markers[1].status, ScenarioStatus::Available);
        assert_eq!(markers[1].completion_count, 0);
    }
}
