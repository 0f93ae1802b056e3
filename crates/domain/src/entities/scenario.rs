//! Scenario entity - one stop on the story map
//!
//! Scenarios come from the catalog backend and are immutable for the rest of
//! the session. `order` drives the unlock chain, `is_required` drives story-mode
//! completion; the two are independent.

use crate::error::DomainError;
use crate::ids::ScenarioId;
use crate::value_objects::{DifficultyLevel, MapPosition, ScenarioName};

/// A story-mode scenario as published by the catalog.
///
/// # Invariants
///
/// - `order >= 1`
/// - `available_levels` is non-empty and free of duplicates; its first entry is
///   the level pre-selected when the player opens the scenario
///
/// # Example
///
/// ```
/// use sprachreise_domain::{DifficultyLevel, Scenario, ScenarioId, ScenarioName};
///
/// let scenario = Scenario::new(
///     ScenarioId::new("s1").unwrap(),
///     ScenarioName::new("Accommodation").unwrap(),
///     1,
///     vec![DifficultyLevel::A1, DifficultyLevel::A2],
/// )
/// .unwrap()
/// .with_required(false);
///
/// assert_eq!(scenario.default_level(), DifficultyLevel::A1);
/// assert!(!scenario.is_required());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    id: ScenarioId,
    name: ScenarioName,
    description: String,
    story_context: String,
    order: u32,
    is_required: bool,
    available_levels: Vec<DifficultyLevel>,
    map_position: Option<MapPosition>,
}

impl Scenario {
    /// Create a required scenario with no map position.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `order` is zero, or if
    /// `available_levels` is empty or lists a level twice.
    pub fn new(
        id: ScenarioId,
        name: ScenarioName,
        order: u32,
        available_levels: Vec<DifficultyLevel>,
    ) -> Result<Self, DomainError> {
        if order == 0 {
            return Err(DomainError::validation("Order must be at least 1"));
        }
        if available_levels.is_empty() {
            return Err(DomainError::validation("At least one level is required"));
        }
        for (i, level) in available_levels.iter().enumerate() {
            if available_levels[..i].contains(level) {
                return Err(DomainError::validation(format!(
                    "Level {} listed more than once for scenario {}",
                    level, id
                )));
            }
        }
        Ok(Self {
            id,
            name,
            description: String::new(),
            story_context: String::new(),
            order,
            is_required: true,
            available_levels,
            map_position: None,
        })
    }

    // =========================================================================
    // Builder
    // =========================================================================

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_story_context(mut self, story_context: impl Into<String>) -> Self {
        self.story_context = story_context.into();
        self
    }

    pub fn with_required(mut self, is_required: bool) -> Self {
        self.is_required = is_required;
        self
    }

    pub fn with_map_position(mut self, position: MapPosition) -> Self {
        self.map_position = Some(position);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> &ScenarioId {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &ScenarioName {
        &self.name
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Narrative shown before the player starts the scenario.
    #[inline]
    pub fn story_context(&self) -> &str {
        &self.story_context
    }

    #[inline]
    pub fn order(&self) -> u32 {
        self.order
    }

    #[inline]
    pub fn is_required(&self) -> bool {
        self.is_required
    }

    #[inline]
    pub fn available_levels(&self) -> &[DifficultyLevel] {
        &self.available_levels
    }

    #[inline]
    pub fn map_position(&self) -> Option<MapPosition> {
        self.map_position
    }

    /// Whether the scenario can be played at `level`.
    pub fn offers_level(&self, level: DifficultyLevel) -> bool {
        self.available_levels.contains(&level)
    }

    /// Level pre-selected in the difficulty picker.
    pub fn default_level(&self) -> DifficultyLevel {
        self.available_levels.first().copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ScenarioId {
        ScenarioId::new(s).unwrap()
    }

    fn name(s: &str) -> ScenarioName {
        ScenarioName::new(s).unwrap()
    }

    #[test]
    fn new_scenario_defaults_to_required() {
        let scenario = Scenario::new(id("s1"), name("Bank"), 3, vec![DifficultyLevel::B1]).unwrap();
        assert!(scenario.is_required());
        assert_eq!(scenario.order(), 3);
        assert!(scenario.map_position().is_none());
        assert_eq!(scenario.default_level(), DifficultyLevel::B1);
    }

    #[test]
    fn zero_order_rejected() {
        let err = Scenario::new(id("s1"), name("Bank"), 0, vec![DifficultyLevel::A1]).unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: Order must be at least 1");
    }

    #[test]
    fn empty_levels_rejected() {
        assert!(Scenario::new(id("s1"), name("Bank"), 1, vec![]).is_err());
    }

    #[test]
    fn duplicate_levels_rejected() {
        let result = Scenario::new(
            id("s1"),
            name("Bank"),
            1,
            vec![DifficultyLevel::A1, DifficultyLevel::A2, DifficultyLevel::A1],
        );
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn offers_level_checks_available_levels() {
        let scenario = Scenario::new(
            id("s1"),
            name("University"),
            1,
            vec![DifficultyLevel::A2, DifficultyLevel::B1],
        )
        .unwrap()
        .with_description("Enrol at the university")
        .with_story_context("Alex arrives in Heidelberg")
        .with_map_position(MapPosition::new(40.0, 60.0).unwrap());

        assert!(scenario.offers_level(DifficultyLevel::B1));
        assert!(!scenario.offers_level(DifficultyLevel::A1));
        assert_eq!(scenario.description(), "Enrol at the university");
        assert_eq!(scenario.story_context(), "Alex arrives in Heidelberg");
        assert!(scenario.map_position().is_some());
    }
}
