//! Error types for the domain layer
//!
//! `DomainError` covers construction of value objects and the scenario catalog.
//! `InvalidCompletionError` is the single failure kind of the completion
//! aggregator; when it is returned the progress aggregate has not been touched.

use thiserror::Error;

use crate::ids::ScenarioId;
use crate::value_objects::DifficultyLevel;

/// Unified error type for domain construction and parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Two entities share an identity that must be unique
    #[error("Duplicate {entity_type}: {id}")]
    Duplicate {
        entity_type: &'static str,
        id: String,
    },
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// # Example
    /// ```ignore
    /// if levels.is_empty() {
    ///     return Err(DomainError::validation("At least one level is required"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a duplicate identity error
    pub fn duplicate(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type,
            id: id.into(),
        }
    }
}

/// A finished game session could not be merged into the player's progress.
///
/// Never retried. The caller surfaces it (the UI shows a failure toast) and the
/// session result is discarded.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidCompletionError {
    /// The scenario is not part of the loaded catalog, or no catalog is loaded
    #[error("Unknown scenario: {0}")]
    UnknownScenario(ScenarioId),

    /// The scenario exists but cannot be played at this difficulty
    #[error("Scenario {scenario_id} is not available at level {level}")]
    LevelNotAvailable {
        scenario_id: ScenarioId,
        level: DifficultyLevel,
    },

    /// The raw score is negative, non-finite, fractional, or out of range
    #[error("Invalid score: {0}")]
    InvalidScore(String),
}

impl InvalidCompletionError {
    pub fn invalid_score(msg: impl Into<String>) -> Self {
        Self::InvalidScore(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("name cannot be empty");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: name cannot be empty");
    }

    #[test]
    fn test_duplicate_error() {
        let err = DomainError::duplicate("Scenario", "s1");
        assert!(matches!(err, DomainError::Duplicate { .. }));
        assert_eq!(err.to_string(), "Duplicate Scenario: s1");
    }

    #[test]
    fn test_level_not_available_message() {
        let err = InvalidCompletionError::LevelNotAvailable {
            scenario_id: ScenarioId::new("s1").unwrap(),
            level: DifficultyLevel::C2,
        };
        assert_eq!(err.to_string(), "Scenario s1 is not available at level C2");
    }

    #[test]
    fn test_invalid_score_message() {
        let err = InvalidCompletionError::invalid_score("score must be finite");
        assert_eq!(err.to_string(), "Invalid score: score must be finite");
    }
}
