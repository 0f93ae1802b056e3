//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Scenario catalog (REST backend, JSON file, in-memory)
//! - Progress persistence (could swap JSON files -> profile-save endpoint)
//! - Navigation back to the story map (owned by the UI shell)
//! - Clock (for testing)

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sprachreise_domain::{DomainError, PlayerId, ProgressSnapshot, Scenario, ScenarioConfig};

// =============================================================================
// Error Types
// =============================================================================

/// Catalog fetch failures. Recoverable: the UI may retry the fetch.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    /// Source could not be reached or reported failure
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
    /// Source answered with data that does not describe a valid catalog
    #[error("Malformed catalog: {0}")]
    Malformed(String),
}

impl CatalogError {
    pub fn unavailable(message: impl ToString) -> Self {
        Self::Unavailable(message.to_string())
    }

    pub fn malformed(message: impl ToString) -> Self {
        Self::Malformed(message.to_string())
    }
}

impl From<DomainError> for CatalogError {
    fn from(err: DomainError) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Progress persistence errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Storage operation failed - includes operation name for tracing.
    #[error("Storage error in {operation}: {message}")]
    Io {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepoError {
    /// Create an Io error with operation context.
    pub fn io(operation: &'static str, message: impl ToString) -> Self {
        Self::Io {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}

// =============================================================================
// Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Read side of the scenario catalog backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Scenarios in whatever order the backend returns them.
    async fn fetch_scenarios(&self) -> Result<Vec<Scenario>, CatalogError>;
    /// Mini-game assignments per scenario and level.
    async fn fetch_scenario_configs(&self) -> Result<Vec<ScenarioConfig>, CatalogError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressRepo: Send + Sync {
    async fn load(&self, player_id: PlayerId) -> Result<Option<ProgressSnapshot>, RepoError>;
    async fn save(&self, player_id: PlayerId, snapshot: &ProgressSnapshot) -> Result<(), RepoError>;
}

/// UI transitions triggered by the engine.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NavigatorPort: Send + Sync {
    /// Leave the finished scenario and show the story map after `delay`.
    async fn return_to_story_map(&self, delay: Duration);
}
