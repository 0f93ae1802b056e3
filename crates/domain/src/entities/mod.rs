//! Catalog entities and completion records

mod completion_record;
mod scenario;
mod scenario_config;

pub use completion_record::{CompletionRecord, DedupKey};
pub use scenario::Scenario;
pub use scenario_config::{GameKind, ScenarioConfig};
