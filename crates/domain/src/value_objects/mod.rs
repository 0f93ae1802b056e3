//! Value objects - immutable, valid by construction

mod difficulty;
mod map_position;
mod names;
mod score;

pub use difficulty::DifficultyLevel;
pub use map_position::MapPosition;
pub use names::ScenarioName;
pub use score::Score;
