//! Mini-game assignment for a scenario at one difficulty level

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::ids::ScenarioId;
use crate::value_objects::DifficultyLevel;

/// The five mini-games a scenario run can be played with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    Anagram,
    Memory,
    Taboo,
    Quiz,
    Scrabble,
}

impl GameKind {
    pub fn all() -> &'static [GameKind] {
        &[
            GameKind::Anagram,
            GameKind::Memory,
            GameKind::Taboo,
            GameKind::Quiz,
            GameKind::Scrabble,
        ]
    }

    /// Component name the catalog uses to identify the game type
    pub fn component_name(&self) -> &'static str {
        match self {
            GameKind::Anagram => "AnagramGame",
            GameKind::Memory => "MemoryGame",
            GameKind::Taboo => "TabooGame",
            GameKind::Quiz => "QuizGame",
            GameKind::Scrabble => "ScrabbleGame",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.component_name())
    }
}

impl FromStr for GameKind {
    type Err = DomainError;

    /// Parses a catalog component name (e.g. `"QuizGame"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameKind::all()
            .iter()
            .copied()
            .find(|kind| kind.component_name() == s.trim())
            .ok_or_else(|| DomainError::parse(format!("Unknown game component: '{}'", s)))
    }
}

/// Which mini-game a scenario is played with at a given level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioConfig {
    pub scenario_id: ScenarioId,
    pub difficulty_level: DifficultyLevel,
    pub game: GameKind,
    /// Instructions shown above the mini-game
    pub instructions: Option<String>,
}

impl ScenarioConfig {
    pub fn new(scenario_id: ScenarioId, difficulty_level: DifficultyLevel, game: GameKind) -> Self {
        Self {
            scenario_id,
            difficulty_level,
            game,
            instructions: None,
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        let instructions = instructions.into();
        self.instructions = if instructions.trim().is_empty() {
            None
        } else {
            Some(instructions)
        };
        self
    }

    pub fn applies_to(&self, scenario_id: &ScenarioId, level: DifficultyLevel) -> bool {
        &self.scenario_id == scenario_id && self.difficulty_level == level
    }
}
