//! CEFR difficulty levels a scenario can be played at

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty token for a scenario run, following the CEFR scale.
///
/// Ordering follows the scale, so `A1 < A2 < ... < C2`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum DifficultyLevel {
    #[default]
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl DifficultyLevel {
    /// All levels in ascending order
    pub fn all() -> &'static [DifficultyLevel] {
        &[
            DifficultyLevel::A1,
            DifficultyLevel::A2,
            DifficultyLevel::B1,
            DifficultyLevel::B2,
            DifficultyLevel::C1,
            DifficultyLevel::C2,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::A1 => "A1",
            DifficultyLevel::A2 => "A2",
            DifficultyLevel::B1 => "B1",
            DifficultyLevel::B2 => "B2",
            DifficultyLevel::C1 => "C1",
            DifficultyLevel::C2 => "C2",
        }
    }

    /// Human label shown next to the token in the difficulty picker
    pub fn label(&self) -> &'static str {
        match self {
            DifficultyLevel::A1 => "Beginner",
            DifficultyLevel::A2 => "Elementary",
            DifficultyLevel::B1 => "Intermediate",
            DifficultyLevel::B2 => "Upper Intermediate",
            DifficultyLevel::C1 => "Advanced",
            DifficultyLevel::C2 => "Proficient",
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifficultyLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A1" => Ok(DifficultyLevel::A1),
            "A2" => Ok(DifficultyLevel::A2),
            "B1" => Ok(DifficultyLevel::B1),
            "B2" => Ok(DifficultyLevel::B2),
            "C1" => Ok(DifficultyLevel::C1),
            "C2" => Ok(DifficultyLevel::C2),
            _ => Err(DomainError::parse(format!(
                "Unknown difficulty level: '{}'. Valid values: A1, A2, B1, B2, C1, C2",
                s
            ))),
        }
    }
}
