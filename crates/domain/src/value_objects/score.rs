//! Validated session score

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::InvalidCompletionError;

/// Points earned in one mini-game session. Always a non-negative integer.
///
/// Mini-games report scores as plain numbers and compute them independently,
/// so raw values go through [`Score::from_raw`] before they reach the progress
/// aggregate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Score(u32);

impl Score {
    pub const fn new(points: u32) -> Self {
        Self(points)
    }

    /// Validate an untrusted raw score.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCompletionError::InvalidScore` if the value is NaN or
    /// infinite, negative, has a fractional part, or exceeds `u32::MAX`.
    pub fn from_raw(raw: f64) -> Result<Self, InvalidCompletionError> {
        if !raw.is_finite() {
            return Err(InvalidCompletionError::invalid_score(format!(
                "score must be finite, got {}",
                raw
            )));
        }
        if raw < 0.0 {
            return Err(InvalidCompletionError::invalid_score(format!(
                "score cannot be negative, got {}",
                raw
            )));
        }
        if raw.fract() != 0.0 {
            return Err(InvalidCompletionError::invalid_score(format!(
                "score must be a whole number, got {}",
                raw
            )));
        }
        if raw > f64::from(u32::MAX) {
            return Err(InvalidCompletionError::invalid_score(format!(
                "score {} is out of range",
                raw
            )));
        }
        // Range and integrality checked above
        Ok(Self(raw as u32))
    }

    pub fn points(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Score {
    fn from(points: u32) -> Self {
        Self(points)
    }
}
