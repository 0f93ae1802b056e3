use serde::Serialize;

use crate::error::DomainError;

/// Marker position on the story map, as percentages of the map's width and
/// height. Both axes are in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapPosition {
    x: f64,
    y: f64,
}

impl MapPosition {
    pub fn new(x: f64, y: f64) -> Result<Self, DomainError> {
        for (axis, value) in [("x", x), ("y", y)] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(DomainError::validation(format!(
                    "Map position {} must be between 0 and 100, got {}",
                    axis, value
                )));
            }
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert!(MapPosition::new(0.0, 100.0).is_ok());
        let pos = MapPosition::new(20.0, 30.0).unwrap();
        assert_eq!((pos.x(), pos.y()), (20.0, 30.0));
    }

    #[test]
    fn rejects_outside_map() {
        assert!(MapPosition::new(-1.0, 50.0).is_err());
        assert!(MapPosition::new(50.0, 100.5).is_err());
        assert!(MapPosition::new(f64::NAN, 50.0).is_err());
    }
}
