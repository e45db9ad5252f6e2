//! Anatomical side detection.
//!
//! The side of the calcaneus is inferred by comparing the mean X coordinate
//! of the medial wall with that of the lateral wall: a medial wall further
//! along +X means a left calcaneus. This assumes the meshes share the
//! scanner's axis convention and is only a heuristic; meshes exported in
//! another orientation will be misclassified.

use std::fmt;

use crate::error::{BreachError, Result};
use crate::mesh::PointSet;

/// Which foot the walls belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Left calcaneus (medial wall has the larger mean X).
    LeftCalcaneus,
    /// Right calcaneus (medial mean X is smaller or equal).
    RightCalcaneus,
}

impl Side {
    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::LeftCalcaneus => "Left Calcaneus",
            Side::RightCalcaneus => "Right Calcaneus",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of side detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideResult {
    /// Mean X coordinate of the medial wall.
    pub mean_x_medial: f64,
    /// Mean X coordinate of the lateral wall.
    pub mean_x_lateral: f64,
    /// Detected side.
    pub side: Side,
}

/// Classify the side from the medial and lateral wall vertices.
///
/// Left iff `mean_x(medial) > mean_x(lateral)`; a tie is Right.
pub fn detect_side(medial: &PointSet, lateral: &PointSet) -> Result<SideResult> {
    let mean_x_medial = medial.mean_x().ok_or_else(|| BreachError::empty("medial"))?;
    let mean_x_lateral = lateral.mean_x().ok_or_else(|| BreachError::empty("lateral"))?;

    let side = if mean_x_medial > mean_x_lateral {
        Side::LeftCalcaneus
    } else {
        Side::RightCalcaneus
    };

    Ok(SideResult {
        mean_x_medial,
        mean_x_lateral,
        side,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn at_x(xs: &[f64]) -> PointSet {
        xs.iter().map(|&x| Point3::new(x, 1.0, -2.0)).collect()
    }

    #[test]
    fn test_medial_larger_is_left() {
        let result = detect_side(&at_x(&[9.0, 11.0]), &at_x(&[-9.0, -11.0])).unwrap();
        assert_eq!(result.side, Side::LeftCalcaneus);
        assert_eq!(result.mean_x_medial, 10.0);
        assert_eq!(result.mean_x_lateral, -10.0);
    }

    #[test]
    fn test_medial_smaller_is_right() {
        let result = detect_side(&at_x(&[-5.0]), &at_x(&[5.0, 6.0])).unwrap();
        assert_eq!(result.side, Side::RightCalcaneus);
    }

    #[test]
    fn test_tie_is_right() {
        let result = detect_side(&at_x(&[1.0, 3.0]), &at_x(&[2.0])).unwrap();
        assert_eq!(result.mean_x_medial, result.mean_x_lateral);
        assert_eq!(result.side, Side::RightCalcaneus);
    }

    #[test]
    fn test_empty_sets_are_rejected() {
        let err = detect_side(&PointSet::default(), &at_x(&[1.0])).unwrap_err();
        assert!(matches!(err, BreachError::EmptyPointSet { ref name } if name == "medial"));

        let err = detect_side(&at_x(&[1.0]), &PointSet::default()).unwrap_err();
        assert!(matches!(err, BreachError::EmptyPointSet { ref name } if name == "lateral"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Side::LeftCalcaneus.to_string(), "Left Calcaneus");
        assert_eq!(Side::RightCalcaneus.to_string(), "Right Calcaneus");
    }
}
