//! Breach classification for a single screw.

use std::fmt;

use nalgebra::Point3;

/// Clearance tolerance used when none is given, in millimeters.
pub const DEFAULT_TOLERANCE: f64 = 0.5;

/// Which walls a screw breaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreachStatus {
    /// Both walls are at least `tolerance` away.
    NoBreach,
    /// Only the medial wall is closer than `tolerance`.
    MedialBreach,
    /// Only the lateral wall is closer than `tolerance`.
    LateralBreach,
    /// Both walls are closer than `tolerance`.
    BothBreach,
}

impl BreachStatus {
    /// Status from the per-wall breach flags.
    pub fn from_flags(medial: bool, lateral: bool) -> Self {
        match (medial, lateral) {
            (false, false) => BreachStatus::NoBreach,
            (true, false) => BreachStatus::MedialBreach,
            (false, true) => BreachStatus::LateralBreach,
            (true, true) => BreachStatus::BothBreach,
        }
    }

    /// Whether any wall is breached.
    pub fn is_breach(&self) -> bool {
        *self != BreachStatus::NoBreach
    }

    /// Number of breached walls (0, 1 or 2).
    pub fn breached_walls(&self) -> usize {
        match self {
            BreachStatus::NoBreach => 0,
            BreachStatus::MedialBreach | BreachStatus::LateralBreach => 1,
            BreachStatus::BothBreach => 2,
        }
    }

    /// Human-readable label.
    pub fn as_str(&self) -> &'static str {
        match self {
            BreachStatus::NoBreach => "No breach",
            BreachStatus::MedialBreach => "Medial breach",
            BreachStatus::LateralBreach => "Lateral breach",
            BreachStatus::BothBreach => "Both breach",
        }
    }
}

impl fmt::Display for BreachStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of checking one screw against both walls.
#[derive(Debug, Clone, PartialEq)]
pub struct BreachRecord {
    /// Screw identifier (file name).
    pub screw_id: String,
    /// Shortest vertex-to-vertex distance to the medial wall.
    pub distance_to_medial: f64,
    /// Shortest vertex-to-vertex distance to the lateral wall.
    pub distance_to_lateral: f64,
    /// Breach status.
    pub status: BreachStatus,
    /// Screw points where a wall is breached: medial first, then lateral.
    /// Empty iff `status` is [`BreachStatus::NoBreach`].
    pub breach_points: Vec<Point3<f64>>,
}

impl BreachRecord {
    /// Breach point on the medial wall, if breached.
    pub fn medial_breach_point(&self) -> Option<&Point3<f64>> {
        match self.status {
            BreachStatus::MedialBreach | BreachStatus::BothBreach => self.breach_points.first(),
            _ => None,
        }
    }

    /// Breach point on the lateral wall, if breached.
    pub fn lateral_breach_point(&self) -> Option<&Point3<f64>> {
        match self.status {
            BreachStatus::LateralBreach | BreachStatus::BothBreach => self.breach_points.last(),
            _ => None,
        }
    }
}

/// Classify a screw from its closest distances to each wall.
///
/// A wall is breached iff its distance is strictly below `tolerance`; a
/// distance equal to the tolerance is acceptable clearance. `point_medial`
/// and `point_lateral` are the screw's closest points to each wall and are
/// recorded only for breached walls.
///
/// # Example
///
/// ```
/// use screwbreach::algo::classify::{classify, BreachStatus};
/// use nalgebra::Point3;
///
/// let p = Point3::new(1.0, 2.0, 3.0);
/// let q = Point3::new(4.0, 5.0, 6.0);
/// let record = classify("screw_1.stl", 0.3, 5.0, p, q, 0.5);
///
/// assert_eq!(record.status, BreachStatus::MedialBreach);
/// assert_eq!(record.breach_points, vec![p]);
/// ```
pub fn classify(
    screw_id: impl Into<String>,
    dist_medial: f64,
    dist_lateral: f64,
    point_medial: Point3<f64>,
    point_lateral: Point3<f64>,
    tolerance: f64,
) -> BreachRecord {
    let medial = dist_medial < tolerance;
    let lateral = dist_lateral < tolerance;

    let mut breach_points = Vec::with_capacity(2);
    if medial {
        breach_points.push(point_medial);
    }
    if lateral {
        breach_points.push(point_lateral);
    }

    BreachRecord {
        screw_id: screw_id.into(),
        distance_to_medial: dist_medial,
        distance_to_lateral: dist_lateral,
        status: BreachStatus::from_flags(medial, lateral),
        breach_points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pm() -> Point3<f64> {
        Point3::new(1.0, 0.0, 0.0)
    }

    fn pl() -> Point3<f64> {
        Point3::new(-1.0, 0.0, 0.0)
    }

    #[test]
    fn test_all_statuses() {
        let cases = [
            (1.0, 1.0, BreachStatus::NoBreach, vec![]),
            (0.1, 1.0, BreachStatus::MedialBreach, vec![pm()]),
            (1.0, 0.1, BreachStatus::LateralBreach, vec![pl()]),
            (0.1, 0.2, BreachStatus::BothBreach, vec![pm(), pl()]),
        ];

        for (dm, dl, status, points) in cases {
            let record = classify("s", dm, dl, pm(), pl(), DEFAULT_TOLERANCE);
            assert_eq!(record.status, status);
            assert_eq!(record.breach_points, points);
            assert_eq!(record.breach_points.is_empty(), !status.is_breach());
            assert_eq!(record.breach_points.len(), status.breached_walls());
        }
    }

    #[test]
    fn test_distance_equal_to_tolerance_is_not_a_breach() {
        let record = classify("s", 0.5, 0.5, pm(), pl(), 0.5);
        assert_eq!(record.status, BreachStatus::NoBreach);
        assert!(record.breach_points.is_empty());

        let just_below = 0.5 - 1e-9;
        let record = classify("s", just_below, 0.5, pm(), pl(), 0.5);
        assert_eq!(record.status, BreachStatus::MedialBreach);

        let record = classify("s", 0.5, just_below, pm(), pl(), 0.5);
        assert_eq!(record.status, BreachStatus::LateralBreach);
    }

    #[test]
    fn test_zero_tolerance_never_breaches() {
        let record = classify("s", 0.0, 0.0, pm(), pl(), 0.0);
        assert_eq!(record.status, BreachStatus::NoBreach);
    }

    #[test]
    fn test_breach_point_accessors() {
        let both = classify("s", 0.1, 0.1, pm(), pl(), 0.5);
        assert_eq!(both.medial_breach_point(), Some(&pm()));
        assert_eq!(both.lateral_breach_point(), Some(&pl()));

        let lateral = classify("s", 1.0, 0.1, pm(), pl(), 0.5);
        assert_eq!(lateral.medial_breach_point(), None);
        assert_eq!(lateral.lateral_breach_point(), Some(&pl()));
    }

    #[test]
    fn test_labels() {
        assert_eq!(BreachStatus::NoBreach.to_string(), "No breach");
        assert_eq!(BreachStatus::BothBreach.to_string(), "Both breach");
    }
}
