//! Closest-pair distance between two point sets.
//!
//! The search is exhaustive: every point of `a` is compared with every point
//! of `b`, O(n·m). No spatial index is used, so the result is exactly the
//! minimum over all pairs.
//!
//! Pairs are ranked on their Euclidean distance as computed, not on the
//! squared distance, so two pairs whose squared distances differ only below
//! the precision of the square root count as tied. When several pairs share
//! the minimum, the first one in row-major order (lowest index in `a`, then
//! lowest index in `b`) wins. Both the sequential
//! and the parallel scan honor this, so they always return the same pair.
//!
//! # Example
//!
//! ```
//! use screwbreach::algo::distance::nearest_distance;
//! use screwbreach::mesh::PointSet;
//! use nalgebra::Point3;
//!
//! let screw = PointSet::new(vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 4.0)]);
//! let wall = PointSet::new(vec![Point3::new(3.0, 0.0, 8.0), Point3::new(3.0, 0.0, 0.0)]);
//!
//! let result = nearest_distance(&screw, &wall).unwrap();
//! assert_eq!(result.distance, 3.0);
//! assert_eq!((result.index_a, result.index_b), (0, 1));
//! ```

use nalgebra::Point3;
use rayon::prelude::*;

use crate::error::{BreachError, Result};
use crate::mesh::PointSet;

/// The closest pair between two point sets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceResult {
    /// Euclidean distance between the closest pair, in the meshes' unit.
    pub distance: f64,
    /// Index of the closest point in the first set.
    pub index_a: usize,
    /// Index of the closest point in the second set.
    pub index_b: usize,
    /// The closest point in the first set.
    pub point_a: Point3<f64>,
    /// The closest point in the second set.
    pub point_b: Point3<f64>,
}

/// Best pair found so far.
#[derive(Clone, Copy)]
struct Candidate {
    dist: f64,
    i: usize,
    j: usize,
}

impl Candidate {
    /// Keep the smaller distance; on equal distance keep the earlier pair.
    #[inline]
    fn better(self, other: Candidate) -> Candidate {
        if other.dist < self.dist
            || (other.dist == self.dist && (other.i, other.j) < (self.i, self.j))
        {
            other
        } else {
            self
        }
    }
}

/// Closest point in `b` to the point `p`, as (distance, index).
///
/// Ties go to the lowest index.
#[inline]
fn closest_in(p: &Point3<f64>, b: &[Point3<f64>]) -> (f64, usize) {
    let mut best = (f64::INFINITY, 0);
    for (j, q) in b.iter().enumerate() {
        let d = (p - q).norm();
        if d < best.0 {
            best = (d, j);
        }
    }
    best
}

fn check_non_empty(a: &PointSet, b: &PointSet) -> Result<()> {
    if a.is_empty() {
        return Err(BreachError::empty("a"));
    }
    if b.is_empty() {
        return Err(BreachError::empty("b"));
    }
    Ok(())
}

fn finish(a: &PointSet, b: &PointSet, best: Candidate) -> DistanceResult {
    DistanceResult {
        distance: best.dist,
        index_a: best.i,
        index_b: best.j,
        point_a: a[best.i],
        point_b: b[best.j],
    }
}

/// Find the closest pair of points between `a` and `b`.
///
/// Returns [`BreachError::EmptyPointSet`] if either set is empty. Passing the
/// same set twice is allowed and yields distance 0 at `index_a == index_b == 0`.
pub fn nearest_distance(a: &PointSet, b: &PointSet) -> Result<DistanceResult> {
    check_non_empty(a, b)?;

    let b_points = b.as_slice();
    let mut best = Candidate {
        dist: f64::INFINITY,
        i: 0,
        j: 0,
    };

    for (i, p) in a.iter().enumerate() {
        let (dist, j) = closest_in(p, b_points);
        // strict: an equal distance in a later row never replaces the earlier pair
        if dist < best.dist {
            best = Candidate { dist, i, j };
        }
    }

    Ok(finish(a, b, best))
}

/// Parallel version of [`nearest_distance`].
///
/// Rows of `a` are scanned on the rayon thread pool. The reduction uses the
/// same row-major tie-break, so the result is identical to the sequential scan.
pub fn nearest_distance_par(a: &PointSet, b: &PointSet) -> Result<DistanceResult> {
    check_non_empty(a, b)?;

    let b_points = b.as_slice();
    let init = Candidate {
        dist: f64::INFINITY,
        i: usize::MAX,
        j: usize::MAX,
    };

    let best = a
        .as_slice()
        .par_iter()
        .enumerate()
        .map(|(i, p)| {
            let (dist, j) = closest_in(p, b_points);
            Candidate { dist, i, j }
        })
        .reduce(|| init, Candidate::better);

    Ok(finish(a, b, best))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn set(points: &[[f64; 3]]) -> PointSet {
        points.iter().map(|p| Point3::new(p[0], p[1], p[2])).collect()
    }

    /// Brute-force reference over every pair.
    fn all_pairs_min(a: &PointSet, b: &PointSet) -> f64 {
        let mut min = f64::INFINITY;
        for p in a {
            for q in b {
                min = min.min((p - q).norm());
            }
        }
        min
    }

    fn fixtures() -> Vec<(PointSet, PointSet)> {
        vec![
            (
                set(&[[0.0, 0.0, 0.0], [1.0, 2.0, 3.0], [-4.0, 0.5, 2.0]]),
                set(&[[5.0, 5.0, 5.0], [1.5, 2.0, 2.0], [-3.0, 0.0, 0.0], [9.0, -1.0, 0.0]]),
            ),
            (
                set(&[[10.0, 0.0, 0.0]]),
                set(&[[-10.0, 0.0, 0.0], [-10.0, 1.0, 0.0]]),
            ),
            (
                set(&[[0.1, 0.2, 0.3], [0.4, 0.5, 0.6], [0.7, 0.8, 0.9], [1.0, 1.1, 1.2]]),
                set(&[[0.35, 0.5, 0.61], [2.0, 2.0, 2.0]]),
            ),
        ]
    }

    #[test]
    fn test_matches_exhaustive_minimum() {
        for (a, b) in fixtures() {
            let result = nearest_distance(&a, &b).unwrap();
            assert_relative_eq!(result.distance, all_pairs_min(&a, &b), epsilon = 1e-12);
            assert_relative_eq!(
                result.distance,
                (result.point_a - result.point_b).norm(),
                epsilon = 1e-12
            );
            assert_eq!(result.point_a, a[result.index_a]);
            assert_eq!(result.point_b, b[result.index_b]);
        }
    }

    #[test]
    fn test_symmetric() {
        for (a, b) in fixtures() {
            let ab = nearest_distance(&a, &b).unwrap();
            let ba = nearest_distance(&b, &a).unwrap();
            assert_eq!(ab.distance, ba.distance);
            assert_eq!((ab.index_a, ab.index_b), (ba.index_b, ba.index_a));
        }
    }

    #[test]
    fn test_self_distance_is_zero() {
        for (a, _) in fixtures() {
            let result = nearest_distance(&a, &a).unwrap();
            assert_eq!(result.distance, 0.0);
            assert_eq!(result.index_a, result.index_b);
        }
    }

    #[test]
    fn test_tie_break_is_row_major() {
        // every pair is at distance 1
        let a = set(&[[0.0, 0.0, 0.0], [0.0, 0.0, 0.0]]);
        let b = set(&[[1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);

        let result = nearest_distance(&a, &b).unwrap();
        assert_eq!(result.distance, 1.0);
        assert_eq!((result.index_a, result.index_b), (0, 0));

        // the tie in a later row does not win either
        let a = set(&[[5.0, 0.0, 0.0], [0.0, 0.0, 0.0], [2.0, 0.0, 0.0]]);
        let b = set(&[[1.0, 0.0, 0.0]]);
        let result = nearest_distance(&a, &b).unwrap();
        assert_eq!((result.index_a, result.index_b), (1, 0));
    }

    #[test]
    fn test_tie_on_rounded_distance_keeps_first_row() {
        // squared distances differ in the last bit, the distances do not
        let a = set(&[
            [1.9547789181682889, 2.3661700534065395, 0.2815787603227047],
            [1.9547789181682889, 2.3661700534065395, 0.2815787603227046],
        ]);
        let b = set(&[[0.0, 0.0, 0.0]]);
        assert_eq!((a[0] - b[0]).norm(), (a[1] - b[0]).norm());

        let seq = nearest_distance(&a, &b).unwrap();
        let par = nearest_distance_par(&a, &b).unwrap();
        assert_eq!((seq.index_a, seq.index_b), (0, 0));
        assert_eq!(seq, par);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut cases = fixtures();
        cases.push((
            set(&[[0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]]),
            set(&[[0.0, 0.0, 2.0], [0.0, 2.0, 0.0]]),
        ));
        let grid: PointSet = (0..400)
            .map(|k| Point3::new((k % 20) as f64, (k / 20) as f64, 0.0))
            .collect();
        let query = set(&[[7.0, 7.0, 1.0], [12.0, 3.0, 1.0], [7.0, 7.0, 1.0]]);
        cases.push((grid.clone(), query.clone()));
        cases.push((query, grid));

        for (a, b) in cases {
            let seq = nearest_distance(&a, &b).unwrap();
            let par = nearest_distance_par(&a, &b).unwrap();
            assert_eq!(seq, par);
        }
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let a = set(&[[0.0, 0.0, 0.0]]);
        let empty = PointSet::default();

        assert!(matches!(
            nearest_distance(&a, &empty),
            Err(BreachError::EmptyPointSet { .. })
        ));
        assert!(matches!(
            nearest_distance(&empty, &a),
            Err(BreachError::EmptyPointSet { .. })
        ));
        assert!(matches!(
            nearest_distance_par(&empty, &a),
            Err(BreachError::EmptyPointSet { .. })
        ));
    }
}
