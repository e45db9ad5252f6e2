use std::ops::Index;

use nalgebra::Point3;

/// An ordered set of 3D points, one per mesh vertex.
///
/// Point sets are built once (usually by a loader) and then only read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    points: Vec<Point3<f64>>,
}

impl PointSet {
    /// Create a point set from a list of points.
    pub fn new(points: Vec<Point3<f64>>) -> Self {
        Self { points }
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the set has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The points as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Iterate over the points in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point3<f64>> {
        self.points.iter()
    }

    /// Arithmetic mean of the X coordinate, or `None` for an empty set.
    pub fn mean_x(&self) -> Option<f64> {
        if self.points.is_empty() {
            return None;
        }
        let sum: f64 = self.points.iter().map(|p| p.x).sum();
        Some(sum / self.points.len() as f64)
    }

    /// Centroid of all points, or `None` for an empty set.
    pub fn centroid(&self) -> Option<Point3<f64>> {
        if self.points.is_empty() {
            return None;
        }
        let sum = self
            .points
            .iter()
            .fold(nalgebra::Vector3::zeros(), |acc, p| acc + p.coords);
        Some(Point3::from(sum / self.points.len() as f64))
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` for an empty set.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = self.points.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &self.points[1..] {
            min = min.inf(p);
            max = max.sup(p);
        }
        Some((min, max))
    }
}

impl Index<usize> for PointSet {
    type Output = Point3<f64>;

    #[inline]
    fn index(&self, index: usize) -> &Point3<f64> {
        &self.points[index]
    }
}

impl From<Vec<Point3<f64>>> for PointSet {
    fn from(points: Vec<Point3<f64>>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Point3<f64>> for PointSet {
    fn from_iter<T: IntoIterator<Item = Point3<f64>>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point3<f64>;
    type IntoIter = std::slice::Iter<'a, Point3<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
