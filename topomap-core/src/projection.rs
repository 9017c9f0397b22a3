//! Projection output types.

use crate::geometry::Point;

/// Planar coordinates for every input point, in input order.
///
/// # Examples
/// ```
/// use topomap_core::{Point, Projection};
///
/// let projection = Projection::new(vec![Point::ORIGIN, Point::new(0.0, 1.0)]);
/// assert_eq!(projection.len(), 2);
/// assert_eq!(projection.points()[1].y, 1.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Projection {
    points: Vec<Point>,
}

impl Projection {
    /// Wraps placed coordinates.
    #[must_use]
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Returns the coordinates indexed by input position.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the number of projected points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns whether the projection holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consumes the projection, returning its coordinates.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}
