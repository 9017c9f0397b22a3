//! Planar primitives shared by hull construction and point placement.

/// A position in the projected plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// The origin of the plane.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Creates a point from its coordinates.
    ///
    /// # Examples
    /// ```
    /// use topomap_core::Point;
    ///
    /// let p = Point::new(3.0, 4.0);
    /// assert_eq!(p.distance(Point::ORIGIN), 5.0);
    /// ```
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the squared Euclidean distance to `other`.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Returns the Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// Signed area of the parallelogram spanned by `origin -> a` and
/// `origin -> b`. Negative when `b` lies clockwise of `a`.
pub(crate) fn cross(origin: Point, a: Point, b: Point) -> f64 {
    (a.x - origin.x) * (b.y - origin.y) - (a.y - origin.y) * (b.x - origin.x)
}

/// A rigid motion: translate by `(tx, ty)`, then rotate about the origin by
/// the angle whose cosine and sine are `cos` and `sin`.
///
/// # Examples
/// ```
/// use topomap_core::{Point, Transformation};
///
/// let shift = Transformation::translation(-1.0, -1.0);
/// assert_eq!(shift.apply(Point::new(1.0, 1.0), 2.5), Point::new(0.0, 2.5));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transformation {
    /// Horizontal translation applied first.
    pub tx: f64,
    /// Vertical translation applied first.
    pub ty: f64,
    /// Cosine of the rotation applied after translating.
    pub cos: f64,
    /// Sine of the rotation applied after translating.
    pub sin: f64,
}

impl Transformation {
    /// The transformation that leaves every point in place.
    pub const IDENTITY: Self = Self::translation(0.0, 0.0);

    /// A pure translation with identity rotation.
    #[must_use]
    pub const fn translation(tx: f64, ty: f64) -> Self {
        Self {
            tx,
            ty,
            cos: 1.0,
            sin: 0.0,
        }
    }

    /// Replaces the rotation with the one that turns the direction
    /// `from -> to` onto the positive x axis.
    ///
    /// The sine is recovered from the cosine and negated unless the
    /// direction points strictly downwards, so a direction with a zero
    /// vertical component yields a non-positive sine. A zero-length
    /// direction has no orientation and keeps the identity rotation.
    #[must_use]
    pub fn with_rotation_along(self, from: Point, to: Point) -> Self {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let length = (dx * dx + dy * dy).sqrt();
        if !(length > 0.0 && length.is_finite()) {
            return Self {
                cos: 1.0,
                sin: 0.0,
                ..self
            };
        }
        let cos = dx / length;
        let unit_y = dy / length;
        let magnitude = (1.0 - cos * cos).max(0.0).sqrt();
        let sin = if unit_y >= 0.0 { -magnitude } else { magnitude };
        Self { cos, sin, ..self }
    }

    /// Applies the transformation to `point` and lifts the result by
    /// `y_offset`.
    #[must_use]
    pub fn apply(&self, point: Point, y_offset: f64) -> Point {
        let x = point.x + self.tx;
        let y = point.y + self.ty;
        let rotated_x = x * self.cos - y * self.sin;
        let rotated_y = x * self.sin + y * self.cos;
        Point::new(rotated_x, rotated_y + y_offset)
    }
}

impl Default for Transformation {
    fn default() -> Self {
        Self::IDENTITY
    }
}
