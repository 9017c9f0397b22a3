//! Data source abstractions for the TopoMap core runtime.

use crate::error::DataSourceError;

/// Abstraction over a cloud of fixed-dimension points.
///
/// # Examples
/// ```
/// use topomap_core::{DataSource, DataSourceError};
///
/// struct Line(Vec<[f64; 1]>);
///
/// impl DataSource for Line {
///     fn len(&self) -> usize { self.0.len() }
///     fn name(&self) -> &str { "line" }
///     fn dimension(&self) -> usize { 1 }
///     fn point(&self, index: usize) -> Result<&[f64], DataSourceError> {
///         self.0
///             .get(index)
///             .map(|row| row.as_slice())
///             .ok_or(DataSourceError::OutOfBounds { index })
///     }
/// }
///
/// let src = Line(vec![[1.0], [4.0]]);
/// assert_eq!(src.len(), 2);
/// assert_eq!(src.distance(0, 1)?, 3.0);
/// # Ok::<(), DataSourceError>(())
/// ```
pub trait DataSource {
    /// Returns number of points in the source.
    fn len(&self) -> usize;

    /// Returns whether the source contains no points.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a human-readable name.
    fn name(&self) -> &str;

    /// Returns the number of coordinates per point.
    fn dimension(&self) -> usize;

    /// Returns the coordinates of the point at `index`.
    ///
    /// # Errors
    /// Returns [`DataSourceError::OutOfBounds`] for invalid indices.
    fn point(&self, index: usize) -> Result<&[f64], DataSourceError>;

    /// Computes the Euclidean distance between two points.
    ///
    /// # Errors
    /// Returns any error surfaced by [`DataSource::point`], or
    /// [`DataSourceError::DimensionMismatch`] when the rows disagree in
    /// length.
    fn distance(&self, i: usize, j: usize) -> Result<f64, DataSourceError> {
        let left = self.point(i)?;
        let right = self.point(j)?;
        if left.len() != right.len() {
            return Err(DataSourceError::DimensionMismatch {
                row: j,
                expected: left.len(),
                actual: right.len(),
            });
        }
        let sum = left
            .iter()
            .zip(right)
            .map(|(a, b)| {
                let d = a - b;
                d * d
            })
            .sum::<f64>();
        Ok(sum.sqrt())
    }
}
