//! Contiguous row-major point storage consumed by the spanning tree builder.

use crate::{datasource::DataSource, error::DataSourceError};

/// A validated, row-major matrix of finite `f64` coordinates.
///
/// # Examples
/// ```
/// use topomap_core::{DataSource, PointMatrix};
///
/// let matrix = PointMatrix::try_new("demo", 2, vec![0.0, 0.0, 3.0, 4.0])?;
/// assert_eq!(matrix.len(), 2);
/// assert_eq!(matrix.point(1)?, &[3.0, 4.0]);
/// # Ok::<(), topomap_core::DataSourceError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PointMatrix {
    name: String,
    dimension: usize,
    values: Vec<f64>,
}

impl PointMatrix {
    /// Builds a matrix from a flat buffer of `dimension`-sized rows.
    ///
    /// # Errors
    /// Returns [`DataSourceError::ZeroDimension`] when `dimension == 0`,
    /// [`DataSourceError::EmptyData`] when `values` is empty,
    /// [`DataSourceError::RaggedValues`] when `values` does not split into
    /// whole rows, and [`DataSourceError::NonFiniteValue`] for NaN or
    /// infinite coordinates.
    pub fn try_new(
        name: impl Into<String>,
        dimension: usize,
        values: Vec<f64>,
    ) -> Result<Self, DataSourceError> {
        if dimension == 0 {
            return Err(DataSourceError::ZeroDimension);
        }
        if values.is_empty() {
            return Err(DataSourceError::EmptyData);
        }
        if values.len() % dimension != 0 {
            return Err(DataSourceError::RaggedValues {
                values: values.len(),
                dimension,
            });
        }
        if let Some(position) = values.iter().position(|value| !value.is_finite()) {
            return Err(DataSourceError::NonFiniteValue {
                row: position / dimension,
                column: position % dimension,
            });
        }
        Ok(Self {
            name: name.into(),
            dimension,
            values,
        })
    }

    /// Builds a matrix from individual rows, which must share one length.
    ///
    /// # Errors
    /// Returns [`DataSourceError::EmptyData`] for no rows,
    /// [`DataSourceError::DimensionMismatch`] for ragged rows, and the
    /// errors of [`Self::try_new`] otherwise.
    pub fn from_rows(name: impl Into<String>, rows: &[Vec<f64>]) -> Result<Self, DataSourceError> {
        let Some((first, _)) = rows.split_first() else {
            return Err(DataSourceError::EmptyData);
        };
        let dimension = first.len();
        let mut values = Vec::with_capacity(rows.len().saturating_mul(dimension));
        for (row, coordinates) in rows.iter().enumerate() {
            if coordinates.len() != dimension {
                return Err(DataSourceError::DimensionMismatch {
                    row,
                    expected: dimension,
                    actual: coordinates.len(),
                });
            }
            values.extend_from_slice(coordinates);
        }
        Self::try_new(name, dimension, values)
    }

    /// Copies every point of `source` into a contiguous matrix.
    ///
    /// # Errors
    /// Returns any error raised while reading points from `source`, and the
    /// validation errors of [`Self::try_new`].
    pub fn from_source<D: DataSource + ?Sized>(source: &D) -> Result<Self, DataSourceError> {
        let dimension = source.dimension();
        let mut values = Vec::with_capacity(source.len().saturating_mul(dimension));
        for row in 0..source.len() {
            let point = source.point(row)?;
            if point.len() != dimension {
                return Err(DataSourceError::DimensionMismatch {
                    row,
                    expected: dimension,
                    actual: point.len(),
                });
            }
            values.extend_from_slice(point);
        }
        Self::try_new(source.name(), dimension, values)
    }

    /// Returns the row-major coordinate buffer.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the coordinates of `row`, or `None` when out of range.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        let start = row.checked_mul(self.dimension)?;
        let end = start.checked_add(self.dimension)?;
        self.values.get(start..end)
    }

    /// Returns the coordinate at (`row`, `axis`) without bounds checks
    /// beyond the slice's own.
    pub(crate) fn coordinate(&self, row: usize, axis: usize) -> f64 {
        self.values[row * self.dimension + axis]
    }

    /// Squared Euclidean distance between two rows.
    pub(crate) fn distance_squared(&self, left: usize, right: usize) -> f64 {
        let dimension = self.dimension;
        let a = &self.values[left * dimension..(left + 1) * dimension];
        let b = &self.values[right * dimension..(right + 1) * dimension];
        a.iter()
            .zip(b)
            .map(|(x, y)| {
                let d = x - y;
                d * d
            })
            .sum()
    }
}

impl DataSource for PointMatrix {
    fn len(&self) -> usize {
        self.values.len() / self.dimension
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn point(&self, index: usize) -> Result<&[f64], DataSourceError> {
        self.row(index).ok_or(DataSourceError::OutOfBounds { index })
    }
}
