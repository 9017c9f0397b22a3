//! Dense matrix provider implementation and ingestion utilities.
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use arrow_array::{Array, FixedSizeListArray, RecordBatchReader};
use parquet::arrow::{ProjectionMask, arrow_reader::ParquetRecordBatchReaderBuilder};
use parquet::file::reader::ChunkReader;
use topomap_core::{DataSource, DataSourceError, PointMatrix};

use crate::csv::{CsvRows, read_rows};
use crate::errors::DenseMatrixProviderError;
use crate::ingest::{append_fixed_size_list_values, validate_fixed_size_list_field};

/// Dense point cloud backed by a validated, row-major `f64` matrix.
///
/// Every constructor rejects empty input and non-finite coordinates, so a
/// provider can be handed straight to the projection pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct DenseMatrixProvider {
    matrix: PointMatrix,
}

impl DenseMatrixProvider {
    pub(crate) fn from_parts(
        name: impl Into<String>,
        dimension: usize,
        values: Vec<f64>,
    ) -> Result<Self, DenseMatrixProviderError> {
        if values.is_empty() {
            return Err(DenseMatrixProviderError::EmptyInput);
        }
        let matrix = PointMatrix::try_new(name, dimension, values)?;
        Ok(Self { matrix })
    }

    /// Returns the underlying row-major matrix.
    #[must_use]
    pub fn data(&self) -> &[f64] {
        self.matrix.values()
    }

    /// Borrows the validated matrix.
    #[must_use]
    pub fn matrix(&self) -> &PointMatrix {
        &self.matrix
    }

    #[must_use]
    pub fn into_matrix(self) -> PointMatrix {
        self.matrix
    }

    /// Loads headerless CSV text with one point per non-blank line.
    ///
    /// # Errors
    /// Returns [`DenseMatrixProviderError::EmptyInput`] when no rows are
    /// present, [`DenseMatrixProviderError::InvalidNumber`] for fields that
    /// do not parse as numbers, [`DenseMatrixProviderError::InvalidRowLength`]
    /// when a row disagrees with the first row's width, and
    /// [`DenseMatrixProviderError::InvalidPoints`] for non-finite values.
    ///
    /// # Examples
    /// ```
    /// use topomap_core::DataSource;
    /// use topomap_providers_dense::DenseMatrixProvider;
    ///
    /// let csv = "0,0\n3,4\n";
    /// let provider = DenseMatrixProvider::try_from_csv_reader("pair", csv.as_bytes())?;
    /// assert_eq!(provider.len(), 2);
    /// assert_eq!(provider.distance(0, 1)?, 5.0);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_from_csv_reader<R: BufRead>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, DenseMatrixProviderError> {
        let CsvRows { dimension, values } = read_rows(reader)?;
        Self::from_parts(name, dimension, values)
    }

    /// Loads a CSV file. See [`Self::try_from_csv_reader`].
    pub fn try_from_csv_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, DenseMatrixProviderError> {
        let file = File::open(path)?;
        Self::try_from_csv_reader(name, BufReader::new(file))
    }

    /// Loads data from an Arrow [`FixedSizeListArray`] of `Float32` or
    /// `Float64` values.
    pub fn try_from_fixed_size_list(
        name: impl Into<String>,
        array: &FixedSizeListArray,
    ) -> Result<Self, DenseMatrixProviderError> {
        let mut values = Vec::new();
        let dimension = append_fixed_size_list_values(array, None, 0, &mut values)?;
        Self::from_parts(name, dimension, values)
    }

    /// Loads data from a Parquet column containing
    /// `FixedSizeList<Float32 | Float64, D>` rows.
    pub fn try_from_parquet_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        column: &str,
    ) -> Result<Self, DenseMatrixProviderError> {
        let file = File::open(path)?;
        Self::try_from_parquet_reader(name, file, column)
    }

    /// Loads data from a Parquet reader.
    pub fn try_from_parquet_reader<R>(
        name: impl Into<String>,
        reader: R,
        column: &str,
    ) -> Result<Self, DenseMatrixProviderError>
    where
        R: ChunkReader + Send + 'static,
    {
        let builder = ParquetRecordBatchReaderBuilder::try_new(reader)?;
        let mask = ProjectionMask::columns(builder.parquet_schema(), [column]);
        let reader = builder.with_projection(mask).build()?;
        let schema = reader.schema();
        let column_index =
            schema
                .index_of(column)
                .map_err(|_| DenseMatrixProviderError::ColumnNotFound {
                    column: column.to_owned(),
                })?;
        let field = schema.field(column_index);
        let dimension = validate_fixed_size_list_field(field, column)?;
        let mut values = Vec::new();
        let mut rows = 0_usize;
        for batch in reader {
            let batch = batch?;
            let column_array = batch.column(column_index);
            let list = column_array
                .as_any()
                .downcast_ref::<FixedSizeListArray>()
                .ok_or_else(|| DenseMatrixProviderError::InvalidColumnType {
                    column: column.to_owned(),
                    actual: column_array.data_type().clone(),
                })?;
            append_fixed_size_list_values(list, Some(dimension), rows, &mut values)?;
            rows += list.len();
        }
        Self::from_parts(name, dimension, values)
    }
}

impl DataSource for DenseMatrixProvider {
    fn len(&self) -> usize {
        self.matrix.len()
    }

    fn name(&self) -> &str {
        self.matrix.name()
    }

    fn dimension(&self) -> usize {
        self.matrix.dimension()
    }

    fn point(&self, index: usize) -> Result<&[f64], DataSourceError> {
        self.matrix.point(index)
    }
}
