use arrow_schema::{ArrowError, DataType};
use thiserror::Error;
use topomap_core::DataSourceError;

/// Errors raised while loading a dense point cloud.
#[derive(Debug, Error)]
pub enum DenseMatrixProviderError {
    #[error("input contains no points")]
    EmptyInput,
    #[error("row {row}, column {column}: cannot parse `{value}` as a number")]
    InvalidNumber {
        row: usize,
        column: usize,
        value: String,
    },
    #[error("column `{column}` not found in Parquet schema")]
    ColumnNotFound { column: String },
    #[error("column `{column}` must be a FixedSizeList<Float32 | Float64, _> but found {actual:?}")]
    InvalidColumnType { column: String, actual: DataType },
    #[error("FixedSizeList child type must be Float32 or Float64 but found {actual:?}")]
    InvalidListValueType { actual: DataType },
    #[error("column `{column}` must not be nullable (nullable child: {nullable_child})")]
    NullableField { column: String, nullable_child: bool },
    #[error("invalid FixedSizeList dimension {actual}")]
    InvalidDimension { actual: i32 },
    #[error("row {row} is null")]
    NullRow { row: usize },
    #[error("row {row} contains null value at position {value_index}")]
    NullValue { row: usize, value_index: usize },
    #[error("row {row} has length {actual} but expected {expected}")]
    InvalidRowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("matrix with {rows} rows and dimension {dimension} exceeds capacity limits")]
    CapacityOverflow { rows: usize, dimension: usize },
    #[error("inconsistent dimensions across batches: expected {expected}, got {actual}")]
    InconsistentBatchDimension { expected: usize, actual: usize },
    #[error("invalid point data: {0}")]
    InvalidPoints(#[from] DataSourceError),
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
