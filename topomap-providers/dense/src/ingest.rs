//! Helpers for ingesting fixed-size list arrays into dense `f64` buffers.
use arrow_array::{Array, FixedSizeListArray, Float32Array, Float64Array};
use arrow_schema::{DataType, Field};

use crate::errors::DenseMatrixProviderError;

fn is_float(data_type: &DataType) -> bool {
    matches!(data_type, DataType::Float32 | DataType::Float64)
}

fn list_dimension(width: i32) -> Result<usize, DenseMatrixProviderError> {
    match usize::try_from(width) {
        Ok(dimension) if dimension > 0 => Ok(dimension),
        _ => Err(DenseMatrixProviderError::InvalidDimension { actual: width }),
    }
}

pub(crate) fn validate_fixed_size_list_field(
    field: &Field,
    column: &str,
) -> Result<usize, DenseMatrixProviderError> {
    match field.data_type() {
        DataType::FixedSizeList(child, width) => {
            if field.is_nullable() || child.is_nullable() {
                return Err(DenseMatrixProviderError::NullableField {
                    column: column.to_owned(),
                    nullable_child: child.is_nullable(),
                });
            }
            if !is_float(child.data_type()) {
                return Err(DenseMatrixProviderError::InvalidListValueType {
                    actual: child.data_type().clone(),
                });
            }
            list_dimension(*width)
        }
        other => Err(DenseMatrixProviderError::InvalidColumnType {
            column: column.to_owned(),
            actual: other.clone(),
        }),
    }
}

pub(crate) fn append_fixed_size_list_values(
    array: &FixedSizeListArray,
    expected_dimension: Option<usize>,
    start_row: usize,
    out: &mut Vec<f64>,
) -> Result<usize, DenseMatrixProviderError> {
    let dimension = validate_fixed_size_list(array)?;
    if let Some(expected) = expected_dimension.filter(|&expected| expected != dimension) {
        return Err(DenseMatrixProviderError::InconsistentBatchDimension {
            expected,
            actual: dimension,
        });
    }
    copy_list_values(array, dimension, start_row, out)?;
    Ok(dimension)
}

pub(crate) fn validate_fixed_size_list(
    array: &FixedSizeListArray,
) -> Result<usize, DenseMatrixProviderError> {
    let value_type = array.value_type();
    if !is_float(&value_type) {
        return Err(DenseMatrixProviderError::InvalidListValueType { actual: value_type });
    }
    list_dimension(array.value_length())
}

/// Borrowed view of one list row in either supported float width.
enum FloatRow<'a> {
    Single(&'a Float32Array),
    Double(&'a Float64Array),
}

impl FloatRow<'_> {
    fn len(&self) -> usize {
        match self {
            Self::Single(values) => values.len(),
            Self::Double(values) => values.len(),
        }
    }

    fn first_null(&self) -> Option<usize> {
        let (nulls, len) = match self {
            Self::Single(values) => (values.null_count(), values.len()),
            Self::Double(values) => (values.null_count(), values.len()),
        };
        if nulls == 0 {
            return None;
        }
        (0..len).find(|&idx| match self {
            Self::Single(values) => values.is_null(idx),
            Self::Double(values) => values.is_null(idx),
        })
    }

    fn extend_into(&self, out: &mut Vec<f64>) {
        match self {
            Self::Single(values) => out.extend(values.values().iter().map(|&v| f64::from(v))),
            Self::Double(values) => out.extend_from_slice(values.values()),
        }
    }
}

pub(crate) fn copy_list_values(
    array: &FixedSizeListArray,
    dimension: usize,
    start_row: usize,
    out: &mut Vec<f64>,
) -> Result<(), DenseMatrixProviderError> {
    let rows = array.len();
    let additional = rows
        .checked_mul(dimension)
        .ok_or(DenseMatrixProviderError::CapacityOverflow { rows, dimension })?;
    out.reserve(additional);
    for row_index in 0..rows {
        let absolute_row = start_row + row_index;
        if array.is_null(row_index) {
            return Err(DenseMatrixProviderError::NullRow { row: absolute_row });
        }
        let row = array.value(row_index);
        let floats = if let Some(values) = row.as_any().downcast_ref::<Float32Array>() {
            FloatRow::Single(values)
        } else if let Some(values) = row.as_any().downcast_ref::<Float64Array>() {
            FloatRow::Double(values)
        } else {
            return Err(DenseMatrixProviderError::InvalidListValueType {
                actual: row.data_type().clone(),
            });
        };
        if floats.len() != dimension {
            return Err(DenseMatrixProviderError::InvalidRowLength {
                row: absolute_row,
                expected: dimension,
                actual: floats.len(),
            });
        }
        if let Some(value_index) = floats.first_null() {
            return Err(DenseMatrixProviderError::NullValue {
                row: absolute_row,
                value_index,
            });
        }
        floats.extend_into(out);
    }
    Ok(())
}
