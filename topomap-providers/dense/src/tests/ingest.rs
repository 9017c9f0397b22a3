use super::{DenseMatrixProvider, DenseMatrixProviderError, support::*};
use crate::ingest::{copy_list_values, validate_fixed_size_list_field};
use arrow_array::{ArrayRef, FixedSizeListArray, Int32Array, RecordBatch};
use arrow_schema::{DataType, Field, Schema};
use bytes::Bytes;
use rstest::rstest;
use std::sync::Arc;
use topomap_core::DataSource;

#[rstest]
fn matrix_provider_from_parquet() {
    let array = build_array(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    let bytes = write_parquet(array);
    let provider = DenseMatrixProvider::try_from_parquet_reader("demo", bytes, "features")
        .expect("parquet load");
    assert_eq!(provider.len(), 2);
    assert_eq!(provider.dimension(), 3);
    assert_eq!(provider.name(), "demo");
    assert_eq!(provider.data(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[rstest]
fn matrix_provider_from_f64_parquet_keeps_precision() {
    let rows = vec![vec![0.1, 1e-300], vec![-2.5, 1e300]];
    let field = feature_field_of(DataType::Float64, 2, false, false);
    let bytes = write_parquet_with_field(field, build_f64_list_array(&rows, 2));
    let provider = DenseMatrixProvider::try_from_parquet_reader("doubles", bytes, "features")
        .expect("parquet load");
    assert_eq!(provider.data(), &[0.1, 1e-300, -2.5, 1e300]);
}

#[rstest]
fn matrix_provider_concatenates_batches_in_order() {
    let first = build_list_array(&[vec![1.0, 2.0]], 2, false);
    let second = build_list_array(&[vec![3.0, 4.0], vec![5.0, 6.0]], 2, false);
    let bytes = write_parquet_batches(feature_field(2, false, false), vec![first, second]);
    let provider = DenseMatrixProvider::try_from_parquet_reader("demo", bytes, "features")
        .expect("parquet load");
    assert_eq!(provider.len(), 3);
    assert_eq!(provider.point(2).expect("row exists"), &[5.0, 6.0]);
}

#[rstest]
fn matrix_provider_parquet_missing_column() {
    let array = build_array(&[[1.0, 2.0, 3.0]]);
    let bytes = write_parquet(array);
    let err = DenseMatrixProvider::try_from_parquet_reader("demo", bytes, "unknown")
        .expect_err("missing column");
    assert!(matches!(
        err,
        DenseMatrixProviderError::ColumnNotFound { column } if column == "unknown"
    ));
}

#[rstest]
fn matrix_provider_parquet_wrong_type() {
    let field = Field::new("features", DataType::Int32, false);
    let schema = Arc::new(Schema::new(vec![field]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![Arc::new(Int32Array::from(vec![1, 2, 3])) as ArrayRef],
    )
    .expect("batch");
    let mut buffer = Vec::new();
    {
        let mut writer =
            parquet::arrow::arrow_writer::ArrowWriter::try_new(&mut buffer, schema, None)
                .expect("writer");
        writer.write(&batch).expect("write");
        writer.close().expect("close");
    }
    let err = DenseMatrixProvider::try_from_parquet_reader("demo", Bytes::from(buffer), "features")
        .expect_err("wrong type");
    assert!(matches!(
        err,
        DenseMatrixProviderError::InvalidColumnType { .. }
    ));
}

#[rstest]
#[case(true, false)]
#[case(false, true)]
fn matrix_provider_parquet_nullable_schema(
    #[case] list_nullable: bool,
    #[case] child_nullable: bool,
) {
    let rows = vec![vec![1.0, 2.0, 3.0]];
    let array = build_list_array(&rows, 3, child_nullable);
    let field = feature_field(3, child_nullable, list_nullable);
    let bytes = write_parquet_with_field(field, array);
    let err = DenseMatrixProvider::try_from_parquet_reader("demo", bytes, "features")
        .expect_err("nullable schema must be rejected");
    assert!(matches!(
        err,
        DenseMatrixProviderError::NullableField {
            column,
            nullable_child
        } if column == "features" && nullable_child == child_nullable
    ));
}

#[rstest]
#[case::negative(-1)]
#[case::zero(0)]
fn validate_field_rejects_unusable_dimension(#[case] width: i32) {
    let child = Arc::new(Field::new("item", DataType::Float32, false));
    let field = Field::new("features", DataType::FixedSizeList(child, width), false);
    let err = validate_fixed_size_list_field(&field, "features")
        .expect_err("dimension must be rejected");
    assert!(matches!(
        err,
        DenseMatrixProviderError::InvalidDimension { actual } if actual == width
    ));
}

#[test]
fn validate_field_rejects_integer_children() {
    let child = Arc::new(Field::new("item", DataType::Int64, false));
    let field = Field::new("features", DataType::FixedSizeList(child, 2), false);
    let err = validate_fixed_size_list_field(&field, "features")
        .expect_err("integer children must be rejected");
    assert!(matches!(
        err,
        DenseMatrixProviderError::InvalidListValueType {
            actual: DataType::Int64
        }
    ));
}

#[test]
fn copy_list_values_rejects_incorrect_length() {
    let rows = vec![vec![1.0, 2.0]];
    let array = build_list_array(&rows, 2, false);
    let mut values = Vec::new();
    let err = copy_list_values(&array, 3, 0, &mut values)
        .expect_err("incorrect lengths must be rejected");
    assert!(matches!(
        err,
        DenseMatrixProviderError::InvalidRowLength {
            row: 0,
            expected: 3,
            actual: 2
        }
    ));
}

#[test]
fn copy_list_values_reports_absolute_row_of_null_value() {
    let values = arrow_array::Float32Array::from(vec![Some(1.0), Some(2.0), Some(3.0), None]);
    let array = FixedSizeListArray::new(
        Arc::new(Field::new("item", DataType::Float32, true)),
        2,
        Arc::new(values) as ArrayRef,
        None,
    );
    let mut out = Vec::new();
    let err = copy_list_values(&array, 2, 10, &mut out).expect_err("null value must fail");
    assert!(matches!(
        err,
        DenseMatrixProviderError::NullValue {
            row: 11,
            value_index: 1
        }
    ));
}
