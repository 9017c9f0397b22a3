use arrow_array::{ArrayRef, FixedSizeListArray, Float32Array, Float64Array, RecordBatch};
use arrow_schema::{DataType, Field, Schema};
use bytes::Bytes;
use parquet::arrow::arrow_writer::ArrowWriter;
use std::sync::Arc;

fn width(dimension: usize) -> i32 {
    i32::try_from(dimension).expect("dimension fits in i32")
}

pub(crate) fn build_array(rows: &[[f32; 3]]) -> FixedSizeListArray {
    let rows = rows.iter().map(|row| row.to_vec()).collect::<Vec<_>>();
    build_list_array(&rows, 3, false)
}

pub(crate) fn build_list_array(
    rows: &[Vec<f32>],
    dimension: usize,
    child_nullable: bool,
) -> FixedSizeListArray {
    assert!(rows.iter().all(|row| row.len() == dimension));
    let values = Float32Array::from_iter_values(rows.iter().flatten().copied());
    FixedSizeListArray::new(
        Arc::new(Field::new("item", DataType::Float32, child_nullable)),
        width(dimension),
        Arc::new(values) as ArrayRef,
        None,
    )
}

pub(crate) fn build_f64_list_array(rows: &[Vec<f64>], dimension: usize) -> FixedSizeListArray {
    assert!(rows.iter().all(|row| row.len() == dimension));
    let values = Float64Array::from_iter_values(rows.iter().flatten().copied());
    FixedSizeListArray::new(
        Arc::new(Field::new("item", DataType::Float64, false)),
        width(dimension),
        Arc::new(values) as ArrayRef,
        None,
    )
}

pub(crate) fn feature_field_of(
    value_type: DataType,
    dimension: usize,
    child_nullable: bool,
    list_nullable: bool,
) -> Field {
    Field::new(
        "features",
        DataType::FixedSizeList(
            Arc::new(Field::new("item", value_type, child_nullable)),
            width(dimension),
        ),
        list_nullable,
    )
}

pub(crate) fn feature_field(dimension: usize, child_nullable: bool, list_nullable: bool) -> Field {
    feature_field_of(DataType::Float32, dimension, child_nullable, list_nullable)
}

pub(crate) fn write_parquet(array: FixedSizeListArray) -> Bytes {
    let field = feature_field(3, false, false);
    write_parquet_with_field(field, array)
}

pub(crate) fn write_parquet_with_field(field: Field, array: FixedSizeListArray) -> Bytes {
    write_parquet_batches(field, vec![array])
}

/// Writes each array as its own record batch so readers see several batches.
pub(crate) fn write_parquet_batches(field: Field, arrays: Vec<FixedSizeListArray>) -> Bytes {
    let schema = Arc::new(Schema::new(vec![field]));
    let mut buffer = Vec::new();
    {
        let mut writer = ArrowWriter::try_new(&mut buffer, schema.clone(), None).expect("writer");
        for array in arrays {
            let batch = RecordBatch::try_new(schema.clone(), vec![Arc::new(array) as ArrayRef])
                .expect("batch");
            writer.write(&batch).expect("write");
        }
        writer.close().expect("close");
    }
    Bytes::from(buffer)
}
