//! Error code stability across the public error types.

use std::sync::Arc;

use rstest::rstest;
use topomap_core::{
    DataSourceError, DataSourceErrorCode, EmstError, EmstErrorCode, PlacementError,
    PlacementErrorCode, TopoMapError, TopoMapErrorCode,
};

#[rstest]
#[case(DataSourceError::OutOfBounds { index: 0 }, "DATA_SOURCE_OUT_OF_BOUNDS")]
#[case(
    DataSourceError::DimensionMismatch { row: 1, expected: 2, actual: 3 },
    "DATA_SOURCE_DIMENSION_MISMATCH",
)]
#[case(DataSourceError::RaggedValues { values: 3, dimension: 2 }, "DATA_SOURCE_RAGGED_VALUES")]
#[case(DataSourceError::NonFiniteValue { row: 0, column: 1 }, "DATA_SOURCE_NON_FINITE_VALUE")]
#[case(DataSourceError::EmptyData, "DATA_SOURCE_EMPTY")]
#[case(DataSourceError::ZeroDimension, "DATA_SOURCE_ZERO_DIMENSION")]
fn data_source_codes_are_stable(#[case] error: DataSourceError, #[case] expected: &str) {
    assert_eq!(error.code().as_str(), expected);
    assert_eq!(error.code().to_string(), expected);
}

#[rstest]
#[case(
    PlacementError::EdgeWeightLengthMismatch { edges: 1, weights: 2 },
    PlacementErrorCode::EdgeWeightLengthMismatch,
    "PLACEMENT_EDGE_WEIGHT_LENGTH_MISMATCH",
)]
#[case(
    PlacementError::VertexOutOfRange { vertex: 4, vertex_count: 3 },
    PlacementErrorCode::VertexOutOfRange,
    "PLACEMENT_VERTEX_OUT_OF_RANGE",
)]
#[case(
    PlacementError::NotSpanning { vertex_count: 4, edges: 1 },
    PlacementErrorCode::NotSpanning,
    "PLACEMENT_NOT_SPANNING",
)]
#[case(
    PlacementError::InvalidWeight { source_vertex: 0, target_vertex: 1, weight: -2.0 },
    PlacementErrorCode::InvalidWeight,
    "PLACEMENT_INVALID_WEIGHT",
)]
#[case(
    PlacementError::SameComponent { source_vertex: 0, target_vertex: 1 },
    PlacementErrorCode::SameComponent,
    "PLACEMENT_SAME_COMPONENT",
)]
#[case(
    PlacementError::DegenerateZeroLength { source_vertex: 0, target_vertex: 1 },
    PlacementErrorCode::DegenerateZeroLength,
    "PLACEMENT_DEGENERATE_ZERO_LENGTH",
)]
#[case(
    PlacementError::MissingComponent { representative: 3 },
    PlacementErrorCode::MissingComponent,
    "PLACEMENT_MISSING_COMPONENT",
)]
fn placement_codes_are_stable(
    #[case] error: PlacementError,
    #[case] code: PlacementErrorCode,
    #[case] expected: &str,
) {
    assert_eq!(error.code(), code);
    assert_eq!(code.as_str(), expected);
    let wrapped = TopoMapError::from(error);
    assert_eq!(wrapped.code(), TopoMapErrorCode::PlacementFailure);
    assert_eq!(wrapped.placement_code(), Some(code));
    assert_eq!(wrapped.data_source_code(), None);
}

#[rstest]
#[case(EmstError::NonFiniteDistance { source_vertex: 0, target_vertex: 1 }, EmstErrorCode::NonFiniteDistance)]
#[case(EmstError::Stalled { components: 2 }, EmstErrorCode::Stalled)]
fn emst_errors_wrap_into_topomap_errors(#[case] error: EmstError, #[case] code: EmstErrorCode) {
    assert_eq!(error.code(), code);
    assert!(code.as_str().starts_with("EMST_"));
    let wrapped = TopoMapError::Emst {
        data_source: Arc::from("cloud"),
        error,
    };
    assert_eq!(wrapped.code(), TopoMapErrorCode::EmstFailure);
    assert_eq!(wrapped.code().as_str(), "TOPOMAP_EMST_FAILURE");
    assert!(wrapped.to_string().contains("`cloud`"));
}

#[test]
fn data_source_failure_exposes_inner_code() {
    let err = TopoMapError::DataSource {
        data_source: Arc::from("csv"),
        error: DataSourceError::EmptyData,
    };
    assert_eq!(err.code(), TopoMapErrorCode::DataSourceFailure);
    assert_eq!(err.data_source_code(), Some(DataSourceErrorCode::EmptyData));
    assert_eq!(err.placement_code(), None);
}
