//! Error types for the TopoMap core library.
//!
//! Defines the error enums exposed by the public API, their stable
//! machine-readable codes, and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::emst::EmstError;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::DataSource`] operations and point matrix
/// validation.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DataSourceError {
    /// Requested index was outside the source's bounds.
    #[error("index {index} is out of bounds")]
    OutOfBounds {
        /// The requested row that exceeded the source bounds.
        index: usize,
    },
    /// A row did not have the dimension shared by the rest of the source.
    #[error("row {row} has dimension {actual} but expected {expected}")]
    DimensionMismatch {
        /// Row whose dimension disagreed.
        row: usize,
        /// Dimension established by the first row.
        expected: usize,
        /// Dimension of the offending row.
        actual: usize,
    },
    /// A flat value buffer could not be split into whole rows.
    #[error("{values} values cannot be split into rows of dimension {dimension}")]
    RaggedValues {
        /// Number of values supplied.
        values: usize,
        /// Requested row dimension.
        dimension: usize,
    },
    /// A coordinate was NaN or infinite.
    #[error("row {row} contains a non-finite value at column {column}")]
    NonFiniteValue {
        /// Row holding the offending coordinate.
        row: usize,
        /// Column of the offending coordinate.
        column: usize,
    },
    /// Data source contained no rows.
    #[error("data source contains no rows")]
    EmptyData,
    /// Data source rows must have positive dimension.
    #[error("data source points must have positive dimension")]
    ZeroDimension,
}

define_error_codes! {
    /// Stable codes describing [`DataSourceError`] variants.
    enum DataSourceErrorCode for DataSourceError {
        /// Requested index was outside the source's bounds.
        OutOfBounds => OutOfBounds { .. } => "DATA_SOURCE_OUT_OF_BOUNDS",
        /// A row did not have the shared dimension.
        DimensionMismatch => DimensionMismatch { .. } => "DATA_SOURCE_DIMENSION_MISMATCH",
        /// A flat value buffer could not be split into whole rows.
        RaggedValues => RaggedValues { .. } => "DATA_SOURCE_RAGGED_VALUES",
        /// A coordinate was NaN or infinite.
        NonFiniteValue => NonFiniteValue { .. } => "DATA_SOURCE_NON_FINITE_VALUE",
        /// Data source contained no rows.
        EmptyData => EmptyData => "DATA_SOURCE_EMPTY",
        /// Data source rows must have positive dimension.
        ZeroDimension => ZeroDimension => "DATA_SOURCE_ZERO_DIMENSION",
    }
}

/// Input-contract violations detected while placing spanning-tree vertices.
///
/// Every variant aborts the projection before any coordinates are returned;
/// later merges depend on the invariants of earlier ones so there is no
/// meaningful partial layout.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PlacementError {
    /// The edge list and the weight list disagree in length.
    #[error("{edges} edges were supplied with {weights} weights")]
    EdgeWeightLengthMismatch {
        /// Number of edges supplied.
        edges: usize,
        /// Number of weights supplied.
        weights: usize,
    },
    /// An edge referenced a vertex outside `0..vertex_count`.
    #[error("edge references vertex {vertex}, but the tree spans {vertex_count} vertices")]
    VertexOutOfRange {
        /// The offending vertex id.
        vertex: usize,
        /// Number of vertices implied by the edge count.
        vertex_count: usize,
    },
    /// A tree over `vertex_count` vertices must have one edge fewer.
    #[error("{edges} edges cannot span {vertex_count} vertices")]
    NotSpanning {
        /// Number of vertices the tree claims to span.
        vertex_count: usize,
        /// Number of edges supplied.
        edges: usize,
    },
    /// An edge weight was negative, NaN or infinite.
    #[error("edge ({source_vertex}, {target_vertex}) has invalid weight {weight}")]
    InvalidWeight {
        /// First endpoint of the edge.
        source_vertex: usize,
        /// Second endpoint of the edge.
        target_vertex: usize,
        /// The rejected weight.
        weight: f64,
    },
    /// Both endpoints already belong to the same component, so the edges do
    /// not form a tree.
    #[error("edge ({source_vertex}, {target_vertex}) joins vertices of the same component")]
    SameComponent {
        /// First endpoint of the edge.
        source_vertex: usize,
        /// Second endpoint of the edge.
        target_vertex: usize,
    },
    /// A zero-length edge joined components that are not single points.
    #[error(
        "zero-length edge ({source_vertex}, {target_vertex}) joins components with non-degenerate hulls"
    )]
    DegenerateZeroLength {
        /// First endpoint of the edge.
        source_vertex: usize,
        /// Second endpoint of the edge.
        target_vertex: usize,
    },
    /// The component table had no entry for a partition representative.
    #[error("no component is registered for representative {representative}")]
    MissingComponent {
        /// Representative that had no component record.
        representative: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`PlacementError`] variants.
    enum PlacementErrorCode for PlacementError {
        /// The edge list and the weight list disagree in length.
        EdgeWeightLengthMismatch => EdgeWeightLengthMismatch { .. } => "PLACEMENT_EDGE_WEIGHT_LENGTH_MISMATCH",
        /// An edge referenced a vertex outside the tree.
        VertexOutOfRange => VertexOutOfRange { .. } => "PLACEMENT_VERTEX_OUT_OF_RANGE",
        /// The edge count does not match the vertex count of a tree.
        NotSpanning => NotSpanning { .. } => "PLACEMENT_NOT_SPANNING",
        /// An edge weight was negative or non-finite.
        InvalidWeight => InvalidWeight { .. } => "PLACEMENT_INVALID_WEIGHT",
        /// An edge closed a cycle.
        SameComponent => SameComponent { .. } => "PLACEMENT_SAME_COMPONENT",
        /// A zero-length edge joined non-degenerate components.
        DegenerateZeroLength => DegenerateZeroLength { .. } => "PLACEMENT_DEGENERATE_ZERO_LENGTH",
        /// The component table was inconsistent with the partition.
        MissingComponent => MissingComponent { .. } => "PLACEMENT_MISSING_COMPONENT",
    }
}

/// Error type produced when constructing or running [`crate::TopoMap`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TopoMapError {
    /// The kd-tree leaf size must be greater than zero.
    #[error("leaf_size must be at least 1 (got {got})")]
    InvalidLeafSize {
        /// The invalid leaf size supplied by the caller.
        got: usize,
    },
    /// The supplied [`crate::DataSource`] contained no points.
    #[error("data source `{data_source}` contains no points")]
    EmptySource {
        /// Identifier for the empty data source.
        data_source: Arc<str>,
    },
    /// A [`crate::DataSource`] operation failed while reading points.
    #[error("data source `{data_source}` failed: {error}")]
    DataSource {
        /// Identifier for the data source that produced the error.
        data_source: Arc<str>,
        #[source]
        /// Underlying data source error.
        error: DataSourceError,
    },
    /// The Euclidean minimum spanning tree could not be computed.
    #[error("spanning tree construction for `{data_source}` failed: {error}")]
    Emst {
        /// Identifier for the data source being projected.
        data_source: Arc<str>,
        #[source]
        /// Underlying spanning tree error.
        error: EmstError,
    },
    /// The spanning tree violated the placement input contract.
    #[error("point placement failed: {error}")]
    Placement {
        #[source]
        /// Underlying placement error.
        error: PlacementError,
    },
}

define_error_codes! {
    /// Stable codes describing [`TopoMapError`] variants.
    enum TopoMapErrorCode for TopoMapError {
        /// The kd-tree leaf size must be greater than zero.
        InvalidLeafSize => InvalidLeafSize { .. } => "TOPOMAP_INVALID_LEAF_SIZE",
        /// The supplied [`crate::DataSource`] contained no points.
        EmptySource => EmptySource { .. } => "TOPOMAP_EMPTY_SOURCE",
        /// A [`crate::DataSource`] operation failed while reading points.
        DataSourceFailure => DataSource { .. } => "TOPOMAP_DATA_SOURCE_FAILURE",
        /// The Euclidean minimum spanning tree could not be computed.
        EmstFailure => Emst { .. } => "TOPOMAP_EMST_FAILURE",
        /// The spanning tree violated the placement input contract.
        PlacementFailure => Placement { .. } => "TOPOMAP_PLACEMENT_FAILURE",
    }
}

impl TopoMapError {
    /// Retrieve the inner [`DataSourceErrorCode`] when the error originated in a [`crate::DataSource`].
    #[must_use]
    pub const fn data_source_code(&self) -> Option<DataSourceErrorCode> {
        match self {
            Self::DataSource { error, .. } => Some(error.code()),
            _ => None,
        }
    }

    /// Retrieve the inner [`PlacementErrorCode`] when placement rejected the tree.
    #[must_use]
    pub const fn placement_code(&self) -> Option<PlacementErrorCode> {
        match self {
            Self::Placement { error } => Some(error.code()),
            _ => None,
        }
    }
}

impl From<PlacementError> for TopoMapError {
    fn from(error: PlacementError) -> Self {
        Self::Placement { error }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, TopoMapError>;
