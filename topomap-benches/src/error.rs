//! Benchmark setup error type.
//!
//! Aggregates the errors that may arise while preparing benchmark data so
//! that setup functions can propagate failures with `?`.

use crate::source::SyntheticError;
use topomap_core::{EmstError, PlacementError, TopoMapError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic data generation failed.
    #[error("synthetic source generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Spanning tree construction failed.
    #[error("spanning tree construction failed: {0}")]
    Emst(#[from] EmstError),
    /// Placement rejected the spanning tree.
    #[error("placement failed: {0}")]
    Placement(#[from] PlacementError),
    /// Builder validation failed.
    #[error("configuration failed: {0}")]
    TopoMap(#[from] TopoMapError),
    /// A zero value was passed where a non-zero integer was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// A description of the parameter that was unexpectedly zero.
        context: &'static str,
    },
}
