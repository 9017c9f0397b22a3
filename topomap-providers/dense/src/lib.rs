//! Dense point-cloud providers backed by contiguous `f64` storage.
//!
//! Points can be read from headerless CSV text or from a Parquet column of
//! `FixedSizeList<Float32 | Float64, D>` rows.

mod csv;
mod errors;
mod ingest;
mod provider;

pub use errors::DenseMatrixProviderError;
pub use provider::DenseMatrixProvider;

#[cfg(test)]
mod tests;
