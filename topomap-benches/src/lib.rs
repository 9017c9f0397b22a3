//! Benchmark support crate for TopoMap.
//!
//! Provides synthetic point clouds and parameter types used by Criterion
//! benchmarks for the two pipeline stages: spanning tree construction and
//! planar placement.

pub mod error;
pub mod params;
pub mod source;
