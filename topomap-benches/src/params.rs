//! Benchmark parameter types.

use std::fmt;

/// Parameters for a spanning tree benchmark run.
#[derive(Clone, Debug)]
pub struct EmstBenchParams {
    /// Number of points in the dataset.
    pub point_count: usize,
    /// Maximum number of points per kd-tree leaf.
    pub leaf_size: usize,
}

impl fmt::Display for EmstBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},leaf={}", self.point_count, self.leaf_size)
    }
}

/// Parameters for a placement or end-to-end benchmark run.
#[derive(Clone, Debug)]
pub struct PipelineBenchParams {
    /// Number of points in the dataset.
    pub point_count: usize,
}

impl fmt::Display for PipelineBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.point_count)
    }
}
