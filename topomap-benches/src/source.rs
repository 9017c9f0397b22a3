//! Synthetic point clouds for benchmarking.

use std::f64::consts::PI;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use topomap_core::{DataSource, DataSourceError, PointMatrix};

/// Errors that may occur while generating benchmark point clouds.
#[derive(Debug, thiserror::Error)]
pub enum SyntheticError {
    /// The requested point count was zero.
    #[error("point count must be greater than zero")]
    ZeroPoints,
    /// The requested dimension count was zero.
    #[error("dimension count must be greater than zero")]
    ZeroDimensions,
    /// The requested cluster count was zero.
    #[error("cluster count must be greater than zero")]
    ZeroClusters,
    /// The configured cluster count exceeded the available points.
    #[error("cluster count ({cluster_count}) must not exceed point count ({point_count})")]
    ClusterCountExceedsPointCount {
        /// Number of clusters requested.
        cluster_count: usize,
        /// Number of points requested.
        point_count: usize,
    },
    /// The requested `point_count * dimensions` overflowed `usize`.
    #[error("point_count * dimensions overflows usize")]
    Overflow,
    /// A floating-point generator parameter was invalid.
    #[error("invalid floating-point parameter `{parameter}`")]
    InvalidFloatParameter {
        /// Name of the invalid parameter.
        parameter: &'static str,
    },
    /// The generated values did not form a valid matrix.
    #[error("generated matrix is invalid: {0}")]
    Matrix(#[from] DataSourceError),
}

/// Uniform random vector configuration.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Number of points to generate.
    pub point_count: usize,
    /// Dimensionality of each vector.
    pub dimensions: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Configuration for Gaussian blob synthetic data.
#[derive(Clone, Debug)]
pub struct GaussianBlobConfig {
    /// Number of points to generate.
    pub point_count: usize,
    /// Dimensionality of each vector.
    pub dimensions: usize,
    /// Number of Gaussian clusters.
    pub cluster_count: usize,
    /// Distance of each centroid from the origin.
    pub separation: f64,
    /// Standard deviation of every axis.
    pub spread: f64,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// A synthetic point cloud backed by a [`PointMatrix`].
#[derive(Clone, Debug)]
pub struct SyntheticSource {
    matrix: PointMatrix,
}

impl SyntheticSource {
    /// Generates uniform random vectors in `[0.0, 1.0)`.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when the configuration is invalid.
    pub fn generate(config: &SyntheticConfig) -> Result<Self, SyntheticError> {
        let total = checked_total(config.point_count, config.dimensions)?;
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let data = (0..total).map(|_| rng.gen_range(0.0..1.0)).collect();
        Self::from_parts("synthetic-uniform", config.dimensions, data)
    }

    /// Generates Gaussian blobs whose centroids sit on a circle in the first
    /// two axes. Points are assigned to centroids round-robin.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when the configuration is invalid.
    #[expect(
        clippy::float_arithmetic,
        reason = "Gaussian data generation requires floating-point arithmetic"
    )]
    pub fn generate_gaussian_blobs(config: &GaussianBlobConfig) -> Result<Self, SyntheticError> {
        let total = checked_total(config.point_count, config.dimensions)?;
        validate_blob_config(config)?;
        let centroids = blob_centroids(config);
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut data = Vec::with_capacity(total);
        for centroid in centroids.iter().cycle().take(config.point_count) {
            for value in centroid {
                data.push(value + standard_normal_sample(&mut rng)? * config.spread);
            }
        }
        Self::from_parts("synthetic-gaussian-blobs", config.dimensions, data)
    }

    /// Borrows the generated matrix.
    #[must_use]
    #[rustfmt::skip]
    pub const fn matrix(&self) -> &PointMatrix { &self.matrix }

    fn from_parts(
        name: &'static str,
        dimensions: usize,
        data: Vec<f64>,
    ) -> Result<Self, SyntheticError> {
        let matrix = PointMatrix::try_new(name, dimensions, data)?;
        Ok(Self { matrix })
    }
}

impl DataSource for SyntheticSource {
    #[rustfmt::skip]
    fn len(&self) -> usize { self.matrix.len() }

    #[rustfmt::skip]
    fn name(&self) -> &str { self.matrix.name() }

    #[rustfmt::skip]
    fn dimension(&self) -> usize { self.matrix.dimension() }

    fn point(&self, index: usize) -> Result<&[f64], DataSourceError> {
        self.matrix.point(index)
    }
}

fn checked_total(point_count: usize, dimensions: usize) -> Result<usize, SyntheticError> {
    if point_count == 0 {
        return Err(SyntheticError::ZeroPoints);
    }
    if dimensions == 0 {
        return Err(SyntheticError::ZeroDimensions);
    }
    point_count
        .checked_mul(dimensions)
        .ok_or(SyntheticError::Overflow)
}

fn validate_blob_config(config: &GaussianBlobConfig) -> Result<(), SyntheticError> {
    if config.cluster_count == 0 {
        return Err(SyntheticError::ZeroClusters);
    }
    if config.cluster_count > config.point_count {
        return Err(SyntheticError::ClusterCountExceedsPointCount {
            cluster_count: config.cluster_count,
            point_count: config.point_count,
        });
    }
    if !config.separation.is_finite() || config.separation <= 0.0 {
        return Err(SyntheticError::InvalidFloatParameter {
            parameter: "separation",
        });
    }
    if !config.spread.is_finite() || config.spread < 0.0 {
        return Err(SyntheticError::InvalidFloatParameter {
            parameter: "spread",
        });
    }
    Ok(())
}

#[expect(
    clippy::cast_precision_loss,
    reason = "centroid placement uses index-derived floating-point angles"
)]
#[expect(
    clippy::float_arithmetic,
    reason = "centroid placement uses trigonometric expressions"
)]
fn blob_centroids(config: &GaussianBlobConfig) -> Vec<Vec<f64>> {
    (0..config.cluster_count)
        .map(|cluster_index| {
            let angle = (cluster_index as f64 / config.cluster_count as f64) * (2.0 * PI);
            let mut centroid = vec![0.0; config.dimensions];
            if let Some(value) = centroid.get_mut(0) {
                *value = config.separation * angle.cos();
            }
            if let Some(value) = centroid.get_mut(1) {
                *value = config.separation * angle.sin();
            }
            centroid
        })
        .collect()
}

#[expect(
    clippy::float_arithmetic,
    reason = "Box-Muller sampling requires floating-point arithmetic"
)]
fn standard_normal_sample(rng: &mut SmallRng) -> Result<f64, SyntheticError> {
    let u1 = rng.gen_range(0.0_f64..1.0).max(f64::EPSILON);
    let u2 = rng.gen_range(0.0_f64..1.0);
    let sample = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    if sample.is_finite() {
        Ok(sample)
    } else {
        Err(SyntheticError::InvalidFloatParameter {
            parameter: "standard_normal_sample",
        })
    }
}
