use rand::{Rng, SeedableRng, rngs::SmallRng};
use topomap_core::PointMatrix;

/// Uniform points in the unit hypercube, reproducible from `seed`.
#[must_use]
pub fn random_cloud(seed: u64, points: usize, dimension: usize) -> PointMatrix {
    let mut rng = SmallRng::seed_from_u64(seed);
    let values = (0..points * dimension).map(|_| rng.gen_range(0.0..1.0)).collect();
    PointMatrix::try_new(format!("cloud-{seed}"), dimension, values)
        .expect("generated cloud is valid")
}

/// `clusters` tight blobs of `per_cluster` points whose centres lie far
/// apart along the first axis.
#[must_use]
pub fn separated_blobs(seed: u64, clusters: usize, per_cluster: usize, dimension: usize) -> PointMatrix {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut values = Vec::with_capacity(clusters * per_cluster * dimension);
    for cluster in 0..clusters {
        let centre = 100.0 * cluster as f64;
        for _ in 0..per_cluster {
            values.push(centre + rng.gen_range(-1.0..1.0));
            values.extend((1..dimension).map(|_| rng.gen_range(-1.0..1.0)));
        }
    }
    PointMatrix::try_new("blobs", dimension, values).expect("generated blobs are valid")
}
