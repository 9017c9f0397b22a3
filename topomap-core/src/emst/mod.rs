//! Euclidean minimum spanning tree construction.
//!
//! The tree is built with Borůvka's algorithm over a kd-tree. Each round
//! finds, for every point, its nearest neighbour outside its own component
//! and then joins every component along its cheapest outgoing edge. With the
//! `cpu` feature enabled the per-point queries of a round run on Rayon's
//! pool; the reduction and the unions stay sequential so the output does not
//! depend on scheduling.

mod kdtree;

use std::{cmp::Ordering, num::NonZeroUsize};

#[cfg(feature = "cpu")]
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{datasource::DataSource, matrix::PointMatrix, partition::DisjointSet};

use self::kdtree::{KdTree, Neighbour};

/// Errors returned while computing a Euclidean minimum spanning tree.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
#[non_exhaustive]
pub enum EmstError {
    /// The squared distance between two points overflowed to infinity.
    #[error("distance between points {source_vertex} and {target_vertex} is not finite")]
    NonFiniteDistance {
        /// The query point.
        source_vertex: usize,
        /// Its nearest neighbour in another component.
        target_vertex: usize,
    },
    /// A Borůvka round failed to join any components.
    #[error("spanning tree construction stalled with {components} components remaining")]
    Stalled {
        /// Components left when progress stopped.
        components: usize,
    },
}

impl EmstError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> EmstErrorCode {
        match self {
            Self::NonFiniteDistance { .. } => EmstErrorCode::NonFiniteDistance,
            Self::Stalled { .. } => EmstErrorCode::Stalled,
        }
    }
}

/// Machine-readable error codes for [`EmstError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EmstErrorCode {
    /// The squared distance between two points overflowed to infinity.
    NonFiniteDistance,
    /// A Borůvka round failed to join any components.
    Stalled,
}

impl EmstErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NonFiniteDistance => "EMST_NON_FINITE_DISTANCE",
            Self::Stalled => "EMST_STALLED",
        }
    }
}

/// A spanning tree edge in canonical undirected form (`source < target`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeEdge {
    source: usize,
    target: usize,
    weight: f64,
}

impl TreeEdge {
    /// Creates an edge, swapping the endpoints into canonical order.
    #[must_use]
    pub fn new(left: usize, right: usize, weight: f64) -> Self {
        Self {
            source: left.min(right),
            target: left.max(right),
            weight,
        }
    }

    /// Returns the smaller endpoint id.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> usize { self.source }

    /// Returns the larger endpoint id.
    #[must_use]
    #[rustfmt::skip]
    pub fn target(&self) -> usize { self.target }

    /// Returns the Euclidean length of the edge.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight(&self) -> f64 { self.weight }
}

impl Eq for TreeEdge {}

impl Ord for TreeEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.source.cmp(&other.source))
            .then_with(|| self.target.cmp(&other.target))
    }
}

impl PartialOrd for TreeEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The Euclidean minimum spanning tree of a point cloud.
///
/// Edges are sorted by weight, then by endpoints.
#[derive(Clone, Debug, PartialEq)]
pub struct SpanningTree {
    vertex_count: usize,
    edges: Vec<TreeEdge>,
}

impl SpanningTree {
    /// Wraps precomputed edges over `vertex_count` vertices, sorting them.
    ///
    /// No connectivity check is made here; placement rejects edge sets that
    /// are not trees.
    #[must_use]
    pub fn from_edges(vertex_count: usize, mut edges: Vec<TreeEdge>) -> Self {
        edges.sort_unstable();
        Self {
            vertex_count,
            edges,
        }
    }

    /// Returns the tree edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[TreeEdge] { &self.edges }

    /// Returns the number of vertices the tree spans.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex_count(&self) -> usize { self.vertex_count }

    /// Returns the sum of all edge weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(TreeEdge::weight).sum()
    }

    /// Returns the `(source, target)` pairs in edge order.
    #[must_use]
    pub fn endpoints(&self) -> Vec<(usize, usize)> {
        self.edges
            .iter()
            .map(|edge| (edge.source, edge.target))
            .collect()
    }

    /// Returns the weights in edge order.
    #[must_use]
    pub fn weights(&self) -> Vec<f64> {
        self.edges.iter().map(TreeEdge::weight).collect()
    }
}

/// The cheapest edge leaving one component in the current round.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    distance_squared: f64,
    source: usize,
    target: usize,
}

impl Candidate {
    fn from_query(query: usize, neighbour: Neighbour) -> Self {
        Self {
            distance_squared: neighbour.distance_squared,
            source: query.min(neighbour.index),
            target: query.max(neighbour.index),
        }
    }

    fn precedes(&self, other: &Self) -> bool {
        self.distance_squared
            .total_cmp(&other.distance_squared)
            .then_with(|| self.source.cmp(&other.source))
            .then_with(|| self.target.cmp(&other.target))
            .is_lt()
    }
}

/// Computes the Euclidean minimum spanning tree of `matrix`.
///
/// Coincident points are joined by zero-weight edges. A single point yields
/// a tree with no edges.
///
/// # Errors
/// Returns [`EmstError::NonFiniteDistance`] when coordinates are so large
/// that a squared distance overflows, and [`EmstError::Stalled`] if a round
/// makes no progress.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use topomap_core::{PointMatrix, euclidean_mst};
///
/// let matrix = PointMatrix::from_rows("line", &[vec![0.0], vec![3.0], vec![1.0]])?;
/// let tree = euclidean_mst(&matrix, NonZeroUsize::MIN)?;
/// assert_eq!(tree.endpoints(), vec![(0, 2), (1, 2)]);
/// assert_eq!(tree.total_weight(), 3.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "core.emst",
    err,
    skip(matrix),
    fields(points = matrix.len(), dimension = matrix.dimension(), leaf_size = leaf_size.get()),
)]
pub fn euclidean_mst(
    matrix: &PointMatrix,
    leaf_size: NonZeroUsize,
) -> Result<SpanningTree, EmstError> {
    let points = matrix.len();
    let tree = KdTree::build(matrix, leaf_size);
    let mut partition = DisjointSet::new(points);
    let mut edges = Vec::with_capacity(points.saturating_sub(1));
    let mut round = 0_usize;

    while partition.components() > 1 {
        round += 1;
        let labels: Vec<usize> = (0..points).map(|point| partition.find(point)).collect();
        let node_labels = tree.component_labels(&labels);
        let nearest = nearest_per_point(&tree, matrix, &labels, &node_labels);

        let mut cheapest: Vec<Option<Candidate>> = vec![None; points];
        for (query, neighbour) in nearest.into_iter().enumerate() {
            let Some(neighbour) = neighbour else {
                continue;
            };
            if !neighbour.distance_squared.is_finite() {
                return Err(EmstError::NonFiniteDistance {
                    source_vertex: query,
                    target_vertex: neighbour.index,
                });
            }
            let candidate = Candidate::from_query(query, neighbour);
            let slot = &mut cheapest[labels[query]];
            if slot.is_none_or(|current| candidate.precedes(&current)) {
                *slot = Some(candidate);
            }
        }

        let before = partition.components();
        for candidate in cheapest.into_iter().flatten() {
            if partition.union(candidate.source, candidate.target) {
                edges.push(TreeEdge {
                    source: candidate.source,
                    target: candidate.target,
                    weight: candidate.distance_squared.sqrt(),
                });
            }
        }
        if partition.components() == before {
            return Err(EmstError::Stalled {
                components: before,
            });
        }
        debug!(
            round,
            components = partition.components(),
            edges = edges.len(),
            "completed Borůvka round"
        );
    }

    Ok(SpanningTree::from_edges(points, edges))
}

#[cfg(feature = "cpu")]
fn nearest_per_point(
    tree: &KdTree,
    matrix: &PointMatrix,
    labels: &[usize],
    node_labels: &[Option<usize>],
) -> Vec<Option<Neighbour>> {
    (0..labels.len())
        .into_par_iter()
        .map(|query| tree.nearest_foreign(matrix, labels, node_labels, query))
        .collect()
}

#[cfg(not(feature = "cpu"))]
fn nearest_per_point(
    tree: &KdTree,
    matrix: &PointMatrix,
    labels: &[usize],
    node_labels: &[Option<usize>],
) -> Vec<Option<Neighbour>> {
    (0..labels.len())
        .map(|query| tree.nearest_foreign(matrix, labels, node_labels, query))
        .collect()
}
