//! Incremental placement of spanning tree vertices in the plane.
//!
//! Every vertex starts as its own component at the origin. Edges are
//! consumed in ascending weight order; each one stacks the component holding
//! its second endpoint directly above the component holding its first, so
//! the two endpoints end up exactly one edge length apart. Later merges move
//! whole components rigidly, which keeps every earlier gap intact.
//!
//! [`Placer`] exposes the merges one at a time; [`place_points`] runs them
//! all.

mod align;
mod merge;
mod schedule;

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::{emst::SpanningTree, error::PlacementError, geometry::Point, partition::DisjointSet};

pub use self::merge::Component;
use self::{merge::merge_components, schedule::merge_order};

/// What a single call to [`Placer::step`] merged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MergeRecord {
    source: usize,
    target: usize,
    weight: f64,
    representative: usize,
}

impl MergeRecord {
    /// The edge endpoint whose component was placed below.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> usize { self.source }

    /// The edge endpoint whose component was placed above.
    #[must_use]
    #[rustfmt::skip]
    pub fn target(&self) -> usize { self.target }

    /// The edge weight, equal to the vertical gap between the endpoints.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight(&self) -> f64 { self.weight }

    /// Representative id of the merged component.
    #[must_use]
    #[rustfmt::skip]
    pub fn representative(&self) -> usize { self.representative }
}

/// Stepwise driver for spanning tree placement.
///
/// Once a step has returned an error the placer's state is no longer
/// meaningful and it should be dropped.
///
/// # Examples
/// ```
/// use topomap_core::{Placer, Point};
///
/// let mut placer = Placer::new(&[(0, 1)], &[2.0])?;
/// let record = placer.step()?.expect("one edge to merge");
/// assert_eq!((record.source(), record.target()), (0, 1));
/// assert_eq!(placer.positions(), &[Point::new(0.0, 0.0), Point::new(0.0, 2.0)]);
/// assert!(placer.step()?.is_none());
/// # Ok::<(), topomap_core::PlacementError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Placer {
    edges: Vec<(usize, usize)>,
    weights: Vec<f64>,
    order: Vec<usize>,
    cursor: usize,
    positions: Vec<Point>,
    partition: DisjointSet,
    components: HashMap<usize, Component>,
}

impl Placer {
    /// Prepares placement of the `edges.len() + 1` vertices joined by
    /// `edges`, where `weights[i]` is the length of `edges[i]`.
    ///
    /// # Errors
    /// Returns [`PlacementError::EdgeWeightLengthMismatch`] when the slices
    /// differ in length, [`PlacementError::VertexOutOfRange`] for endpoints
    /// outside the tree, and [`PlacementError::InvalidWeight`] for negative
    /// or non-finite weights.
    pub fn new(edges: &[(usize, usize)], weights: &[f64]) -> Result<Self, PlacementError> {
        if edges.len() != weights.len() {
            return Err(PlacementError::EdgeWeightLengthMismatch {
                edges: edges.len(),
                weights: weights.len(),
            });
        }
        let vertex_count = edges.len() + 1;
        for (&(source, target), &weight) in edges.iter().zip(weights) {
            if let Some(vertex) = [source, target].into_iter().find(|&v| v >= vertex_count) {
                return Err(PlacementError::VertexOutOfRange {
                    vertex,
                    vertex_count,
                });
            }
            if !(weight.is_finite() && weight >= 0.0) {
                return Err(PlacementError::InvalidWeight {
                    source_vertex: source,
                    target_vertex: target,
                    weight,
                });
            }
        }

        let components = (0..vertex_count)
            .map(|vertex| (vertex, Component::singleton(vertex, Point::ORIGIN)))
            .collect();
        Ok(Self {
            edges: edges.to_vec(),
            weights: weights.to_vec(),
            order: merge_order(weights),
            cursor: 0,
            positions: vec![Point::ORIGIN; vertex_count],
            partition: DisjointSet::new(vertex_count),
            components,
        })
    }

    /// Prepares placement of a precomputed spanning tree.
    ///
    /// # Errors
    /// Returns [`PlacementError::NotSpanning`] when the tree does not have
    /// exactly one edge fewer than vertices, and the errors of
    /// [`Self::new`] otherwise.
    pub fn from_tree(tree: &SpanningTree) -> Result<Self, PlacementError> {
        if tree.edges().len() + 1 != tree.vertex_count() {
            return Err(PlacementError::NotSpanning {
                vertex_count: tree.vertex_count(),
                edges: tree.edges().len(),
            });
        }
        Self::new(&tree.endpoints(), &tree.weights())
    }

    /// Merges the components joined by the lightest unprocessed edge.
    ///
    /// Returns `Ok(None)` once every edge has been merged.
    ///
    /// # Errors
    /// Returns [`PlacementError::SameComponent`] when the edge joins two
    /// vertices that are already connected, and
    /// [`PlacementError::DegenerateZeroLength`] when a zero-length edge joins
    /// components that are not single locations.
    pub fn step(&mut self) -> Result<Option<MergeRecord>, PlacementError> {
        let Some(&edge) = self.order.get(self.cursor) else {
            return Ok(None);
        };
        let (source, target) = self.edges[edge];
        let weight = self.weights[edge];

        let lower_id = self.partition.find(source);
        let upper_id = self.partition.find(target);
        if lower_id == upper_id {
            return Err(PlacementError::SameComponent {
                source_vertex: source,
                target_vertex: target,
            });
        }
        let lower = self.take_component(lower_id)?;
        let upper = self.take_component(upper_id)?;
        let merged = merge_components(&mut self.positions, lower, upper, (source, target), weight)?;

        self.partition.union(lower_id, upper_id);
        let representative = self.partition.find(lower_id);
        self.components.insert(representative, merged);
        self.cursor += 1;

        let total = self.order.len();
        if self.cursor % (total / 10).max(1) == 0 || self.cursor == total {
            debug!(merged = self.cursor, total, "placement progress");
        }
        Ok(Some(MergeRecord {
            source,
            target,
            weight,
            representative,
        }))
    }

    fn take_component(&mut self, representative: usize) -> Result<Component, PlacementError> {
        self.components
            .remove(&representative)
            .ok_or(PlacementError::MissingComponent { representative })
    }

    /// Current position of every vertex, indexed by vertex id.
    #[must_use]
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    /// Number of vertices being placed.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of edges not yet merged.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.order.len() - self.cursor
    }

    /// The component currently holding `vertex`.
    #[must_use]
    pub fn component_of(&self, vertex: usize) -> Option<&Component> {
        if vertex >= self.positions.len() {
            return None;
        }
        self.components.get(&self.partition.root(vertex))
    }

    /// Hull of the component currently holding `vertex`.
    #[must_use]
    pub fn hull_of(&self, vertex: usize) -> Option<&[Point]> {
        self.component_of(vertex).map(Component::hull)
    }

    /// Members of the component currently holding `vertex`.
    #[must_use]
    pub fn members_of(&self, vertex: usize) -> Option<&[usize]> {
        self.component_of(vertex).map(Component::members)
    }

    /// Merges every remaining edge and returns the final positions.
    ///
    /// # Errors
    /// Returns the first error raised by [`Self::step`].
    pub fn finish(mut self) -> Result<Vec<Point>, PlacementError> {
        while self.step()?.is_some() {}
        Ok(self.positions)
    }
}

/// Places the vertices of a spanning tree in the plane.
///
/// `edges[i]` joins two vertex ids in `0..=edges.len()` and has length
/// `weights[i]`. The result holds one position per vertex, in id order.
///
/// # Errors
/// Returns [`PlacementError`] when the input is not a spanning tree with
/// non-negative finite weights.
///
/// # Examples
/// ```
/// use topomap_core::{Point, place_points};
///
/// let positions = place_points(&[(0, 1), (1, 2)], &[1.0, 2.0])?;
/// assert_eq!(positions.len(), 3);
/// assert_eq!(positions[0].distance(positions[1]), 1.0);
/// # Ok::<(), topomap_core::PlacementError>(())
/// ```
#[instrument(name = "core.place", err, skip(edges, weights), fields(edges = edges.len()))]
pub fn place_points(edges: &[(usize, usize)], weights: &[f64]) -> Result<Vec<Point>, PlacementError> {
    Placer::new(edges, weights)?.finish()
}

#[cfg(test)]
mod property;
