//! The TopoMap projection entry point.
//!
//! Runs the two stages of a projection: the Euclidean minimum spanning tree
//! of the input points, then the incremental placement of that tree in the
//! plane. Data-source and spanning tree failures are wrapped with the name
//! of the source that produced them.

use std::{num::NonZeroUsize, sync::Arc};

use tracing::{info, instrument, warn};

use crate::{
    Result,
    datasource::DataSource,
    emst::{SpanningTree, euclidean_mst},
    error::{PlacementError, TopoMapError},
    matrix::PointMatrix,
    placement::place_points,
    projection::Projection,
};

/// Projects point clouds to two dimensions while preserving the merge
/// structure of their Euclidean minimum spanning tree.
///
/// # Examples
/// ```
/// use topomap_core::{PointMatrix, TopoMapBuilder};
///
/// let points = PointMatrix::from_rows(
///     "triangle",
///     &[vec![0.0, 0.0, 0.0], vec![3.0, 0.0, 0.0], vec![0.0, 4.0, 0.0]],
/// )?;
/// let topomap = TopoMapBuilder::new().build()?;
/// let projection = topomap.run(&points)?;
/// assert_eq!(projection.len(), 3);
/// let placed = projection.points();
/// assert!((placed[0].distance(placed[1]) - 3.0).abs() < 1e-12);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct TopoMap {
    leaf_size: NonZeroUsize,
}

impl TopoMap {
    pub(crate) fn new(leaf_size: NonZeroUsize) -> Self {
        Self { leaf_size }
    }

    /// Returns the kd-tree leaf size used for spanning tree construction.
    #[must_use]
    pub fn leaf_size(&self) -> NonZeroUsize {
        self.leaf_size
    }

    /// Projects every point of `source` into the plane.
    ///
    /// # Errors
    /// Returns [`TopoMapError::EmptySource`] when `source` has no points,
    /// [`TopoMapError::DataSource`] when reading points fails,
    /// [`TopoMapError::Emst`] when the spanning tree cannot be built, and
    /// [`TopoMapError::Placement`] if placement rejects the tree.
    #[instrument(
        name = "core.run",
        err,
        skip(self, source),
        fields(
            data_source = %source.name(),
            items = source.len(),
            dimension = source.dimension(),
            leaf_size = self.leaf_size.get(),
        ),
    )]
    pub fn run<D: DataSource + ?Sized>(&self, source: &D) -> Result<Projection> {
        let tree = self.spanning_tree(source)?;
        let projection = self.place(&tree)?;
        info!(points = projection.len(), "projection completed");
        Ok(projection)
    }

    /// Computes the Euclidean minimum spanning tree of `source`.
    ///
    /// # Errors
    /// Returns the same data-source and spanning tree errors as
    /// [`Self::run`].
    pub fn spanning_tree<D: DataSource + ?Sized>(&self, source: &D) -> Result<SpanningTree> {
        if source.is_empty() {
            warn!(data_source = source.name(), "data source is empty, returning error");
            return Err(TopoMapError::EmptySource {
                data_source: Arc::from(source.name()),
            });
        }
        let matrix = PointMatrix::from_source(source).map_err(|error| TopoMapError::DataSource {
            data_source: Arc::from(source.name()),
            error,
        })?;
        euclidean_mst(&matrix, self.leaf_size).map_err(|error| TopoMapError::Emst {
            data_source: Arc::from(source.name()),
            error,
        })
    }

    /// Places a precomputed spanning tree in the plane.
    ///
    /// # Errors
    /// Returns [`TopoMapError::Placement`] when `tree` is not a spanning
    /// tree with non-negative finite weights.
    pub fn place(&self, tree: &SpanningTree) -> Result<Projection> {
        if tree.edges().len() + 1 != tree.vertex_count() {
            return Err(PlacementError::NotSpanning {
                vertex_count: tree.vertex_count(),
                edges: tree.edges().len(),
            }
            .into());
        }
        let points = place_points(&tree.endpoints(), &tree.weights())?;
        Ok(Projection::new(points))
    }
}

/// Projects the points of `source` with the default configuration.
///
/// # Errors
/// Returns the errors of [`TopoMap::run`].
///
/// # Examples
/// ```
/// use topomap_core::{PointMatrix, project};
///
/// let points = PointMatrix::from_rows("pair", &[vec![1.0, 1.0], vec![4.0, 5.0]])?;
/// let projection = project(&points)?;
/// assert_eq!(projection.points()[0].distance(projection.points()[1]), 5.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn project<D: DataSource + ?Sized>(source: &D) -> Result<Projection> {
    TopoMap::new(NonZeroUsize::MIN).run(source)
}
