//! TopoMap core library.
//!
//! Projects high-dimensional point clouds to the plane so that the merge
//! order of their Euclidean minimum spanning tree is preserved: two points
//! end up at least as far apart as the tree edge that first connects their
//! groups.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod datasource;
mod emst;
mod error;
mod geometry;
mod hull;
mod matrix;
mod partition;
mod placement;
mod projection;
#[cfg(test)]
mod test_utils;
mod topomap;

pub use crate::{
    builder::TopoMapBuilder,
    datasource::DataSource,
    emst::{EmstError, EmstErrorCode, SpanningTree, TreeEdge, euclidean_mst},
    error::{
        DataSourceError, DataSourceErrorCode, PlacementError, PlacementErrorCode, Result,
        TopoMapError, TopoMapErrorCode,
    },
    geometry::{Point, Transformation},
    hull::{convex_hull, hull_contains},
    matrix::PointMatrix,
    placement::{Component, MergeRecord, Placer, place_points},
    projection::Projection,
    topomap::{TopoMap, project},
};
