//! Stacking two placed components along a spanning tree edge.

use crate::{
    error::PlacementError,
    geometry::Point,
    hull::convex_hull,
};

use super::align::{AlignEdge, align_hull, transform_members};

/// A placed group of vertices and the closed hull over their current
/// positions.
///
/// Components own vertex ids only. Coordinates live in the shared position
/// store passed to [`merge_components`].
#[derive(Clone, Debug, PartialEq)]
pub struct Component {
    members: Vec<usize>,
    hull: Vec<Point>,
}

impl Component {
    /// A component holding only `vertex`, located at `position`.
    pub(crate) fn singleton(vertex: usize, position: Point) -> Self {
        Self {
            members: vec![vertex],
            hull: vec![position, position],
        }
    }

    /// Vertex ids owned by the component.
    #[must_use]
    #[rustfmt::skip]
    pub fn members(&self) -> &[usize] { &self.members }

    /// The closed clockwise hull over the members' current positions.
    #[must_use]
    #[rustfmt::skip]
    pub fn hull(&self) -> &[Point] { &self.hull }

    /// Number of member vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`: every component owns at least one vertex.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether every member sits at one location, leaving the hull as
    /// `[p, p]`.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.hull.len() == 2
    }

    fn open_hull(&self) -> &[Point] {
        self.hull.split_last().map_or(&[][..], |(_, rest)| rest)
    }
}

/// Merges `lower` and `upper` along the edge `(contacts.0, contacts.1)` of
/// length `length`.
///
/// For a positive length `lower` is aligned so its contact vertex sits at
/// the origin with the component below it, and `upper` so its contact sits
/// at `(0, length)` with the component above it. Every member of both
/// components is moved in `positions` and the merged hull is rebuilt from
/// both transformed hulls.
///
/// A zero length is only valid between single-location components; nothing
/// moves and the merged hull is `upper`'s.
pub(crate) fn merge_components(
    positions: &mut [Point],
    lower: Component,
    upper: Component,
    contacts: (usize, usize),
    length: f64,
) -> Result<Component, PlacementError> {
    let (lower_contact, upper_contact) = contacts;
    let hull = if length > 0.0 {
        let lower_transform = align_hull(&lower.hull, positions[lower_contact], AlignEdge::Top);
        transform_members(positions, &lower.members, lower_transform, 0.0);

        let upper_transform = align_hull(&upper.hull, positions[upper_contact], AlignEdge::Bottom);
        transform_members(positions, &upper.members, upper_transform, length);

        let moved: Vec<Point> = lower
            .open_hull()
            .iter()
            .map(|&vertex| lower_transform.apply(vertex, 0.0))
            .chain(
                upper
                    .open_hull()
                    .iter()
                    .map(|&vertex| upper_transform.apply(vertex, length)),
            )
            .collect();
        convex_hull(&moved)
    } else {
        if !(lower.is_degenerate() && upper.is_degenerate()) {
            return Err(PlacementError::DegenerateZeroLength {
                source_vertex: lower_contact,
                target_vertex: upper_contact,
            });
        }
        upper.hull
    };

    let mut members = lower.members;
    members.extend(upper.members);
    Ok(Component { members, hull })
}
