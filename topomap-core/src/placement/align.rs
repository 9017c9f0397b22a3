//! Rigid alignment of a component's hull against a contact point.

use crate::geometry::{Point, Transformation};

/// Which hull edge incident to the contact vertex is laid horizontal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum AlignEdge {
    /// The edge towards the next vertex in clockwise order. After alignment
    /// the component lies on or below the x axis.
    Top,
    /// The edge towards the previous vertex in clockwise order. After
    /// alignment the component lies on or above the x axis.
    Bottom,
}

/// Computes the transformation that moves the hull vertex nearest to
/// `contact` to the origin and rotates the chosen incident edge onto the
/// positive x axis.
///
/// `hull` must be closed. The scan skips the closing duplicate and keeps the
/// first vertex among equally near candidates. A hull holding a single
/// location (`[p, p]`) only translates.
pub(crate) fn align_hull(hull: &[Point], contact: Point, edge: AlignEdge) -> Transformation {
    let open = hull.len().saturating_sub(1);
    if open == 0 {
        return Transformation::IDENTITY;
    }

    let mut nearest = 0;
    let mut best = hull[0].distance_squared(contact);
    for (index, vertex) in hull.iter().enumerate().take(open).skip(1) {
        let distance = vertex.distance_squared(contact);
        if distance < best {
            best = distance;
            nearest = index;
        }
    }

    let (anchor, neighbour) = match edge {
        AlignEdge::Top => (nearest, nearest + 1),
        AlignEdge::Bottom => {
            // Index `open` is the closing duplicate of vertex 0.
            let anchor = if nearest == 0 { open } else { nearest };
            (anchor, anchor - 1)
        }
    };

    let origin = hull[anchor];
    let translation = Transformation::translation(-origin.x, -origin.y);
    if hull.len() > 2 {
        translation.with_rotation_along(origin, hull[neighbour])
    } else {
        translation
    }
}

/// Applies `transformation` and `y_offset` to the current position of every
/// member.
pub(crate) fn transform_members(
    positions: &mut [Point],
    members: &[usize],
    transformation: Transformation,
    y_offset: f64,
) {
    for &member in members {
        positions[member] = transformation.apply(positions[member], y_offset);
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::hull::convex_hull;

    const EPS: f64 = 1e-12;

    fn assert_close(actual: Point, expected: Point) {
        assert!(
            (actual.x - expected.x).abs() <= EPS && (actual.y - expected.y).abs() <= EPS,
            "{actual:?} != {expected:?}"
        );
    }

    fn square() -> Vec<Point> {
        convex_hull(&[
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
        ])
    }

    #[rstest]
    #[case::top(AlignEdge::Top)]
    #[case::bottom(AlignEdge::Bottom)]
    fn single_location_hull_only_translates(#[case] edge: AlignEdge) {
        let p = Point::new(3.0, -1.0);
        let t = align_hull(&[p, p], p, edge);
        assert_eq!(t, Transformation::translation(-3.0, 1.0));
    }

    #[test]
    fn empty_hull_is_identity() {
        assert_eq!(align_hull(&[], Point::ORIGIN, AlignEdge::Top), Transformation::IDENTITY);
    }

    #[rstest]
    #[case::top(AlignEdge::Top)]
    #[case::bottom(AlignEdge::Bottom)]
    fn contact_vertex_moves_to_origin(#[case] edge: AlignEdge) {
        let hull = square();
        for &contact in &hull[..hull.len() - 1] {
            let t = align_hull(&hull, contact, edge);
            assert_close(t.apply(contact, 0.0), Point::ORIGIN);
        }
    }

    #[test]
    fn top_alignment_keeps_component_below_axis() {
        let hull = square();
        for &contact in &hull[..hull.len() - 1] {
            let t = align_hull(&hull, contact, AlignEdge::Top);
            for &vertex in &hull {
                assert!(t.apply(vertex, 0.0).y <= EPS, "contact {contact:?}");
            }
        }
    }

    #[test]
    fn bottom_alignment_keeps_component_above_axis() {
        let hull = square();
        for &contact in &hull[..hull.len() - 1] {
            let t = align_hull(&hull, contact, AlignEdge::Bottom);
            for &vertex in &hull {
                assert!(t.apply(vertex, 0.0).y >= -EPS, "contact {contact:?}");
            }
        }
    }

    #[test]
    fn bottom_alignment_at_first_vertex_uses_closing_edge() {
        let hull = square();
        let first = hull[0];
        let previous = hull[hull.len() - 2];
        let t = align_hull(&hull, first, AlignEdge::Bottom);
        let moved = t.apply(previous, 0.0);
        assert!(moved.y.abs() <= EPS);
        assert!(moved.x > 0.0);
    }

    #[test]
    fn nearest_vertex_wins_for_off_hull_contact() {
        let hull = square();
        let t = align_hull(&hull, Point::new(1.9, 2.2), AlignEdge::Top);
        assert_close(t.apply(Point::new(2.0, 2.0), 0.0), Point::ORIGIN);
    }

    #[test]
    fn equidistant_contact_keeps_first_vertex() {
        let hull = square();
        let t = align_hull(&hull, Point::new(1.0, 1.0), AlignEdge::Top);
        assert_close(t.apply(hull[0], 0.0), Point::ORIGIN);
    }

    #[test]
    fn transform_members_only_moves_listed_vertices() {
        let mut positions = vec![Point::new(1.0, 1.0), Point::new(5.0, 5.0), Point::new(2.0, 1.0)];
        transform_members(&mut positions, &[0, 2], Transformation::translation(-1.0, -1.0), 0.5);
        assert_eq!(positions, vec![Point::new(0.0, 0.5), Point::new(5.0, 5.0), Point::new(1.0, 0.5)]);
    }
}
