//! Planar convex hulls in the closed, clockwise form used by placement.
//!
//! Hulls are returned as closed polygons: the first vertex is repeated as the
//! last. Inputs that collapse to a single distinct point produce the
//! degenerate two-entry hull `[p, p]`, and two distinct points produce
//! `[a, b, a]`. Larger inputs use Andrew's monotone chain and are emitted
//! clockwise starting at the lexicographically smallest vertex, with
//! collinear boundary points dropped.

use std::collections::HashSet;

use crate::geometry::{Point, cross};

/// Computes the closed clockwise convex hull of `points`.
///
/// # Examples
/// ```
/// use topomap_core::{Point, convex_hull};
///
/// let hull = convex_hull(&[
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(1.0, 1.0),
///     Point::new(0.0, 1.0),
///     Point::new(0.5, 0.5),
/// ]);
/// assert_eq!(
///     hull,
///     vec![
///         Point::new(0.0, 0.0),
///         Point::new(0.0, 1.0),
///         Point::new(1.0, 1.0),
///         Point::new(1.0, 0.0),
///         Point::new(0.0, 0.0),
///     ]
/// );
/// ```
#[must_use]
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut distinct = distinct_points(points);
    match distinct.as_slice() {
        [] => Vec::new(),
        [only] => vec![*only, *only],
        [first, second] => vec![*first, *second, *first],
        _ => {
            distinct.sort_by(|left, right| {
                left.x
                    .total_cmp(&right.x)
                    .then_with(|| left.y.total_cmp(&right.y))
            });
            monotone_chain(&distinct)
        }
    }
}

fn distinct_points(points: &[Point]) -> Vec<Point> {
    // Adding zero folds -0.0 into +0.0 so both spellings of a coordinate
    // count as the same point.
    let mut seen = HashSet::with_capacity(points.len());
    points
        .iter()
        .copied()
        .filter(|point| seen.insert(((point.x + 0.0).to_bits(), (point.y + 0.0).to_bits())))
        .collect()
}

fn monotone_chain(sorted: &[Point]) -> Vec<Point> {
    let upper = half_chain(sorted.iter().copied());
    let lower = half_chain(sorted.iter().rev().copied());

    let mut hull = Vec::with_capacity(upper.len() + lower.len());
    hull.extend_from_slice(upper.split_last().map_or(&[][..], |(_, rest)| rest));
    hull.extend_from_slice(lower.split_last().map_or(&[][..], |(_, rest)| rest));
    if let Some(first) = hull.first().copied() {
        hull.push(first);
    }
    hull
}

/// Builds one side of the hull, keeping only clockwise turns.
fn half_chain(points: impl Iterator<Item = Point>) -> Vec<Point> {
    let mut chain: Vec<Point> = Vec::new();
    for point in points {
        while let [.., before, last] = chain.as_slice() {
            if cross(*before, *last, point) < 0.0 {
                break;
            }
            chain.pop();
        }
        chain.push(point);
    }
    chain
}

/// Returns `true` when `point` lies inside or on the closed clockwise
/// `hull`, allowing `tolerance` of perpendicular slack.
///
/// Degenerate hulls are handled as a point (`[p, p]`) or a segment
/// (`[a, b, a]`).
///
/// # Examples
/// ```
/// use topomap_core::{Point, convex_hull, hull_contains};
///
/// let hull = convex_hull(&[Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(0.0, 2.0)]);
/// assert!(hull_contains(&hull, Point::new(0.5, 0.5), 1e-12));
/// assert!(!hull_contains(&hull, Point::new(2.0, 2.0), 1e-12));
/// ```
#[must_use]
pub fn hull_contains(hull: &[Point], point: Point, tolerance: f64) -> bool {
    match hull {
        [] => false,
        [only] | [only, _] => only.distance(point) <= tolerance,
        [start, end, _] => segment_distance(*start, *end, point) <= tolerance,
        _ => hull.windows(2).all(|edge| match edge {
            [from, to] => {
                let length = from.distance(*to);
                length == 0.0 || cross(*from, *to, point) / length <= tolerance
            }
            _ => true,
        }),
    }
}

fn segment_distance(start: Point, end: Point, point: Point) -> f64 {
    let length_squared = start.distance_squared(end);
    if length_squared == 0.0 {
        return start.distance(point);
    }
    let along = ((point.x - start.x) * (end.x - start.x) + (point.y - start.y) * (end.y - start.y))
        / length_squared;
    let clamped = along.clamp(0.0, 1.0);
    let projection = Point::new(
        start.x + clamped * (end.x - start.x),
        start.y + clamped * (end.y - start.y),
    );
    projection.distance(point)
}
