//! Property tests for placement invariants over random spanning trees.

use proptest::prelude::*;
use proptest::sample::Index;

use super::Placer;
use crate::{geometry::Point, hull::hull_contains, test_utils::suite_proptest_config};

#[derive(Clone, Debug)]
struct RandomTree {
    edges: Vec<(usize, usize)>,
    weights: Vec<f64>,
}

impl RandomTree {
    fn vertex_count(&self) -> usize {
        self.edges.len() + 1
    }

    fn scale(&self) -> f64 {
        1.0 + self.weights.iter().sum::<f64>()
    }
}

fn weight_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        1 => Just(0.0),
        6 => 0.01_f64..10.0,
        1 => (1_u8..=4).prop_map(f64::from),
    ]
}

/// Attaches vertex `i + 1` to a random earlier vertex, so the edges always
/// form a tree. Endpoint order is randomised.
fn tree_strategy() -> impl Strategy<Value = RandomTree> {
    prop::collection::vec((any::<Index>(), weight_strategy(), any::<bool>()), 0..40).prop_map(
        |links| {
            let (edges, weights) = links
                .into_iter()
                .enumerate()
                .map(|(i, (parent, weight, flip))| {
                    let child = i + 1;
                    let parent = parent.index(child);
                    let edge = if flip { (child, parent) } else { (parent, child) };
                    (edge, weight)
                })
                .unzip();
            RandomTree { edges, weights }
        },
    )
}

fn is_open_hull_vertex(hull: &[Point], point: Point) -> bool {
    hull.split_last()
        .is_some_and(|(_, open)| open.iter().any(|vertex| *vertex == point))
}

proptest! {
    #![proptest_config(suite_proptest_config(96))]

    #[test]
    fn every_member_stays_inside_its_hull(tree in tree_strategy()) {
        let tolerance = 1e-9 * tree.scale();
        let mut placer = Placer::new(&tree.edges, &tree.weights).expect("generated tree is valid");
        while let Some(record) = placer.step().expect("generated tree must place") {
            let hull = placer.hull_of(record.source()).expect("merged component exists");
            prop_assert_eq!(hull.first(), hull.last());
            let members = placer.members_of(record.source()).expect("merged component exists");
            prop_assert_eq!(placer.members_of(record.target()), Some(members));
            for &member in members {
                let position = placer.positions()[member];
                prop_assert!(
                    hull_contains(hull, position, tolerance),
                    "member {} at {:?} escaped hull {:?}",
                    member,
                    position,
                    hull,
                );
            }
        }
    }

    #[test]
    fn contact_vertices_end_one_edge_length_apart(tree in tree_strategy()) {
        let mut placer = Placer::new(&tree.edges, &tree.weights).expect("generated tree is valid");
        loop {
            let before = placer.clone();
            let Some(record) = placer.step().expect("generated tree must place") else {
                break;
            };
            let on_hulls = [record.source(), record.target()].into_iter().all(|vertex| {
                before
                    .hull_of(vertex)
                    .is_some_and(|hull| is_open_hull_vertex(hull, before.positions()[vertex]))
            });
            if !on_hulls || record.weight() == 0.0 {
                continue;
            }
            let lower = placer.positions()[record.source()];
            let upper = placer.positions()[record.target()];
            let tolerance = 1e-9 * record.weight().max(1.0);
            prop_assert!(lower.distance(Point::ORIGIN) <= tolerance, "lower contact at {:?}", lower);
            prop_assert!(
                (upper.y - lower.y - record.weight()).abs() <= tolerance,
                "gap {} for weight {}",
                upper.y - lower.y,
                record.weight(),
            );
            prop_assert!((upper.x - lower.x).abs() <= tolerance);
        }
    }

    #[test]
    fn merged_sides_are_separated_by_the_edge_weight(tree in tree_strategy()) {
        let tolerance = 1e-9 * tree.scale();
        let mut placer = Placer::new(&tree.edges, &tree.weights).expect("generated tree is valid");
        loop {
            let before = placer.clone();
            let Some(record) = placer.step().expect("generated tree must place") else {
                break;
            };
            let lower = before.members_of(record.source()).expect("lower component exists");
            let upper = before.members_of(record.target()).expect("upper component exists");
            let positions = placer.positions();
            for &a in lower {
                prop_assert!(positions[a].y <= tolerance);
                for &b in upper {
                    prop_assert!(positions[b].y >= record.weight() - tolerance);
                    prop_assert!(positions[a].distance(positions[b]) >= record.weight() - tolerance);
                }
            }
        }
    }

    #[test]
    fn placement_ends_with_one_component_of_every_vertex(tree in tree_strategy()) {
        let n = tree.vertex_count();
        let mut placer = Placer::new(&tree.edges, &tree.weights).expect("generated tree is valid");
        let mut merges = 0;
        while placer.step().expect("generated tree must place").is_some() {
            merges += 1;
        }
        prop_assert_eq!(merges, n - 1);
        let mut members = placer.members_of(0).expect("vertex 0 has a component").to_vec();
        members.sort_unstable();
        prop_assert_eq!(members, (0..n).collect::<Vec<_>>());
        let positions = placer.finish().expect("nothing left to merge");
        prop_assert_eq!(positions.len(), n);
        prop_assert!(positions.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }
}
