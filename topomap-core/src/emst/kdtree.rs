//! Bounding-box kd-tree used for nearest-foreign-neighbour queries.
//!
//! Nodes are stored in pre-order, so every child sits at a larger index than
//! its parent. Each round of Borůvka labels nodes whose points all belong to
//! one component, which lets a query skip whole subtrees of its own
//! component.

use std::num::NonZeroUsize;

use crate::{datasource::DataSource, matrix::PointMatrix};

#[derive(Clone, Debug)]
struct Node {
    start: usize,
    end: usize,
    lower: Vec<f64>,
    upper: Vec<f64>,
    children: Option<(usize, usize)>,
}

impl Node {
    fn min_distance_squared(&self, matrix: &PointMatrix, query: usize) -> f64 {
        let mut sum = 0.0;
        for (axis, (low, high)) in self.lower.iter().zip(&self.upper).enumerate() {
            let value = matrix.coordinate(query, axis);
            let gap = if value < *low {
                low - value
            } else if value > *high {
                value - high
            } else {
                0.0
            };
            sum += gap * gap;
        }
        sum
    }
}

/// The closest point found so far for one query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Neighbour {
    pub(crate) index: usize,
    pub(crate) distance_squared: f64,
}

impl Neighbour {
    /// Orders by distance, then by index, so ties resolve deterministically.
    fn improves_on(self, best: Option<Self>) -> bool {
        best.is_none_or(|best| {
            self.distance_squared < best.distance_squared
                || (self.distance_squared == best.distance_squared && self.index < best.index)
        })
    }
}

#[derive(Clone, Debug)]
pub(crate) struct KdTree {
    nodes: Vec<Node>,
    order: Vec<usize>,
}

impl KdTree {
    /// Builds a tree over every row of `matrix`. Leaves hold at most
    /// `leaf_size` points unless all of their points coincide.
    pub(crate) fn build(matrix: &PointMatrix, leaf_size: NonZeroUsize) -> Self {
        let rows = matrix.len();
        let mut tree = Self {
            nodes: Vec::new(),
            order: (0..rows).collect(),
        };
        if rows > 0 {
            tree.build_node(matrix, 0, rows, leaf_size.get());
        }
        tree
    }

    fn build_node(&mut self, matrix: &PointMatrix, start: usize, end: usize, leaf_size: usize) -> usize {
        let (lower, upper) = self.bounds(matrix, start, end);
        let index = self.nodes.len();
        self.nodes.push(Node {
            start,
            end,
            lower,
            upper,
            children: None,
        });

        let node = &self.nodes[index];
        let (axis, width) = node
            .lower
            .iter()
            .zip(&node.upper)
            .map(|(low, high)| high - low)
            .enumerate()
            .fold((0, 0.0_f64), |widest, (axis, width)| {
                if width > widest.1 { (axis, width) } else { widest }
            });
        let count = end - start;
        if count <= leaf_size || width <= 0.0 {
            return index;
        }

        let middle = count / 2;
        self.order[start..end].select_nth_unstable_by(middle, |&left, &right| {
            matrix
                .coordinate(left, axis)
                .total_cmp(&matrix.coordinate(right, axis))
        });
        let left = self.build_node(matrix, start, start + middle, leaf_size);
        let right = self.build_node(matrix, start + middle, end, leaf_size);
        self.nodes[index].children = Some((left, right));
        index
    }

    fn bounds(&self, matrix: &PointMatrix, start: usize, end: usize) -> (Vec<f64>, Vec<f64>) {
        let dimension = matrix.dimension();
        let mut lower = vec![f64::INFINITY; dimension];
        let mut upper = vec![f64::NEG_INFINITY; dimension];
        for &row in &self.order[start..end] {
            for axis in 0..dimension {
                let value = matrix.coordinate(row, axis);
                lower[axis] = lower[axis].min(value);
                upper[axis] = upper[axis].max(value);
            }
        }
        (lower, upper)
    }

    /// Labels each node with the component shared by all of its points, or
    /// `None` when its points span several components.
    pub(crate) fn component_labels(&self, labels: &[usize]) -> Vec<Option<usize>> {
        let mut node_labels = vec![None; self.nodes.len()];
        for (index, node) in self.nodes.iter().enumerate().rev() {
            node_labels[index] = match node.children {
                Some((left, right)) => match (node_labels[left], node_labels[right]) {
                    (Some(a), Some(b)) if a == b => Some(a),
                    _ => None,
                },
                None => {
                    let mut points = self.order[node.start..node.end].iter();
                    let first = points.next().map(|&row| labels[row]);
                    first.filter(|&label| points.all(|&row| labels[row] == label))
                }
            };
        }
        node_labels
    }

    /// Finds the nearest point to `query` whose component label differs
    /// from the query's own.
    pub(crate) fn nearest_foreign(
        &self,
        matrix: &PointMatrix,
        labels: &[usize],
        node_labels: &[Option<usize>],
        query: usize,
    ) -> Option<Neighbour> {
        let own = labels[query];
        let mut best: Option<Neighbour> = None;
        let mut stack = vec![0_usize];
        while let Some(index) = stack.pop() {
            let Some(node) = self.nodes.get(index) else {
                continue;
            };
            if node_labels[index] == Some(own) {
                continue;
            }
            let bound = node.min_distance_squared(matrix, query);
            if best.is_some_and(|best| bound > best.distance_squared) {
                continue;
            }
            match node.children {
                Some((left, right)) => {
                    let left_bound = self.nodes[left].min_distance_squared(matrix, query);
                    let right_bound = self.nodes[right].min_distance_squared(matrix, query);
                    if left_bound <= right_bound {
                        stack.push(right);
                        stack.push(left);
                    } else {
                        stack.push(left);
                        stack.push(right);
                    }
                }
                None => {
                    for &row in &self.order[node.start..node.end] {
                        if labels[row] == own {
                            continue;
                        }
                        let candidate = Neighbour {
                            index: row,
                            distance_squared: matrix.distance_squared(query, row),
                        };
                        if candidate.improves_on(best) {
                            best = Some(candidate);
                        }
                    }
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use rstest::rstest;

    use super::KdTree;
    use crate::matrix::PointMatrix;

    fn grid() -> PointMatrix {
        let values = (0..5)
            .flat_map(|x| (0..5).flat_map(move |y| [f64::from(x), f64::from(y) * 1.5]))
            .collect();
        PointMatrix::try_new("grid", 2, values).expect("grid is valid")
    }

    fn brute_force(matrix: &PointMatrix, labels: &[usize], query: usize) -> Option<(usize, f64)> {
        (0..labels.len())
            .filter(|&row| labels[row] != labels[query])
            .map(|row| (row, matrix.distance_squared(query, row)))
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
    }

    #[rstest]
    #[case::leaf_one(1)]
    #[case::leaf_three(3)]
    #[case::single_leaf(64)]
    fn nearest_foreign_matches_brute_force(#[case] leaf_size: usize) {
        let matrix = grid();
        let leaf = NonZeroUsize::new(leaf_size).expect("leaf size is non-zero");
        let tree = KdTree::build(&matrix, leaf);
        let labels: Vec<usize> = (0..25).map(|row| if row < 12 { 0 } else { row % 3 + 1 }).collect();
        let node_labels = tree.component_labels(&labels);
        for query in 0..25 {
            let found = tree
                .nearest_foreign(&matrix, &labels, &node_labels, query)
                .map(|n| (n.index, n.distance_squared));
            assert_eq!(found, brute_force(&matrix, &labels, query), "query {query}");
        }
    }

    #[test]
    fn single_component_has_no_foreign_neighbour() {
        let matrix = grid();
        let tree = KdTree::build(&matrix, NonZeroUsize::MIN);
        let labels = vec![7; 25];
        let node_labels = tree.component_labels(&labels);
        assert!(node_labels.iter().all(|label| *label == Some(7)));
        assert_eq!(tree.nearest_foreign(&matrix, &labels, &node_labels, 0), None);
    }

    #[test]
    fn coincident_points_form_a_single_leaf() {
        let matrix = PointMatrix::try_new("same", 2, vec![1.0; 10]).expect("valid matrix");
        let tree = KdTree::build(&matrix, NonZeroUsize::MIN);
        assert_eq!(tree.nodes.len(), 1);
    }
}
