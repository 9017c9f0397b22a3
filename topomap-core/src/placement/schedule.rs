//! Merge ordering for spanning tree edges.

/// Returns edge positions sorted by ascending weight.
///
/// The sort is stable: equal weights keep their input order, so identical
/// input always yields the same merge sequence.
pub(crate) fn merge_order(weights: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by(|&left, &right| weights[left].total_cmp(&weights[right]));
    order
}
