//! Union-find (disjoint set union) over vertex ids.
//!
//! Both the Borůvka spanning tree builder and the placement driver process
//! edges while merging connected components. This module provides the
//! partition they use to track component membership. Roots are chosen by
//! rank, so callers must not assume which of two merged ids becomes the
//! representative and should look it up again with [`DisjointSet::find`].

#[derive(Clone, Debug)]
pub(crate) struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    components: usize,
}

impl DisjointSet {
    /// Creates `n` singleton sets, one per id in `0..n`.
    pub(crate) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            components: n,
        }
    }

    /// Number of disjoint sets remaining.
    pub(crate) fn components(&self) -> usize {
        self.components
    }

    /// Returns the representative of `node`, compressing the path behind it.
    ///
    /// # Panics
    /// Panics when `node` is outside the partition.
    pub(crate) fn find(&mut self, mut node: usize) -> usize {
        let root = self.root(node);
        while self.parent[node] != root {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }
        root
    }

    /// Returns the representative of `node` without modifying the
    /// partition.
    ///
    /// # Panics
    /// Panics when `node` is outside the partition.
    pub(crate) fn root(&self, node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        root
    }

    /// Merges the sets holding `left` and `right`.
    ///
    /// Returns `false` when both already share a representative.
    pub(crate) fn union(&mut self, left: usize, right: usize) -> bool {
        let mut left = self.find(left);
        let mut right = self.find(right);
        if left == right {
            return false;
        }
        let left_rank = self.rank[left];
        let right_rank = self.rank[right];
        if left_rank < right_rank {
            std::mem::swap(&mut left, &mut right);
        }
        self.parent[right] = left;
        if left_rank == right_rank {
            self.rank[left] = left_rank.saturating_add(1);
        }
        self.components -= 1;
        true
    }
}
