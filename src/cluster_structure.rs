//! The merge tree of the growth phase.
//!
//! Node `i` starts out as singleton cluster `i`. Every merge allocates the next free cluster id
//! and makes it the parent of both inputs, so `n` nodes use at most `2n - 1` cluster ids and a
//! parent id is always larger than its children's. Parents are write-once and paths are never
//! compressed: [`ClusterStructure::sum_on_edge_part`] walks to the current root on every call,
//! which costs O(height) per query.

use num_traits::Float;

/// Root cluster reached from a node together with the moat summed along the way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ClusterMoatPair<T> {
    pub(crate) cluster: usize,
    pub(crate) total_moat: T,
}

#[derive(Debug, Clone)]
pub(crate) struct ClusterStructure<T> {
    parent: Vec<Option<usize>>,
    prize: Vec<T>,
    moat: Vec<T>,
    total_moat: Vec<T>,
    next_label: usize,
}

impl<T: Float> ClusterStructure<T> {
    pub(crate) fn new(node_count: usize) -> Self {
        let length = (2 * node_count).saturating_sub(1);
        ClusterStructure {
            parent: vec![None; length],
            prize: vec![T::zero(); length],
            moat: vec![T::zero(); length],
            total_moat: vec![T::zero(); length],
            next_label: node_count,
        }
    }

    /// Number of cluster ids handed out so far, singletons included.
    pub(crate) fn cluster_count(&self) -> usize {
        self.next_label
    }

    pub(crate) fn merge(&mut self, a: usize, b: usize) -> usize {
        let merged = self.next_label;
        self.parent[a] = Some(merged);
        self.parent[b] = Some(merged);
        self.prize[merged] = self.prize[a] + self.prize[b];
        self.total_moat[merged] = self.total_moat[a] + self.total_moat[b];
        self.next_label += 1;
        merged
    }

    pub(crate) fn parent(&self, cluster: usize) -> Option<usize> {
        self.parent[cluster]
    }

    pub(crate) fn set_cluster_prize(&mut self, cluster: usize, prize: T) {
        self.prize[cluster] = prize;
    }

    pub(crate) fn cluster_prize(&self, cluster: usize) -> T {
        self.prize[cluster]
    }

    pub(crate) fn moat(&self, cluster: usize) -> T {
        self.moat[cluster]
    }

    pub(crate) fn total_moat(&self, cluster: usize) -> T {
        self.total_moat[cluster]
    }

    pub(crate) fn increase_moat(&mut self, cluster: usize, value: T) {
        self.moat[cluster] = self.moat[cluster] + value;
        self.total_moat[cluster] = self.total_moat[cluster] + value;
    }

    pub(crate) fn set_moat(&mut self, cluster: usize, value: T) {
        let delta = value - self.moat[cluster];
        self.increase_moat(cluster, delta);
    }

    /// The time at which `cluster`, growing from `current_moat` on, has paid its whole prize.
    pub(crate) fn tightness_time(&self, cluster: usize, current_moat: T) -> T {
        current_moat + (self.prize[cluster] - self.total_moat[cluster])
    }

    /// Walks from `node` to its current root, summing the frozen moat of every cluster visited.
    pub(crate) fn sum_on_edge_part(&self, node: usize) -> ClusterMoatPair<T> {
        let mut cluster = node;
        let mut total_moat = self.moat[cluster];
        while let Some(parent) = self.parent[cluster] {
            cluster = parent;
            total_moat = total_moat + self.moat[cluster];
        }
        ClusterMoatPair { cluster, total_moat }
    }

    pub(crate) fn sum_on_edge_part_only(&self, node: usize) -> T {
        self.sum_on_edge_part(node).total_moat
    }

    pub(crate) fn find_root(&self, mut cluster: usize) -> usize {
        while let Some(parent) = self.parent[cluster] {
            cluster = parent;
        }
        cluster
    }
}
