//! Which clusters are still growing, and since when.
//!
//! For an active cluster `relevant_time` is the time it started growing (0 for singletons, the
//! merge time for merged clusters). For an inactive one it is the time it stopped.

use fixedbitset::FixedBitSet;
use num_traits::Float;

#[derive(Debug, Clone)]
pub(crate) struct ClusterActivity<T> {
    active: FixedBitSet,
    relevant_time: Vec<T>,
    number_of_active_clusters: usize,
}

impl<T: Float> ClusterActivity<T> {
    /// Tracks `capacity` cluster ids, of which the first `node_count` start out active.
    pub(crate) fn new(node_count: usize, capacity: usize) -> Self {
        let mut active = FixedBitSet::with_capacity(capacity);
        active.insert_range(..node_count);
        ClusterActivity {
            active,
            relevant_time: vec![T::zero(); capacity],
            number_of_active_clusters: node_count,
        }
    }

    pub(crate) fn activate_cluster(&mut self, cluster: usize, time: T) {
        if !self.active.put(cluster) {
            self.number_of_active_clusters += 1;
        }
        self.relevant_time[cluster] = time;
    }

    pub(crate) fn deactivate_cluster(&mut self, cluster: usize, time: T) {
        if self.active[cluster] {
            self.active.set(cluster, false);
            self.number_of_active_clusters -= 1;
        }
        self.relevant_time[cluster] = time;
    }

    pub(crate) fn active(&self, cluster: usize) -> bool {
        self.active[cluster]
    }

    pub(crate) fn relevant_time(&self, cluster: usize) -> T {
        self.relevant_time[cluster]
    }

    pub(crate) fn number_of_active_clusters(&self) -> usize {
        self.number_of_active_clusters
    }

    pub(crate) fn first_active_cluster(&self) -> Option<usize> {
        self.active.ones().next()
    }
}
