//! Predicted deactivation times of the active clusters.
//!
//! Entries are not removed when a cluster stops growing for another reason (it was merged);
//! [`ClusterEventsPriorityQueue::closest_event`] drops such entries once they reach the top.

use crate::indexed_heap::IndexedMinHeap;
use num_traits::Float;

#[derive(Debug, Clone)]
pub(crate) struct ClusterEventsPriorityQueue<T> {
    queue: IndexedMinHeap<T>,
}

impl<T: Float> ClusterEventsPriorityQueue<T> {
    pub(crate) fn new(capacity: usize) -> Self {
        ClusterEventsPriorityQueue { queue: IndexedMinHeap::new(capacity) }
    }

    pub(crate) fn add(&mut self, cluster: usize, time: T) {
        self.queue.set(cluster, time);
    }

    /// Discards top entries whose cluster is no longer active. Afterwards the top, if any,
    /// belongs to an active cluster.
    pub(crate) fn closest_event<F>(&mut self, active: F)
    where
        F: Fn(usize) -> bool,
    {
        while let Some((cluster, _)) = self.queue.peek() {
            if active(cluster) {
                break;
            }
            self.queue.pop();
        }
    }

    pub(crate) fn top_cluster(&self) -> Option<usize> {
        self.queue.peek().map(|(cluster, _)| cluster)
    }

    /// Time of the top event, infinity when there is none.
    pub(crate) fn closest_event_time(&self) -> T {
        self.queue.peek().map_or(T::infinity(), |(_, time)| time)
    }

    pub(crate) fn pop(&mut self) -> Option<(usize, T)> {
        self.queue.pop()
    }

    pub(crate) fn len(&self) -> usize {
        self.queue.len()
    }
}
