//! Edge-tightening events.
//!
//! Every cluster owns a pairing heap of the edge-halves leaving it, keyed by the time the half is
//! predicted to become tight. A master heap keyed by each growing cluster's minimum yields the
//! globally next event. Inactive clusters are taken out of the master heap and only come back
//! through a merge.
//!
//! Re-adding an edge-half supersedes its earlier entry: entries carry a generation stamp and
//! superseded ones are dropped when they surface at the top of their heap.

use crate::indexed_heap::IndexedMinHeap;
use crate::pairing_heap::PairingHeaps;
use num_traits::Float;

#[derive(Debug, Clone, Copy, PartialEq)]
struct EdgeEntry {
    edge_part: usize,
    generation: u32,
}

#[derive(Debug, Clone)]
pub(crate) struct EdgeEventsQueue<T> {
    heaps: PairingHeaps<T, EdgeEntry>,
    master: IndexedMinHeap<T>,
    generation: Vec<u32>,
}

impl<T: Float> EdgeEventsQueue<T> {
    pub(crate) fn new(cluster_capacity: usize, edge_count: usize) -> Self {
        EdgeEventsQueue {
            heaps: PairingHeaps::new(cluster_capacity, 2 * edge_count),
            master: IndexedMinHeap::new(cluster_capacity),
            generation: vec![0; 2 * edge_count],
        }
    }

    /// Registers edge `edge_id` between singleton clusters `u` and `v`. Half `2 * edge_id` goes
    /// into `u`'s heap, half `2 * edge_id + 1` into `v`'s, both at `cost / 2`.
    pub(crate) fn add_both_ways(&mut self, u: usize, v: usize, edge_id: usize, cost: T) {
        let half = cost / (T::one() + T::one());
        self.insert(u, 2 * edge_id, half);
        self.insert(v, 2 * edge_id + 1, half);
    }

    /// Seeds the master heap with the minimum of every non-empty singleton heap.
    pub(crate) fn perform_initial_assignment(&mut self, node_count: usize) {
        for cluster in 0..node_count {
            self.refresh(cluster);
        }
    }

    /// Adds (or supersedes) `edge_part` in `cluster`'s heap and, if the cluster is in the master
    /// heap, updates its key.
    pub(crate) fn add_with_update(&mut self, cluster: usize, edge_part: usize, value: T) {
        self.insert(cluster, edge_part, value);
        if self.master.contains(cluster) {
            self.refresh(cluster);
        }
    }

    /// Time of the globally next edge event, infinity when none is left.
    pub(crate) fn next_event_time(&mut self) -> T {
        self.top().map_or(T::infinity(), |(_, _, time)| time)
    }

    pub(crate) fn top_edge_part(&mut self) -> Option<usize> {
        self.top().map(|(_, edge_part, _)| edge_part)
    }

    /// The next live event as `(cluster, edge_part, time)`.
    pub(crate) fn top(&mut self) -> Option<(usize, usize, T)> {
        loop {
            let (cluster, time) = self.master.peek()?;
            match self.heaps.min_element(cluster) {
                Some(entry) if self.is_live(entry) => return Some((cluster, entry.edge_part, time)),
                Some(_) => {
                    self.heaps.pop(cluster);
                    self.refresh(cluster);
                }
                None => {
                    self.master.remove(cluster);
                }
            }
        }
    }

    /// Removes the globally next event and returns its `(cluster, edge_part, time)`.
    pub(crate) fn pop(&mut self) -> Option<(usize, usize, T)> {
        let event = self.top()?;
        self.heaps.pop(event.0);
        self.refresh(event.0);
        Some(event)
    }

    /// Moves the heaps of `first` and `second` under `merged` and lets `merged` take their place
    /// in the master heap.
    pub(crate) fn merge_and_update(&mut self, merged: usize, first: usize, second: usize) {
        self.heaps.join(merged, first);
        self.heaps.join(merged, second);
        self.master.remove(first);
        self.master.remove(second);
        self.refresh(merged);
    }

    /// Shifts every pending event of an inactive cluster by the time it spent inactive, so its
    /// events line up with the clock again once it is merged into a growing cluster.
    pub(crate) fn increase_values_on_inactive_cluster(&mut self, cluster: usize, delta: T) {
        self.heaps.increase_values(cluster, delta);
    }

    pub(crate) fn deactivate_cluster(&mut self, cluster: usize) {
        self.master.remove(cluster);
    }

    fn insert(&mut self, cluster: usize, edge_part: usize, value: T) {
        self.generation[edge_part] = self.generation[edge_part].wrapping_add(1);
        let entry = EdgeEntry { edge_part, generation: self.generation[edge_part] };
        self.heaps.add(cluster, entry, value);
    }

    fn is_live(&self, entry: EdgeEntry) -> bool {
        self.generation[entry.edge_part] == entry.generation
    }

    fn refresh(&mut self, cluster: usize) {
        match self.heaps.min_value(cluster) {
            Some(value) => self.master.set(cluster, value),
            None => {
                self.master.remove(cluster);
            }
        }
    }
}

/// The other half of the edge that `edge_part` belongs to.
pub(crate) fn other_edge_part(edge_part: usize) -> usize {
    (edge_part + 1) - 2 * (edge_part % 2)
}
