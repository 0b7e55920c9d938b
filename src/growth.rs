//! The primal-dual growth phase.
//!
//! All clusters start as singletons that grow a moat at unit rate. Two kinds of events are
//! simulated in time order:
//! * a cluster has paid its whole prize and stops growing (cluster event), or
//! * the moats on both sides of an edge cover its cost and the two clusters merge (edge event).
//!
//! A cluster's moat is only written when it stops growing. While it grows, its live moat is
//! `moat + (time - relevant_time)`, where `relevant_time` is the time it started growing.
//! The loop ends once at most one cluster is still growing.

use crate::cluster_activity::ClusterActivity;
use crate::cluster_events::ClusterEventsPriorityQueue;
use crate::cluster_structure::{ClusterMoatPair, ClusterStructure};
use crate::data_wrappers::GrowthResult;
use crate::edge_events::{other_edge_part, EdgeEventsQueue};
use crate::{AdjacencyView, PcstError, TerminationFlag};
use fixedbitset::FixedBitSet;
use log::{debug, trace};
use num_traits::Float;

/// Event-driven simulation of the moat growth over one graph.
///
/// # Examples
/// ```
///use pcst::{GrowthPhase, Graph, RunningTrue};
///
///let graph = Graph::from_edges(4, &[(0, 1, 100.0), (1, 2, 10.0), (2, 3, 100.0)]);
///let prizes = vec![20.0; 4];
///let mut growth = GrowthPhase::new(&graph, &prizes, 1e-6);
///let result = growth.grow(&RunningTrue).unwrap();
///assert_eq!(1, result.number_of_tree_edges());
///assert!(result.is_active(1) && result.is_active(2));
/// ```
#[derive(Debug, Clone)]
pub struct GrowthPhase<T> {
    node_count: usize,
    epsilon: T,
    cluster_structure: ClusterStructure<T>,
    cluster_activity: ClusterActivity<T>,
    cluster_events: ClusterEventsPriorityQueue<T>,
    edge_events: EdgeEventsQueue<T>,
    edge_parts: Vec<usize>,
    edge_costs: Vec<T>,
    tree_edges: Vec<usize>,
    time: T,
    deactivations: usize,
}

impl<T: Float> GrowthPhase<T> {
    /// Seeds one singleton cluster per node and one pair of edge-halves per undirected edge.
    ///
    /// # Parameters
    /// * `graph` - the graph, with every edge visible from both endpoints.
    /// * `prizes` - one non-negative, finite prize per node.
    /// * `epsilon` - slack below which an edge counts as tight.
    ///
    /// # Panics
    /// If `prizes` is shorter than the node count or a neighbor id is out of range. Inputs that
    /// went through [`crate::Pcst`] are validated beforehand.
    pub fn new<G: AdjacencyView<T>>(graph: &G, prizes: &[T], epsilon: T) -> Self {
        let node_count = graph.node_count();
        let cluster_capacity = (2 * node_count).saturating_sub(1);
        let edge_count = count_edges(graph);

        let mut cluster_structure = ClusterStructure::new(node_count);
        let mut cluster_events = ClusterEventsPriorityQueue::new(cluster_capacity);
        for (node, &prize) in prizes.iter().enumerate().take(node_count) {
            cluster_structure.set_cluster_prize(node, prize);
            cluster_events.add(node, cluster_structure.tightness_time(node, T::zero()));
        }

        let mut edge_events = EdgeEventsQueue::new(cluster_capacity, edge_count);
        let mut edge_parts = Vec::with_capacity(2 * edge_count);
        let mut edge_costs = Vec::with_capacity(edge_count);
        for source in 0..node_count {
            graph.for_each_neighbor(source, |target, cost| {
                if target > source {
                    let edge_id = edge_costs.len();
                    edge_costs.push(cost);
                    edge_parts.push(source);
                    edge_parts.push(target);
                    edge_events.add_both_ways(source, target, edge_id, cost);
                }
                true
            });
        }
        edge_events.perform_initial_assignment(node_count);

        GrowthPhase {
            node_count,
            epsilon,
            cluster_structure,
            cluster_activity: ClusterActivity::new(node_count, cluster_capacity),
            cluster_events,
            edge_events,
            edge_parts,
            edge_costs,
            tree_edges: Vec::with_capacity(node_count.saturating_sub(1)),
            time: T::zero(),
            deactivations: 0,
        }
    }

    /// Runs the simulation until at most one cluster is still growing.
    ///
    /// # Returns
    /// * The merge edges and the nodes of the surviving cluster, or
    ///   [`PcstError::Cancelled`] if the termination flag stops the loop.
    pub fn grow<F: TerminationFlag>(
        &mut self,
        termination: &F,
    ) -> Result<GrowthResult<T>, PcstError> {
        while self.cluster_activity.number_of_active_clusters() > 1 {
            termination.assert_running()?;

            let edge_event_time = self.edge_events.next_event_time();
            let activity = &self.cluster_activity;
            self.cluster_events.closest_event(|cluster| activity.active(cluster));
            let cluster_event_time = self.cluster_events.closest_event_time();

            if cluster_event_time.is_infinite() && edge_event_time.is_infinite() {
                break;
            }
            if cluster_event_time <= edge_event_time {
                self.time = self.time.max(cluster_event_time);
                self.process_cluster_event();
            } else {
                self.time = self.time.max(edge_event_time);
                self.process_edge_event();
            }
        }

        let result = self.growth_result();
        debug!(
            "Growth phase finished at time {:?}: {} merges, {} deactivations, \
            {} pending cluster events, {} of {} nodes retained",
            self.time.to_f64(),
            result.number_of_tree_edges(),
            self.deactivations,
            self.cluster_events.len(),
            result.active_node_count(),
            self.node_count
        );
        Ok(result)
    }

    /// The time at which `cluster` stopped growing, or `None` while it still grows.
    pub fn inactive_since(&self, cluster: usize) -> Option<T> {
        if self.is_known_cluster(cluster) && !self.cluster_activity.active(cluster) {
            Some(self.cluster_activity.relevant_time(cluster))
        } else {
            None
        }
    }

    /// The moat `cluster` has accumulated by `time`: the frozen value for clusters that stopped
    /// growing, the live value for growing ones.
    pub fn moat_at(&self, cluster: usize, time: T) -> T {
        let moat = self.cluster_structure.moat(cluster);
        if self.cluster_activity.active(cluster) {
            moat + (time - self.cluster_activity.relevant_time(cluster))
        } else {
            moat
        }
    }

    /// Moat summed from `node` up to its current root at `time`, together with that root.
    pub fn moat_on_path(&self, node: usize, time: T) -> (usize, T) {
        let pair = self.path_moat(node, time);
        (pair.cluster, pair.total_moat)
    }

    /// The cluster `node` currently belongs to.
    pub fn root_cluster(&self, node: usize) -> usize {
        self.cluster_structure.find_root(node)
    }

    /// Moat summed from `node` up to its root, counting only frozen moats.
    pub fn frozen_moat_on_path(&self, node: usize) -> T {
        self.cluster_structure.sum_on_edge_part_only(node)
    }

    /// The cluster still growing, if exactly one is.
    pub fn single_active_cluster(&self) -> Option<usize> {
        if self.cluster_activity.number_of_active_clusters() == 1 {
            self.cluster_activity.first_active_cluster()
        } else {
            None
        }
    }

    pub fn is_cluster_active(&self, cluster: usize) -> bool {
        self.is_known_cluster(cluster) && self.cluster_activity.active(cluster)
    }

    /// Time at which `cluster`, growing from `time` on, runs out of prize.
    pub fn tightness_time(&self, cluster: usize, time: T) -> T {
        self.cluster_structure.tightness_time(cluster, time)
    }

    pub fn cluster_prize(&self, cluster: usize) -> T {
        self.cluster_structure.cluster_prize(cluster)
    }

    pub fn total_moat(&self, cluster: usize) -> T {
        self.cluster_structure.total_moat(cluster)
    }

    pub fn parent_cluster(&self, cluster: usize) -> Option<usize> {
        self.cluster_structure.parent(cluster)
    }

    /// Number of cluster ids in use, singletons included.
    pub fn cluster_count(&self) -> usize {
        self.cluster_structure.cluster_count()
    }

    pub fn current_time(&self) -> T {
        self.time
    }

    fn is_known_cluster(&self, cluster: usize) -> bool {
        cluster < self.cluster_structure.cluster_count()
    }

    fn process_cluster_event(&mut self) {
        let Some(cluster) = self.cluster_events.top_cluster() else {
            return;
        };
        self.cluster_events.pop();
        self.freeze_moat(cluster);
        self.cluster_activity.deactivate_cluster(cluster, self.time);
        self.edge_events.deactivate_cluster(cluster);
        self.deactivations += 1;
        trace!("Cluster {cluster} ran out of prize at {:?}", self.time.to_f64());
    }

    fn process_edge_event(&mut self) {
        let Some(u_part) = self.edge_events.top_edge_part() else {
            return;
        };
        self.edge_events.pop();
        let v_part = other_edge_part(u_part);
        let u_side = self.path_moat(self.edge_parts[u_part], self.time);
        let v_side = self.path_moat(self.edge_parts[v_part], self.time);
        if u_side.cluster == v_side.cluster {
            return;
        }

        let edge_id = u_part / 2;
        let remainder = self.edge_costs[edge_id] - u_side.total_moat - v_side.total_moat;
        let v_active = self.cluster_activity.active(v_side.cluster);
        let next_event_time = if v_active {
            self.time + remainder / (T::one() + T::one())
        } else {
            self.time + remainder
        };

        // A slack too small to move the clock at this magnitude is as tight as it gets.
        if remainder <= self.epsilon || next_event_time <= self.time {
            self.merge(edge_id, u_side.cluster, v_side.cluster);
            return;
        }

        self.edge_events.add_with_update(u_side.cluster, u_part, next_event_time);
        if v_active {
            self.edge_events.add_with_update(v_side.cluster, v_part, next_event_time);
        } else {
            let inactive_since = self.cluster_activity.relevant_time(v_side.cluster);
            self.edge_events.add_with_update(v_side.cluster, v_part, inactive_since + remainder);
        }
    }

    fn merge(&mut self, edge_id: usize, first: usize, second: usize) {
        for cluster in [first, second] {
            if self.cluster_activity.active(cluster) {
                self.freeze_moat(cluster);
                self.cluster_activity.deactivate_cluster(cluster, self.time);
            } else {
                let idle = self.time - self.cluster_activity.relevant_time(cluster);
                self.edge_events.increase_values_on_inactive_cluster(cluster, idle);
            }
        }

        let merged = self.cluster_structure.merge(first, second);
        self.cluster_activity.activate_cluster(merged, self.time);
        self.edge_events.merge_and_update(merged, first, second);
        self.cluster_events
            .add(merged, self.cluster_structure.tightness_time(merged, self.time));
        self.tree_edges.push(edge_id);
        trace!(
            "Edge {edge_id} merged clusters {first} and {second} into {merged} at {:?}",
            self.time.to_f64()
        );
    }

    /// Writes the moat a growing cluster has accumulated up to now.
    fn freeze_moat(&mut self, cluster: usize) {
        let grown = self.time - self.cluster_activity.relevant_time(cluster);
        let moat = self.cluster_structure.moat(cluster) + grown;
        self.cluster_structure.set_moat(cluster, moat);
    }

    fn path_moat(&self, node: usize, time: T) -> ClusterMoatPair<T> {
        let mut pair = self.cluster_structure.sum_on_edge_part(node);
        if self.cluster_activity.active(pair.cluster) {
            pair.total_moat =
                pair.total_moat + (time - self.cluster_activity.relevant_time(pair.cluster));
        }
        pair
    }

    /// Marks the nodes whose merge-tree root is still growing. Parents always carry larger ids
    /// than their children, so one pass from the top id down settles every cluster.
    fn growth_result(&self) -> GrowthResult<T> {
        let cluster_count = self.cluster_structure.cluster_count();
        let mut retained = FixedBitSet::with_capacity(cluster_count);
        for cluster in (0..cluster_count).rev() {
            let keep = match self.cluster_structure.parent(cluster) {
                Some(parent) => retained[parent],
                None => self.cluster_activity.active(cluster),
            };
            retained.set(cluster, keep);
        }
        let mut active_original_nodes = FixedBitSet::with_capacity(self.node_count);
        for node in 0..self.node_count {
            active_original_nodes.set(node, retained[node]);
        }

        GrowthResult {
            tree_edges: self.tree_edges.clone(),
            edge_parts: self.edge_parts.clone(),
            edge_costs: self.edge_costs.clone(),
            active_original_nodes,
            node_count: self.node_count,
        }
    }
}

fn count_edges<T, G: AdjacencyView<T>>(graph: &G) -> usize {
    let mut edge_count = 0;
    for source in 0..graph.node_count() {
        graph.for_each_neighbor(source, |target, _| {
            if target > source {
                edge_count += 1;
            }
            true
        });
    }
    edge_count
}
