use crate::data_wrappers::{GrowthResult, TreeStructure};
use log::debug;
use num_traits::Float;

/// Turns the merge edges of the growth phase into the tree that strong pruning works on.
pub(crate) struct TreeProducer;

impl TreeProducer {
    /// Keeps the merge edges whose endpoints are both retained. Since the retained nodes are
    /// exactly the nodes of one merge-tree cluster, the kept edges form a single tree over them.
    pub(crate) fn create_tree<T: Float>(growth_result: &GrowthResult<T>) -> TreeStructure<T> {
        let node_count = growth_result.node_count();
        let mut adjacency: Vec<Vec<(usize, T)>> = vec![Vec::new(); node_count];
        let mut degree = vec![0; node_count];

        for &edge in growth_result.tree_edges() {
            let (u, v) = growth_result.edge_endpoints(edge);
            if growth_result.is_active(u) && growth_result.is_active(v) {
                let cost = growth_result.edge_costs()[edge];
                adjacency[u].push((v, cost));
                adjacency[v].push((u, cost));
                degree[u] += 1;
                degree[v] += 1;
            }
        }

        let tree = TreeStructure { adjacency, degree };
        debug!(
            "Tree has {} of {} merge edges over {} retained nodes",
            tree.edge_count(),
            growth_result.number_of_tree_edges(),
            growth_result.active_node_count()
        );
        tree
    }
}
