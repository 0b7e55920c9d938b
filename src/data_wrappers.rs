use fixedbitset::FixedBitSet;

/// What the growth phase leaves behind: the edges that became tight and merged two clusters,
/// and the original nodes that ended up in the cluster still growing when the phase stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthResult<T> {
    pub(crate) tree_edges: Vec<usize>,
    pub(crate) edge_parts: Vec<usize>,
    pub(crate) edge_costs: Vec<T>,
    pub(crate) active_original_nodes: FixedBitSet,
    pub(crate) node_count: usize,
}

impl<T: Copy> GrowthResult<T> {
    /// Ids of the merge edges, in the order they were merged.
    pub fn tree_edges(&self) -> &[usize] {
        &self.tree_edges
    }

    pub fn number_of_tree_edges(&self) -> usize {
        self.tree_edges.len()
    }

    /// Endpoint of every edge-half: edge `e` connects `edge_parts()[2 * e]` and
    /// `edge_parts()[2 * e + 1]`.
    pub fn edge_parts(&self) -> &[usize] {
        &self.edge_parts
    }

    pub fn edge_costs(&self) -> &[T] {
        &self.edge_costs
    }

    pub fn edge_endpoints(&self, edge: usize) -> (usize, usize) {
        (self.edge_parts[2 * edge], self.edge_parts[2 * edge + 1])
    }

    pub fn is_active(&self, node: usize) -> bool {
        self.active_original_nodes[node]
    }

    pub fn active_node_count(&self) -> usize {
        self.active_original_nodes.count_ones(..)
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }
}

/// The selected tree edges as an adjacency list, with a degree array that strong pruning
/// consumes as it peels leaves.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TreeStructure<T> {
    pub(crate) adjacency: Vec<Vec<(usize, T)>>,
    pub(crate) degree: Vec<usize>,
}

impl<T> TreeStructure<T> {
    pub(crate) fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.degree.iter().sum::<usize>() / 2
    }
}
