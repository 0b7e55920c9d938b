use num_traits::Float;

/// Parent entry of a node that roots the selected tree.
pub const ROOT: i64 = -1;
/// Parent entry of a node that is not part of the selected tree.
pub const PRUNED: i64 = -2;

/// Where a node ended up in the selected tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentLink {
    Root,
    Pruned,
    Node(usize),
}

/// The pruned Steiner tree, one parent entry per node of the input graph.
///
/// Parents are stored as plain `i64`s with the [`ROOT`] and [`PRUNED`] sentinels so hosts can
/// write the array out directly. [`PrizeSteinerTree::parent`] gives the typed view.
#[derive(Debug, Clone, PartialEq)]
pub struct PrizeSteinerTree<T> {
    parent_array: Vec<i64>,
    relationship_to_parent_cost: Vec<T>,
    effective_node_count: usize,
    sum_of_prizes: T,
    total_weight: T,
}

impl<T: Float> PrizeSteinerTree<T> {
    pub(crate) fn new(
        parent_array: Vec<i64>,
        relationship_to_parent_cost: Vec<T>,
        prizes: &[T],
    ) -> Self {
        let mut effective_node_count = 0;
        let mut sum_of_prizes = T::zero();
        let mut total_weight = T::zero();
        for (node, &parent) in parent_array.iter().enumerate() {
            if parent != PRUNED {
                effective_node_count += 1;
                sum_of_prizes = sum_of_prizes + prizes[node];
                total_weight = total_weight + relationship_to_parent_cost[node];
            }
        }
        PrizeSteinerTree {
            parent_array,
            relationship_to_parent_cost,
            effective_node_count,
            sum_of_prizes,
            total_weight,
        }
    }

    pub(crate) fn empty() -> Self {
        PrizeSteinerTree::new(Vec::new(), Vec::new(), &[])
    }

    /// Parent id of every node, or [`ROOT`] / [`PRUNED`].
    pub fn parent_array(&self) -> &[i64] {
        &self.parent_array
    }

    /// Cost of the edge to the parent. Zero for roots and pruned nodes.
    pub fn relationship_to_parent_cost(&self) -> &[T] {
        &self.relationship_to_parent_cost
    }

    pub fn parent(&self, node: usize) -> ParentLink {
        match self.parent_array[node] {
            ROOT => ParentLink::Root,
            PRUNED => ParentLink::Pruned,
            parent => ParentLink::Node(parent as usize),
        }
    }

    pub fn node_count(&self) -> usize {
        self.parent_array.len()
    }

    /// Number of nodes kept in the tree.
    pub fn effective_node_count(&self) -> usize {
        self.effective_node_count
    }

    /// Sum of the costs of the kept edges.
    pub fn total_weight(&self) -> T {
        self.total_weight
    }

    /// Sum of the prizes of the kept nodes.
    pub fn sum_of_prizes(&self) -> T {
        self.sum_of_prizes
    }

    pub fn net_value(&self) -> T {
        self.sum_of_prizes - self.total_weight
    }

    /// The node rooting the tree, if any node was kept.
    pub fn root(&self) -> Option<usize> {
        self.parent_array.iter().position(|&parent| parent == ROOT)
    }
}
