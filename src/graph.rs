use crate::PcstError;
use num_traits::Float;

/// Read-only view of an undirected, weighted graph with dense node ids in `[0, node_count)`.
///
/// Every undirected edge must be visible from both of its endpoints. The algorithm only
/// registers an edge from the endpoint with the smaller id, so each edge is seen once.
pub trait AdjacencyView<T> {
    fn node_count(&self) -> usize;

    /// Calls `visitor(neighbor, cost)` for every edge incident to `node`. Iteration stops early
    /// once the visitor returns `false`.
    fn for_each_neighbor<F>(&self, node: usize, visitor: F)
    where
        F: FnMut(usize, T) -> bool;
}

/// An owned undirected adjacency list.
///
/// # Examples
/// ```
///use pcst::{AdjacencyView, Graph};
///
///let graph = Graph::from_edges(3, &[(0, 1, 3.0), (1, 2, 3.0)]);
///assert_eq!(3, graph.node_count());
///assert_eq!(2, graph.degree(1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Graph<T> {
    adjacency: Vec<Vec<(usize, T)>>,
}

impl<T: Float> Graph<T> {
    /// Builds the graph from `(source, target, cost)` triples. Each triple becomes one undirected
    /// edge, stored from both sides.
    ///
    /// # Panics
    /// If an endpoint is not below `node_count`. Use [`Graph::try_from_edges`] for unchecked input.
    pub fn from_edges(node_count: usize, edges: &[(usize, usize, T)]) -> Self {
        match Self::try_from_edges(node_count, edges) {
            Ok(graph) => graph,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_from_edges(
        node_count: usize,
        edges: &[(usize, usize, T)],
    ) -> Result<Self, PcstError> {
        let mut adjacency = vec![Vec::new(); node_count];
        for (n, &(source, target, cost)) in edges.iter().enumerate() {
            if source >= node_count || target >= node_count {
                return Err(PcstError::NodeOutOfRange(format!(
                    "{n}th edge ({source}, {target}) does not fit a graph of {node_count} nodes"
                )));
            }
            adjacency[source].push((target, cost));
            if source != target {
                adjacency[target].push((source, cost));
            }
        }
        Ok(Graph { adjacency })
    }

    /// A graph with `node_count` nodes and no edges.
    pub fn empty(node_count: usize) -> Self {
        Graph { adjacency: vec![Vec::new(); node_count] }
    }

    pub fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len()
    }
}

impl<T: Float> AdjacencyView<T> for Graph<T> {
    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn for_each_neighbor<F>(&self, node: usize, mut visitor: F)
    where
        F: FnMut(usize, T) -> bool,
    {
        for &(neighbor, cost) in &self.adjacency[node] {
            if !visitor(neighbor, cost) {
                break;
            }
        }
    }
}
