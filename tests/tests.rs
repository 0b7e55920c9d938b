use pcst::{
    AdjacencyView, Graph, GrowthPhase, ParentLink, Pcst, PcstError, PcstParams, PrizeSteinerTree,
    RunningTrue, TerminationFlag, PRUNED, ROOT,
};
use proptest::prelude::*;
use std::cell::Cell;
use std::collections::HashSet;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

fn compute(graph: &Graph<f64>, prizes: &[f64]) -> PrizeSteinerTree<f64> {
    Pcst::default_params(graph, |node: usize| prizes[node]).compute().unwrap()
}

fn kept_nodes(tree: &PrizeSteinerTree<f64>) -> HashSet<usize> {
    (0..tree.node_count()).filter(|&node| tree.parent(node) != ParentLink::Pruned).collect()
}

fn house_graph() -> Graph<f64> {
    Graph::from_edges(
        5,
        &[
            (0, 1, 10.0),
            (0, 3, 72.0),
            (1, 2, 74.0),
            (1, 3, 62.0),
            (1, 4, 54.0),
            (2, 3, 15.0),
            (2, 4, 62.0),
        ],
    )
}

#[test]
fn path_with_zero_prize_steiner_node() {
    let graph = Graph::from_edges(3, &[(0, 1, 3.0), (1, 2, 3.0)]);
    let tree = compute(&graph, &[10.0, 0.0, 10.0]);

    assert_eq!(tree.parent_array(), &[1, ROOT, 1]);
    assert_eq!(tree.relationship_to_parent_cost(), &[3.0, 0.0, 3.0]);
    assert_eq!(3, tree.effective_node_count());
    assert_eq!(6.0, tree.total_weight());
    assert_eq!(20.0, tree.sum_of_prizes());
    assert_eq!(14.0, tree.net_value());
}

#[test]
fn disconnected_nodes_keep_the_larger_prize() {
    let graph = Graph::empty(2);
    let tree = compute(&graph, &[5.0, 7.0]);

    assert_eq!(ParentLink::Pruned, tree.parent(0));
    assert_eq!(ParentLink::Root, tree.parent(1));
    assert_eq!(7.0, tree.net_value());
}

#[test]
fn star_with_expensive_spokes_keeps_one_leaf() {
    let graph = Graph::from_edges(5, &[(0, 1, 10.0), (0, 2, 10.0), (0, 3, 10.0), (0, 4, 10.0)]);
    let tree = compute(&graph, &[0.0, 1.0, 1.0, 1.0, 1.0]);

    assert_eq!(ParentLink::Pruned, tree.parent(0));
    let roots: Vec<usize> = (0..5).filter(|&node| tree.parent(node) == ParentLink::Root).collect();
    assert_eq!(1, roots.len());
    assert_ne!(0, roots[0]);
    assert_eq!(1, tree.effective_node_count());
    assert_eq!(0.0, tree.total_weight());
    assert_eq!(1.0, tree.net_value());
}

#[test]
fn single_node() {
    let graph = Graph::empty(1);
    let tree = compute(&graph, &[3.5]);
    assert_eq!(tree.parent_array(), &[ROOT]);
    assert_eq!(3.5, tree.net_value());
}

#[test]
fn empty_graph() {
    let graph: Graph<f64> = Graph::empty(0);
    let tree = compute(&graph, &[]);
    assert_eq!(0, tree.node_count());
    assert_eq!(None, tree.root());
}

#[test]
fn line_graph() {
    let graph = Graph::from_edges(4, &[(0, 1, 100.0), (1, 2, 10.0), (2, 3, 100.0)]);
    let tree = compute(&graph, &[20.0; 4]);

    assert_eq!(tree.parent_array(), &[PRUNED, 2, ROOT, PRUNED]);
    assert_eq!(10.0, tree.relationship_to_parent_cost()[1]);
    assert_eq!(30.0, tree.net_value());
}

#[test]
fn house_graph_with_uniform_prizes() {
    let tree = compute(&house_graph(), &[20.0; 5]);

    // The 62 edge between {0, 1} and {2, 3} does not pay for itself
    assert_eq!(tree.parent_array(), &[1, ROOT, PRUNED, PRUNED, PRUNED]);
    assert_eq!(30.0, tree.net_value());
}

#[test]
fn house_graph_with_distinct_prizes() {
    let graph = house_graph();
    let prizes = [9.0, 60.0, 30.0, 10.0, 110.0];

    let pcst = Pcst::default_params(&graph, |node: usize| prizes[node]);
    let growth_result = pcst.grow(&RunningTrue).unwrap();
    assert_eq!(5, growth_result.active_node_count());
    assert_eq!(4, growth_result.number_of_tree_edges());

    let tree = pcst.compute().unwrap();
    assert_eq!(HashSet::from([1, 4]), kept_nodes(&tree));
    assert_eq!(54.0, tree.total_weight());
    assert_eq!(116.0, tree.net_value());
}

#[test]
fn disconnected_graph_with_parallel_edges() {
    let graph = Graph::from_edges(
        5,
        &[(0, 3, 7.0), (1, 3, 3.0), (1, 3, 2.0), (2, 4, 4.0), (2, 4, 4.0)],
    );
    let tree = compute(&graph, &[4.0, 9.0, 8.0, 0.0, 7.0]);

    assert_eq!(tree.parent_array(), &[PRUNED, PRUNED, 4, PRUNED, ROOT]);
    assert_eq!(4.0, tree.relationship_to_parent_cost()[2]);
    assert_eq!(11.0, tree.net_value());
}

#[test]
fn growth_phase_reports_deactivation_times() {
    let graph = Graph::from_edges(2, &[(0, 1, 100.0)]);
    let mut growth = GrowthPhase::new(&graph, &[2.0, 5.0], 1e-6);
    let result = growth.grow(&RunningTrue).unwrap();

    assert_eq!(Some(2.0), growth.inactive_since(0));
    assert_eq!(None, growth.inactive_since(1));
    assert_eq!(Some(1), growth.single_active_cluster());
    assert_eq!(4.0, growth.moat_at(1, 4.0));
    assert_eq!(0, result.number_of_tree_edges());
    assert!(result.is_active(1) && !result.is_active(0));
}

#[test]
fn negative_prizes_are_clamped_by_default() {
    let graph = Graph::from_edges(2, &[(0, 1, 1.0)]);
    let tree = compute(&graph, &[-5.0, 3.0]);
    assert_eq!(tree.parent_array(), &[PRUNED, ROOT]);
    assert_eq!(3.0, tree.sum_of_prizes());
}

#[test]
fn negative_prizes_can_be_rejected() {
    let graph = Graph::from_edges(2, &[(0, 1, 1.0)]);
    let prizes = [-5.0, 3.0];
    let params = PcstParams::builder().clamp_negative_prizes(false).build();
    let result = Pcst::new(&graph, |node: usize| prizes[node], params).compute();
    assert!(matches!(result, Err(PcstError::NegativePrize(..))));
}

#[test]
fn invalid_inputs_are_rejected() {
    let graph = Graph::from_edges(2, &[(0, 1, -1.0)]);
    let result = Pcst::default_params(&graph, |_: usize| 1.0).compute();
    assert!(matches!(result, Err(PcstError::InvalidEdgeCost(..))));

    let graph = Graph::from_edges(2, &[(0, 1, 1.0)]);
    let result = Pcst::default_params(&graph, |_: usize| f64::NAN).compute();
    assert!(matches!(result, Err(PcstError::NonFinitePrize(..))));

    let result = Graph::try_from_edges(2, &[(0, 5, 1.0)]);
    assert!(matches!(result, Err(PcstError::NodeOutOfRange(..))));
}

#[test]
fn cancelled_computation() {
    let graph = Graph::from_edges(3, &[(0, 1, 3.0), (1, 2, 3.0)]);
    let prizes = [10.0, 0.0, 10.0];
    let pcst = Pcst::default_params(&graph, |node: usize| prizes[node]);

    let stop = AtomicBool::new(true);
    assert_eq!(Err(PcstError::Cancelled), pcst.compute_with_termination(&stop));

    let shared = Arc::new(AtomicBool::new(false));
    assert!(pcst.compute_with_termination(&shared).is_ok());
    assert_eq!("The computation was cancelled", PcstError::Cancelled.to_string());
}

#[test]
fn single_precision() {
    let graph: Graph<f32> = Graph::from_edges(3, &[(0, 1, 3.0), (1, 2, 3.0)]);
    let prizes = [10.0_f32, 0.0, 10.0];
    let tree = Pcst::default_params(&graph, |node: usize| prizes[node]).compute().unwrap();
    assert_eq!(14.0, tree.net_value());
}

#[test]
fn custom_adjacency_view() {
    struct Ring(usize);
    impl AdjacencyView<f64> for Ring {
        fn node_count(&self) -> usize {
            self.0
        }
        fn for_each_neighbor<F: FnMut(usize, f64) -> bool>(&self, node: usize, mut visitor: F) {
            let _ = visitor((node + 1) % self.0, 1.0) && visitor((node + self.0 - 1) % self.0, 1.0);
        }
    }

    let tree = Pcst::default_params(&Ring(6), |_: usize| 5.0).compute().unwrap();
    assert_eq!(6, tree.effective_node_count());
    assert_eq!(5.0, tree.total_weight());
    assert_eq!(25.0, tree.net_value());
}

fn random_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize, f64)>, Vec<f64>)> {
    (1usize..12).prop_flat_map(|node_count| {
        (
            Just(node_count),
            prop::collection::vec((0..node_count, 0..node_count, 0u32..20), 0..30),
            prop::collection::vec(0u32..20, node_count),
        )
            .prop_map(|(node_count, edges, prizes)| {
                let edges = edges
                    .into_iter()
                    .map(|(u, v, cost)| (u, v, f64::from(cost)))
                    .collect();
                (node_count, edges, prizes.into_iter().map(f64::from).collect())
            })
    })
}

/// Costs in sevenths and prizes in thirds, so slacks rarely cancel out exactly.
fn fractional_graph(
    scale: f64,
) -> impl Strategy<Value = (usize, Vec<(usize, usize, f64)>, Vec<f64>)> {
    (1usize..12).prop_flat_map(move |node_count| {
        (
            Just(node_count),
            prop::collection::vec((0..node_count, 0..node_count, 0u32..2000), 0..30),
            prop::collection::vec(0u32..2000, node_count),
        )
            .prop_map(move |(node_count, edges, prizes)| {
                let edges = edges
                    .into_iter()
                    .map(|(u, v, cost)| (u, v, f64::from(cost) / 7.0 * scale))
                    .collect();
                let prizes = prizes.into_iter().map(|prize| f64::from(prize) / 3.0 * scale);
                (node_count, edges, prizes.collect())
            })
    })
}

/// Stops the computation after a fixed number of loop iterations.
struct PollBudget(Cell<usize>);

impl TerminationFlag for PollBudget {
    fn running(&self) -> bool {
        let left = self.0.get();
        self.0.set(left.saturating_sub(1));
        left > 0
    }
}

fn single_root<T: num_traits::Float>(tree: &PrizeSteinerTree<T>) -> bool {
    (0..tree.node_count()).filter(|&node| tree.parent(node) == ParentLink::Root).count() == 1
}

proptest! {
    #[test]
    fn growth_respects_cluster_capacity((node_count, edges, prizes) in random_graph()) {
        let graph = Graph::from_edges(node_count, &edges);
        let mut growth = GrowthPhase::new(&graph, &prizes, 1e-6);
        let result = growth.grow(&RunningTrue).unwrap();

        prop_assert!(growth.cluster_count() <= 2 * node_count - 1);
        prop_assert!(result.number_of_tree_edges() <= node_count - 1);
        prop_assert!(growth.single_active_cluster().is_some());
        for cluster in 0..growth.cluster_count() {
            if let Some(parent) = growth.parent_cluster(cluster) {
                prop_assert!(parent > cluster);
                prop_assert!(growth.total_moat(parent) >= growth.total_moat(cluster));
            }
        }

        let retained_edges = result
            .tree_edges()
            .iter()
            .filter(|&&edge| {
                let (u, v) = result.edge_endpoints(edge);
                result.is_active(u) && result.is_active(v)
            })
            .count();
        prop_assert!(retained_edges + 1 <= result.active_node_count());
    }

    #[test]
    fn pruned_tree_is_well_formed((node_count, edges, prizes) in random_graph()) {
        let graph = Graph::from_edges(node_count, &edges);
        let pcst = Pcst::default_params(&graph, |node: usize| prizes[node]);
        let growth_result = pcst.grow(&RunningTrue).unwrap();
        let tree = pcst.compute().unwrap();

        prop_assert_eq!(node_count, tree.node_count());
        let roots: Vec<usize> = (0..node_count)
            .filter(|&node| tree.parent(node) == ParentLink::Root)
            .collect();
        prop_assert_eq!(1, roots.len());
        prop_assert!(tree.effective_node_count() <= growth_result.active_node_count());

        for node in 0..node_count {
            let mut current = node;
            let mut steps = 0;
            while let ParentLink::Node(parent) = tree.parent(current) {
                prop_assert!(tree.parent(parent) != ParentLink::Pruned);
                prop_assert!(graph.degree(parent) > 0);
                current = parent;
                steps += 1;
                prop_assert!(steps < node_count);
            }
            if tree.parent(node) == ParentLink::Pruned {
                prop_assert_eq!(0.0, tree.relationship_to_parent_cost()[node]);
            }
        }

        for node in (0..node_count).filter(|&node| growth_result.is_active(node)) {
            prop_assert!(tree.net_value() >= prizes[node]);
        }
    }

    #[test]
    fn fractional_weights_terminate((node_count, edges, prizes) in fractional_graph(1.0)) {
        let graph = Graph::from_edges(node_count, &edges);
        let pcst = Pcst::default_params(&graph, |node: usize| prizes[node]);
        let tree = pcst.compute_with_termination(&PollBudget(Cell::new(1_000_000))).unwrap();
        prop_assert!(single_root(&tree));
    }

    #[test]
    fn large_fractional_weights_terminate((node_count, edges, prizes) in fractional_graph(1e9)) {
        let graph = Graph::from_edges(node_count, &edges);
        let pcst = Pcst::default_params(&graph, |node: usize| prizes[node]);
        let tree = pcst.compute_with_termination(&PollBudget(Cell::new(1_000_000))).unwrap();
        prop_assert!(single_root(&tree));
    }

    #[test]
    fn single_precision_fractional_weights_terminate(
        (node_count, edges, prizes) in fractional_graph(100.0)
    ) {
        let edges: Vec<(usize, usize, f32)> =
            edges.into_iter().map(|(u, v, cost)| (u, v, cost as f32)).collect();
        let prizes: Vec<f32> = prizes.into_iter().map(|prize| prize as f32).collect();
        let graph = Graph::from_edges(node_count, &edges);
        let pcst = Pcst::default_params(&graph, |node: usize| prizes[node]);
        let tree = pcst.compute_with_termination(&PollBudget(Cell::new(1_000_000))).unwrap();
        prop_assert!(single_root(&tree));
    }
}
