use crate::data_wrappers::GrowthResult;
use crate::growth::GrowthPhase;
use crate::strong_pruning::StrongPruning;
use crate::tree_producer::TreeProducer;
use crate::validation::InputValidator;
use crate::{AdjacencyView, PcstError, PcstParams, PrizeSteinerTree, RunningTrue, TerminationFlag};
use num_traits::Float;
use std::marker::PhantomData;

/// Prize-collecting Steiner tree computation over one graph.
///
/// The graph is any [`AdjacencyView`]; prizes come from a lookup function mapping node ids to
/// prizes. Validation runs first, then the growth phase, the tree production and finally
/// strong pruning.
pub struct Pcst<'a, G, P, T> {
    graph: &'a G,
    prizes: P,
    params: PcstParams,
    _float: PhantomData<T>,
}

impl<'a, G, P, T> Pcst<'a, G, P, T>
where
    T: Float,
    G: AdjacencyView<T>,
    P: Fn(usize) -> T,
{
    /// Creates an instance of the PCST computation with custom parameters.
    ///
    /// # Parameters
    /// * `graph` - the undirected graph, with every edge visible from both endpoints and
    ///             non-negative, finite edge costs.
    /// * `prizes` - a lookup from node id to its prize. Prizes must be finite.
    /// * `params` - the parameters, created through the builder pattern.
    ///
    /// # Returns
    /// * The PCST instance.
    ///
    /// # Examples
    /// ```
    ///use pcst::{Graph, Pcst, PcstParams};
    ///
    ///let graph = Graph::from_edges(2, &[(0, 1, 1.0)]);
    ///let prizes = [4.0, 4.0];
    ///let params = PcstParams::builder().epsilon(1e-9).build();
    ///let pcst = Pcst::new(&graph, |node: usize| prizes[node], params);
    /// ```
    pub fn new(graph: &'a G, prizes: P, params: PcstParams) -> Self {
        Pcst {
            graph,
            prizes,
            params,
            _float: PhantomData,
        }
    }

    /// Creates an instance of the PCST computation using the default parameters.
    pub fn default_params(graph: &'a G, prizes: P) -> Self {
        Pcst::new(graph, prizes, PcstParams::default())
    }

    /// Computes the pruned prize-collecting Steiner tree.
    ///
    /// # Returns
    /// * A result that, if successful, holds one parent entry per node: a parent id, `ROOT` for
    ///   the node rooting the tree, or `PRUNED` for nodes left out. An Error will be returned if
    ///   a prize is not finite, a prize is negative while clamping is disabled, an edge cost is
    ///   negative or not finite, or a neighbor id lies outside the graph.
    ///
    /// # Examples
    /// ```
    ///use pcst::{Graph, ParentLink, Pcst};
    ///
    ///let graph = Graph::from_edges(3, &[(0, 1, 3.0), (1, 2, 3.0)]);
    ///let prizes = [10.0, 0.0, 10.0];
    ///let tree = Pcst::default_params(&graph, |node: usize| prizes[node]).compute().unwrap();
    ///assert_eq!(ParentLink::Root, tree.parent(1));
    ///assert_eq!(ParentLink::Node(1), tree.parent(0));
    ///assert_eq!(14.0, tree.net_value());
    /// ```
    pub fn compute(&self) -> Result<PrizeSteinerTree<T>, PcstError> {
        self.compute_with_termination(&RunningTrue)
    }

    /// Same as [`Pcst::compute`], polling `termination` once per growth event and once per node
    /// handled by strong pruning. Returns [`PcstError::Cancelled`] as soon as it asks to stop.
    pub fn compute_with_termination<F: TerminationFlag>(
        &self,
        termination: &F,
    ) -> Result<PrizeSteinerTree<T>, PcstError> {
        let prizes = self.validated_prizes()?;
        if prizes.is_empty() {
            return Ok(PrizeSteinerTree::empty());
        }
        let growth_result = self.run_growth(&prizes, termination)?;
        let tree = TreeProducer::create_tree(&growth_result);
        StrongPruning::new(tree, &growth_result, &prizes, termination).compute()
    }

    /// Runs only the growth phase and returns its merge edges and retained nodes, before any
    /// pruning.
    pub fn grow<F: TerminationFlag>(&self, termination: &F) -> Result<GrowthResult<T>, PcstError> {
        let prizes = self.validated_prizes()?;
        self.run_growth(&prizes, termination)
    }

    fn validated_prizes(&self) -> Result<Vec<T>, PcstError> {
        let validator = InputValidator::new(self.graph, &self.prizes, &self.params);
        validator.validate_input_data()
    }

    fn run_growth<F: TerminationFlag>(
        &self,
        prizes: &[T],
        termination: &F,
    ) -> Result<GrowthResult<T>, PcstError> {
        let epsilon = T::from(self.params.epsilon).unwrap_or_else(T::zero);
        let mut growth = GrowthPhase::new(self.graph, prizes, epsilon);
        growth.grow(termination)
    }
}
