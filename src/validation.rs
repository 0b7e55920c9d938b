use crate::{AdjacencyView, PcstError, PcstParams};
use log::warn;
use num_traits::Float;

/// Checks the graph and prizes before the growth phase and materialises the prize of every node.
pub(crate) struct InputValidator<'a, G, P> {
    graph: &'a G,
    prizes: &'a P,
    params: &'a PcstParams,
}

impl<'a, G, P> InputValidator<'a, G, P> {
    pub(crate) fn new(graph: &'a G, prizes: &'a P, params: &'a PcstParams) -> Self {
        Self { graph, prizes, params }
    }

    /// # Returns
    /// * The prize of every node, with negative prizes clamped to zero if the parameters allow
    ///   it, or the first violation found.
    pub(crate) fn validate_input_data<T>(&self) -> Result<Vec<T>, PcstError>
    where
        T: Float,
        G: AdjacencyView<T>,
        P: Fn(usize) -> T,
    {
        let node_count = self.graph.node_count();
        let prizes = (0..node_count)
            .map(|node| self.validate_prize(node))
            .collect::<Result<Vec<T>, PcstError>>()?;
        for node in 0..node_count {
            self.validate_edges(node, node_count)?;
        }
        Ok(prizes)
    }

    fn validate_prize<T>(&self, node: usize) -> Result<T, PcstError>
    where
        T: Float,
        P: Fn(usize) -> T,
    {
        let prize = (self.prizes)(node);
        if !prize.is_finite() {
            return Err(PcstError::NonFinitePrize(format!(
                "{node}th node has prize {:?}",
                prize.to_f64()
            )));
        }
        if prize < T::zero() {
            if !self.params.clamp_negative_prizes {
                return Err(PcstError::NegativePrize(format!(
                    "{node}th node has prize {:?}",
                    prize.to_f64()
                )));
            }
            warn!("{node}th node has negative prize {:?}. Set to 0.", prize.to_f64());
            return Ok(T::zero());
        }
        Ok(prize)
    }

    fn validate_edges<T>(&self, node: usize, node_count: usize) -> Result<(), PcstError>
    where
        T: Float,
        G: AdjacencyView<T>,
    {
        let mut violation = None;
        self.graph.for_each_neighbor(node, |neighbor, cost| {
            if neighbor >= node_count {
                violation = Some(PcstError::NodeOutOfRange(format!(
                    "{node}th node has neighbor {neighbor} in a graph of {node_count} nodes"
                )));
            } else if !cost.is_finite() || cost < T::zero() {
                violation = Some(PcstError::InvalidEdgeCost(format!(
                    "edge ({node}, {neighbor}) has cost {:?}",
                    cost.to_f64()
                )));
            }
            violation.is_none()
        });
        violation.map_or(Ok(()), Err)
    }
}
