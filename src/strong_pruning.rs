//! Leaf-peeling dynamic program over the produced tree.
//!
//! Leaves are peeled one at a time. A peeled node hands its value minus the connecting edge's
//! cost up to its neighbor, but only when that difference is positive; otherwise it stays a
//! root of its own. The node with the best value roots the answer and every other root's
//! subtree is pruned.

use crate::data_wrappers::{GrowthResult, TreeStructure};
use crate::steiner_tree::{PrizeSteinerTree, PRUNED, ROOT};
use crate::{PcstError, TerminationFlag};
use log::debug;
use num_traits::Float;
use std::collections::VecDeque;

pub(crate) struct StrongPruning<'a, T, F> {
    tree: TreeStructure<T>,
    growth_result: &'a GrowthResult<T>,
    prizes: &'a [T],
    termination: &'a F,
    parent_array: Vec<i64>,
    parent_cost: Vec<T>,
}

impl<'a, T: Float, F: TerminationFlag> StrongPruning<'a, T, F> {
    pub(crate) fn new(
        tree: TreeStructure<T>,
        growth_result: &'a GrowthResult<T>,
        prizes: &'a [T],
        termination: &'a F,
    ) -> Self {
        let node_count = tree.node_count();
        StrongPruning {
            tree,
            growth_result,
            prizes,
            termination,
            parent_array: vec![PRUNED; node_count],
            parent_cost: vec![T::zero(); node_count],
        }
    }

    pub(crate) fn compute(mut self) -> Result<PrizeSteinerTree<T>, PcstError> {
        let node_count = self.tree.node_count();
        let active_nodes: Vec<usize> =
            (0..node_count).filter(|&node| self.growth_result.is_active(node)).collect();

        match active_nodes.as_slice() {
            [] => {}
            &[node] => self.parent_array[node] = ROOT,
            _ => {
                let best = self.peel_leaves()?;
                if let Some(best) = best {
                    self.parent_array[best] = ROOT;
                    self.parent_cost[best] = T::zero();
                    self.prune_other_roots(best)?;
                }
            }
        }

        let result = PrizeSteinerTree::new(self.parent_array, self.parent_cost, self.prizes);
        debug!(
            "Strong pruning kept {} of {} nodes rooted at {:?} with value {:?}",
            result.effective_node_count(),
            node_count,
            result.root(),
            result.net_value().to_f64()
        );
        Ok(result)
    }

    /// Runs the dynamic program and returns the node with the largest value.
    fn peel_leaves(&mut self) -> Result<Option<usize>, PcstError> {
        let mut dp = self.prizes.to_vec();
        let degree = &mut self.tree.degree;
        let mut queue: VecDeque<usize> = (0..degree.len())
            .filter(|&node| self.growth_result.is_active(node) && degree[node] <= 1)
            .collect();

        let mut best: Option<usize> = None;
        while let Some(node) = queue.pop_front() {
            self.termination.assert_running()?;
            degree[node] = 0;
            self.parent_array[node] = ROOT;
            if best.map_or(true, |best| dp[node] > dp[best]) {
                best = Some(node);
            }

            let remaining = self.tree.adjacency[node]
                .iter()
                .find(|&&(neighbor, _)| degree[neighbor] > 0)
                .copied();
            let Some((parent, cost)) = remaining else {
                continue;
            };
            if cost < dp[node] {
                dp[parent] = dp[parent] + (dp[node] - cost);
                self.parent_array[node] = parent as i64;
                self.parent_cost[node] = cost;
            }
            degree[parent] -= 1;
            if degree[parent] == 1 {
                queue.push_back(parent);
            }
        }
        Ok(best)
    }

    /// Marks the subtree of every root other than `best` as pruned.
    fn prune_other_roots(&mut self, best: usize) -> Result<(), PcstError> {
        let mut stack = Vec::new();
        for root in 0..self.parent_array.len() {
            if root == best || self.parent_array[root] != ROOT {
                continue;
            }
            stack.push(root);
            while let Some(node) = stack.pop() {
                self.termination.assert_running()?;
                for &(child, _) in &self.tree.adjacency[node] {
                    if self.parent_array[child] == node as i64 {
                        stack.push(child);
                    }
                }
                self.parent_array[node] = PRUNED;
                self.parent_cost[node] = T::zero();
            }
        }
        Ok(())
    }
}
