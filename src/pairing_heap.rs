//! Pairing heaps with lazy value offsets.
//!
//! A [`PairingHeaps`] is a forest of min pairing heaps that share one node arena, so melding two
//! heaps never copies elements, and nodes freed by `pop` are recycled by later `add` calls.
//! Heaps are addressed by a dense heap id; the edge queue uses one heap per cluster.
//!
//! Besides the usual add / min / pop / join, a heap supports adding the same delta to every
//! element in O(1). The delta is parked in the root's `children_offset` and only pushed one level
//! down when a node's children are detached by `pop`. The true value of a node is its own
//! `value` plus the `children_offset` of every proper ancestor.
//!
//! Elements are append only: there is no decrease-key.

use num_traits::Float;

#[derive(Debug, Clone)]
struct PairingNode<T, I> {
    element: I,
    value: T,
    children_offset: T,
    child: Option<usize>,
    sibling: Option<usize>,
}

#[derive(Debug, Clone)]
pub(crate) struct PairingHeaps<T, I> {
    roots: Vec<Option<usize>>,
    nodes: Vec<PairingNode<T, I>>,
    free: Vec<usize>,
    scratch: Vec<usize>,
}

impl<T: Float, I: Copy> PairingHeaps<T, I> {
    /// Creates `heap_count` empty heaps, with room for `expected_elements` live elements.
    pub(crate) fn new(heap_count: usize, expected_elements: usize) -> Self {
        PairingHeaps {
            roots: vec![None; heap_count],
            nodes: Vec::with_capacity(expected_elements),
            free: Vec::new(),
            scratch: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, heap: usize, element: I, value: T) {
        let node = PairingNode {
            element,
            value,
            children_offset: T::zero(),
            child: None,
            sibling: None,
        };
        let index = match self.free.pop() {
            Some(index) => {
                self.nodes[index] = node;
                index
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        self.roots[heap] = Some(match self.roots[heap] {
            Some(root) => self.meld(root, index),
            None => index,
        });
    }

    pub(crate) fn min_element(&self, heap: usize) -> Option<I> {
        self.roots[heap].map(|root| self.nodes[root].element)
    }

    pub(crate) fn min_value(&self, heap: usize) -> Option<T> {
        self.roots[heap].map(|root| self.nodes[root].value)
    }

    /// Removes the minimum of `heap` and re-melds its children with the two-pass strategy.
    pub(crate) fn pop(&mut self, heap: usize) -> Option<(I, T)> {
        let root = self.roots[heap]?;
        let PairingNode { element, value, children_offset, child, .. } = self.nodes[root].clone();

        self.scratch.clear();
        let mut next = child;
        while let Some(index) = next {
            let node = &mut self.nodes[index];
            next = node.sibling.take();
            node.value = node.value + children_offset;
            node.children_offset = node.children_offset + children_offset;
            self.scratch.push(index);
        }

        self.roots[heap] = self.combine_siblings();
        self.free.push(root);
        Some((element, value))
    }

    /// Melds `other` into `heap`, leaving `other` empty.
    pub(crate) fn join(&mut self, heap: usize, other: usize) {
        if heap == other {
            return;
        }
        let Some(other_root) = self.roots[other].take() else {
            return;
        };
        self.roots[heap] = Some(match self.roots[heap] {
            Some(root) => self.meld(root, other_root),
            None => other_root,
        });
    }

    /// Adds `delta` to the value of every element of `heap`.
    pub(crate) fn increase_values(&mut self, heap: usize, delta: T) {
        if let Some(root) = self.roots[heap] {
            let node = &mut self.nodes[root];
            node.value = node.value + delta;
            node.children_offset = node.children_offset + delta;
        }
    }

    fn combine_siblings(&mut self) -> Option<usize> {
        if self.scratch.is_empty() {
            return None;
        }
        // Left to right: meld neighbours pairwise.
        let mut paired = 0;
        let mut i = 0;
        while i + 1 < self.scratch.len() {
            let melded = self.meld(self.scratch[i], self.scratch[i + 1]);
            self.scratch[paired] = melded;
            paired += 1;
            i += 2;
        }
        if i < self.scratch.len() {
            self.scratch[paired] = self.scratch[i];
            paired += 1;
        }
        // Right to left: fold the pairs into the last one.
        let mut result = self.scratch[paired - 1];
        for j in (0..paired - 1).rev() {
            result = self.meld(self.scratch[j], result);
        }
        Some(result)
    }

    /// Melds two detached roots and returns the new root. The root with the larger value
    /// becomes the first child of the other; on ties `a` stays on top.
    fn meld(&mut self, a: usize, b: usize) -> usize {
        let (parent, child) = if self.nodes[b].value < self.nodes[a].value {
            (b, a)
        } else {
            (a, b)
        };
        let offset = self.nodes[parent].children_offset;
        let first_child = self.nodes[parent].child;

        let node = &mut self.nodes[child];
        node.value = node.value - offset;
        node.children_offset = node.children_offset - offset;
        node.sibling = first_child;

        self.nodes[parent].child = Some(child);
        parent
    }
}
