//! Binary min-heap over dense integer ids, with one key per id.
//!
//! Each id is present at most once. [`IndexedMinHeap::set`] inserts an id or moves it to its new
//! key, and [`IndexedMinHeap::remove`] deletes it, so callers never have to leave stale
//! entries behind.

use num_traits::Float;

#[derive(Debug, Clone)]
pub(crate) struct IndexedMinHeap<T> {
    heap: Vec<usize>,
    keys: Vec<T>,
    positions: Vec<Option<usize>>,
}

impl<T: Float> IndexedMinHeap<T> {
    /// Creates an empty heap accepting ids in `[0, capacity)`.
    pub(crate) fn new(capacity: usize) -> Self {
        IndexedMinHeap {
            heap: Vec::with_capacity(capacity),
            keys: vec![T::infinity(); capacity],
            positions: vec![None; capacity],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    pub(crate) fn contains(&self, id: usize) -> bool {
        self.positions[id].is_some()
    }

    /// Inserts `id` with `key`, or updates the key if `id` is already present.
    pub(crate) fn set(&mut self, id: usize, key: T) {
        match self.positions[id] {
            Some(position) => {
                let old_key = self.keys[id];
                self.keys[id] = key;
                if key < old_key {
                    self.sift_up(position);
                } else {
                    self.sift_down(position);
                }
            }
            None => {
                self.keys[id] = key;
                self.heap.push(id);
                self.positions[id] = Some(self.heap.len() - 1);
                self.sift_up(self.heap.len() - 1);
            }
        }
    }

    pub(crate) fn peek(&self) -> Option<(usize, T)> {
        self.heap.first().map(|&id| (id, self.keys[id]))
    }

    pub(crate) fn pop(&mut self) -> Option<(usize, T)> {
        let (id, key) = self.peek()?;
        self.remove(id);
        Some((id, key))
    }

    pub(crate) fn remove(&mut self, id: usize) -> bool {
        let Some(position) = self.positions[id].take() else {
            return false;
        };
        let last = self.heap.len() - 1;
        self.heap.swap(position, last);
        self.heap.pop();
        if position < self.heap.len() {
            self.positions[self.heap[position]] = Some(position);
            self.sift_down(position);
            self.sift_up(position);
        }
        true
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.keys[self.heap[index]] < self.keys[self.heap[parent]] {
                self.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < len && self.keys[self.heap[left]] < self.keys[self.heap[smallest]] {
                smallest = left;
            }
            if right < len && self.keys[self.heap[right]] < self.keys[self.heap[smallest]] {
                smallest = right;
            }

            if smallest != index {
                self.swap(index, smallest);
                index = smallest;
            } else {
                break;
            }
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.positions[self.heap[a]] = Some(a);
        self.positions[self.heap[b]] = Some(b);
    }
}
