//! `MinHeap`: a priority queue implemented with a binary heap.
//!
//! The top element is always the *smallest*, which is what every
//! shortest-path and spanning algorithm in this crate wants. Ties are broken by
//! the element's own `Ord`, so pop order is fully deterministic.

use core::cmp::Ordering;

/// A binary min-heap backed by a `Vec`.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    data: Vec<T>,
}

impl<T: Ord> MinHeap<T> {
    /// Creates an empty binary heap.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Creates an empty binary heap with a specific capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of elements in the heap.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Pushes an item onto the heap.
    pub fn push(&mut self, item: T) {
        self.data.push(item);
        self.sift_up(self.data.len() - 1);
    }

    /// Pops the smallest item from the heap.
    pub fn pop(&mut self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }
        let last_idx = self.data.len() - 1;
        self.data.swap(0, last_idx);
        let item = self.data.pop()?;
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        Some(item)
    }

    /// Returns a reference to the smallest item.
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Clears the heap.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    fn sift_up(&mut self, mut node: usize) {
        while node > 0 {
            let parent = (node - 1) / 2;
            if self.data[node] < self.data[parent] {
                self.data.swap(parent, node);
                node = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut node: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * node + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut smaller = left;
            if right < len && self.data[right] < self.data[left] {
                smaller = right;
            }

            if self.data[smaller] < self.data[node] {
                self.data.swap(node, smaller);
                node = smaller;
            } else {
                break;
            }
        }
    }
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for MinHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::new();
        for item in iter {
            heap.push(item);
        }
        heap
    }
}

/// A heap entry ordered by `score`, then by `item`.
///
/// `score` only needs `PartialOrd`, so floating-point weights work;
/// incomparable scores (NaN) compare equal and fall through to `item`.
#[derive(Debug, Clone, Copy)]
pub struct Scored<K, T> {
    /// Priority; smaller pops first.
    pub score: K,
    /// Payload and tie-breaker.
    pub item: T,
}

impl<K: PartialOrd, T: Ord> PartialEq for Scored<K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: PartialOrd, T: Ord> Eq for Scored<K, T> {}

impl<K: PartialOrd, T: Ord> PartialOrd for Scored<K, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: PartialOrd, T: Ord> Ord for Scored<K, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .partial_cmp(&other.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.item.cmp(&other.item))
    }
}
