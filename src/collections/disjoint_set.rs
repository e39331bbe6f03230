//! Disjoint Set (Union-Find).
//!
//! # Performance
//!
//! - Parent and rank arrays are plain `Vec`s indexed by element id.
//! - Path compression and union-by-rank give nearly constant time operations.

/// A Disjoint Set (Union-Find) data structure over `0..len`.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    /// Parent pointers.
    parent: Vec<usize>,
    /// Rank (depth upper bound) for union-by-rank.
    rank: Vec<u8>,
    /// Number of disjoint sets.
    sets: usize,
}

impl DisjointSet {
    /// Creates `len` singleton sets.
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
            sets: len,
        }
    }

    /// Finds the representative of the set containing `id`, with path compression.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    pub fn find(&mut self, id: usize) -> usize {
        // Two-pass approach for path compression:
        // 1. Find root
        let mut root = id;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        // 2. Compress path
        let mut curr = id;
        while curr != root {
            let next = self.parent[curr];
            self.parent[curr] = root;
            curr = next;
        }

        root
    }

    /// Unites the sets containing `a` and `b`.
    /// Returns `true` if they were in different sets, `false` otherwise.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root1 = self.find(a);
        let root2 = self.find(b);

        if root1 == root2 {
            return false;
        }

        match self.rank[root1].cmp(&self.rank[root2]) {
            std::cmp::Ordering::Less => self.parent[root1] = root2,
            std::cmp::Ordering::Greater => self.parent[root2] = root1,
            std::cmp::Ordering::Equal => {
                self.parent[root2] = root1;
                self.rank[root1] = self.rank[root1].saturating_add(1);
            }
        }

        self.sets -= 1;
        true
    }

    /// Returns `true` if `a` and `b` are in the same set.
    pub fn equiv(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Number of disjoint sets.
    pub fn set_count(&self) -> usize {
        self.sets
    }

    /// Returns the number of elements in the disjoint set.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns true if empty.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disjoint_set() {
        let mut ds = DisjointSet::new(3);
        let (a, b, c) = (0, 1, 2);

        assert_eq!(ds.find(a), a);
        assert_eq!(ds.find(b), b);
        assert_eq!(ds.set_count(), 3);

        assert!(ds.union(a, b));
        assert!(ds.equiv(a, b));
        assert!(!ds.equiv(a, c));

        assert!(ds.union(b, c));
        assert_eq!(ds.find(a), ds.find(c));

        // Already united
        assert!(!ds.union(a, c));
        assert_eq!(ds.set_count(), 1);
    }

    #[test]
    fn test_long_chain_compresses() {
        let mut ds = DisjointSet::new(1000);
        for i in 0..999 {
            ds.union(i, i + 1);
        }
        let root = ds.find(0);
        for i in 0..1000 {
            assert_eq!(ds.find(i), root);
        }
        assert_eq!(ds.set_count(), 1);
    }
}
