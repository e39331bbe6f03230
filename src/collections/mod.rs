//! Primitive-array-backed collections used by the graph store and algorithms.
//!
//! - `interner`: identity ⇄ dense handle mapping
//! - `bit_set`: word-packed visited sets
//! - `disjoint_set`: union-find for Kruskal and friends
//! - `binary_heap`: deterministic min-heap for priority-driven searches

pub mod binary_heap;
pub mod bit_set;
pub mod disjoint_set;
pub mod interner;

pub use binary_heap::{MinHeap, Scored};
pub use bit_set::BitSet;
pub use disjoint_set::DisjointSet;
pub use interner::IdentifierSpace;
