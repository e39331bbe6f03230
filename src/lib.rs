//! # `graph-extras` - Handle-Based Graph Toolkit
//!
//! Compact, single-threaded graph storage plus the algorithms that usually
//! come with it: traversal, shortest paths, heuristic pathfinding,
//! connectivity, topological ordering, spanning trees and maximum flow.
//!
//! ## Guarantees
//!
//! ### Handles
//! - **Dense and typed**: nodes and edges are addressed by [`graph::NodeId`] and
//!   [`graph::EdgeId`], small `u32` indices that cannot be mixed up.
//! - **Never reused**: removing an element retires its handle. A stale handle is
//!   reported as an error instead of silently naming a newer element.
//!
//! ### Consistency
//! - **Atomic mutations**: a failing mutation leaves the store exactly as it was.
//! - **No mutation under analysis**: algorithms borrow the store immutably, so
//!   the borrow checker rules out concurrent modification.
//! - **Owned results**: every algorithm returns a value that never points back
//!   into the store.
//!
//! ## Architecture
//!
//! 1. **Collections** ([`collections`]): the identifier space interning node
//!    identities, bit sets, a union-find and a deterministic min-heap.
//! 2. **Graph** ([`graph`]): [`graph::GraphStore`] configured by
//!    [`graph::GraphConfig`], lazy [`graph::Bfs`]/[`graph::Dfs`] iterators, an
//!    event-driven depth-first search, generators and an import seam.
//! 3. **Algorithms** ([`algorithms`]): everything that consumes a store.
//!
//! ## Logging
//!
//! Enable the `tracing` feature to get `trace!` events for store mutations and
//! `debug!` summaries from the algorithms. Without it, no logging code is compiled.
//!
//! ## Example
//!
//! ```rust
//! use graph_extras::algorithms::dijkstra;
//! use graph_extras::graph::{GraphConfig, GraphStore};
//!
//! let g: GraphStore<&str> = GraphStore::from_edges(
//!     GraphConfig::directed(),
//!     [("A", "B", 1.0), ("B", "C", 2.0), ("A", "C", 5.0)],
//! )?;
//! let (a, c) = (g.node_id("A").unwrap(), g.node_id("C").unwrap());
//!
//! let paths = dijkstra(&g, a)?;
//! assert_eq!(paths.distance(c), Some(3.0));
//! assert_eq!(paths.path_to(c).map(|p| p.len()), Some(3));
//! # Ok::<(), graph_extras::GraphError>(())
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod algorithms;
pub mod collections;
pub mod error;
pub mod graph;

pub use error::{GraphError, GraphResult};
pub use graph::{EdgeId, GraphConfig, GraphStore, NodeId};

// Compile-time assertions for handle layout
const _: () = {
    use core::mem;

    assert!(mem::size_of::<NodeId>() == mem::size_of::<u32>());
    assert!(mem::size_of::<EdgeId>() == mem::size_of::<u32>());
};
