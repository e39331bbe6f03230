//! Graph storage and traversal.
//!
//! - `store`: adjacency-based [`GraphStore`] for directed and undirected graphs
//! - `traversal`: lazy [`Bfs`] / [`Dfs`] iterators
//! - `visit`: event-driven depth-first search
//! - `generators`: point grids and random graphs
//! - `adapt`: importing external network objects

pub mod adapt;
mod config;
pub mod generators;
mod handle;
mod store;
pub mod traversal;
pub mod visit;
mod weight;

pub use config::{EdgeKind, GraphConfig, IdentityPolicy};
pub use handle::{DenseHandle, EdgeId, NodeId};
pub use store::{Direction, EdgeRef, Edges, GraphStore, Neighbors, Nodes};
pub use traversal::{Bfs, Dfs};
pub use visit::{depth_first_search, Control, DfsEvent};
pub use weight::Weight;
