//! Graph algorithms over a [`GraphStore`](crate::graph::GraphStore).
//!
//! Every algorithm borrows the store immutably and returns an owned result
//! that never refers back into it.
//!
//! - Shortest paths: [`bfs_shortest_paths`], [`dijkstra`]
//! - Pathfinders: [`AStar`], [`IdaStar`], [`DijkstraPathfinder`]
//! - Connectivity: [`connected_components`], [`strongly_connected_components`]
//! - Ordering and cycles: [`topological_sort`], [`find_cycle`], [`is_cyclic`]
//! - Spanning: [`minimum_spanning_tree`], [`minimum_spanning_forest`], [`prim`]
//! - Flow: [`max_flow`]

mod components;
mod cycle;
mod flow;
pub mod heuristics;
mod pathfinder;
mod shortest_path;
mod spanning;
mod toposort;

pub use components::{connected_components, strongly_connected_components, ComponentMap};
pub use cycle::{find_cycle, is_cyclic};
pub use flow::{max_flow, MaxFlow};
pub use pathfinder::{AStar, DijkstraPathfinder, Heuristic, IdaStar, Pathfinder};
pub use shortest_path::{bfs_shortest_paths, dijkstra, ShortestPaths};
pub use spanning::{minimum_spanning_forest, minimum_spanning_tree, prim, SpanningTree};
pub use toposort::topological_sort;
