//! Error types for graph storage and algorithms.
//!
//! Every failure is a local precondition violation reported at the point it
//! happens. Nothing is retried and a failing mutation leaves the store exactly
//! as it was before the call.

use thiserror::Error;

use crate::graph::{EdgeId, NodeId};

/// All errors that can occur in `graph-extras`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A node handle does not refer to a live node of the store.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// An edge handle does not refer to a live edge of the store.
    #[error("unknown edge {0}")]
    UnknownEdge(EdgeId),

    /// A raw handle was never allocated by an identifier space, or has been released.
    #[error("unknown handle {0}")]
    UnknownHandle(usize),

    /// The identity is already bound to a live node.
    #[error("identity already bound to node {0}")]
    DuplicateNode(NodeId),

    /// An algorithm requiring non-negative weights found a negative (or NaN) weight.
    #[error("edge {0} has a negative weight")]
    NegativeWeight(EdgeId),

    /// A flow algorithm found a negative (or NaN) capacity.
    #[error("edge {0} has a negative capacity")]
    NegativeCapacity(EdgeId),

    /// The graph contains a cycle; `cycle` lists its nodes in traversal order.
    #[error("cycle detected through {} node(s)", cycle.len())]
    CycleDetected {
        /// Nodes of one offending cycle, each linked to the next (and the last to the first).
        cycle: Vec<NodeId>,
    },

    /// The graph has more than one connected component.
    #[error("graph is disconnected ({components} components)")]
    DisconnectedGraph {
        /// Number of connected components found.
        components: usize,
    },

    /// The store was configured without self-loops.
    #[error("self-loops are not allowed (node {0})")]
    SelfLoopNotAllowed(NodeId),

    /// An explicit weight was supplied to an unweighted store.
    #[error("store is unweighted; edge weights cannot be set")]
    UnweightedGraph,

    /// The algorithm is only defined for directed graphs.
    #[error("{0} requires a directed graph")]
    DirectedRequired(&'static str),

    /// The algorithm is only defined for undirected graphs.
    #[error("{0} requires an undirected graph")]
    UndirectedRequired(&'static str),

    /// An argument is outside the accepted range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
