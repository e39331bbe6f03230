//! Store configuration, fixed at construction.
//!
//! Graph variants (directed or not, weighted or not, self-loops, parallel
//! edges) are a small tagged value rather than separate types; algorithms read
//! it and branch explicitly.

use serde::{Deserialize, Serialize};

/// Edge directionality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Edges go from source to target.
    #[default]
    Directed,
    /// `(u, v)` and `(v, u)` are the same edge.
    Undirected,
}

/// What `add_node` does when the identity is already bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityPolicy {
    /// Fail with [`GraphError::DuplicateNode`](crate::GraphError::DuplicateNode).
    #[default]
    Strict,
    /// Return the existing handle.
    Idempotent,
}

/// Configuration of a [`GraphStore`](crate::graph::GraphStore).
///
/// ```rust
/// use graph_extras::graph::{EdgeKind, GraphConfig};
///
/// let config = GraphConfig::undirected().with_self_loops(true);
/// assert_eq!(config.kind, EdgeKind::Undirected);
/// assert!(config.allows_self_loops);
/// assert!(!config.allows_parallel_edges);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Directed or undirected edges.
    pub kind: EdgeKind,
    /// Whether edges carry explicit weights. Unweighted edges weigh one.
    pub weighted: bool,
    /// Whether an edge may connect a node to itself.
    pub allows_self_loops: bool,
    /// Whether several edges may connect the same ordered (or unordered) pair.
    pub allows_parallel_edges: bool,
    /// Behaviour on duplicate node identities.
    pub node_identity: IdentityPolicy,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            kind: EdgeKind::Directed,
            weighted: true,
            allows_self_loops: false,
            allows_parallel_edges: false,
            node_identity: IdentityPolicy::Strict,
        }
    }
}

impl GraphConfig {
    /// Default configuration for a directed graph.
    pub fn directed() -> Self {
        Self::default()
    }

    /// Default configuration for an undirected graph.
    pub fn undirected() -> Self {
        Self {
            kind: EdgeKind::Undirected,
            ..Self::default()
        }
    }

    /// Sets whether edges carry explicit weights.
    #[must_use]
    pub fn with_weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    /// Sets whether self-loops are allowed.
    #[must_use]
    pub fn with_self_loops(mut self, allow: bool) -> Self {
        self.allows_self_loops = allow;
        self
    }

    /// Sets whether parallel edges are allowed.
    #[must_use]
    pub fn with_parallel_edges(mut self, allow: bool) -> Self {
        self.allows_parallel_edges = allow;
        self
    }

    /// Sets the duplicate-identity policy.
    #[must_use]
    pub fn with_node_identity(mut self, policy: IdentityPolicy) -> Self {
        self.node_identity = policy;
        self
    }

    /// Returns `true` for directed graphs.
    #[inline]
    pub fn is_directed(&self) -> bool {
        self.kind == EdgeKind::Directed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = GraphConfig::directed()
            .with_weighted(false)
            .with_parallel_edges(true)
            .with_node_identity(IdentityPolicy::Idempotent);
        assert!(config.is_directed());
        assert!(!config.weighted);
        assert!(config.allows_parallel_edges);
        assert_eq!(config.node_identity, IdentityPolicy::Idempotent);
    }

    #[test]
    fn test_load_from_json_with_defaults() {
        let config: GraphConfig =
            serde_json::from_str(r#"{ "kind": "undirected", "allows_self_loops": true }"#)
                .unwrap();
        assert_eq!(
            config,
            GraphConfig::undirected().with_self_loops(true),
            "missing fields fall back to defaults"
        );

        let json = serde_json::to_value(GraphConfig::default()).unwrap();
        assert_eq!(json["kind"], "directed");
        assert_eq!(json["node_identity"], "strict");
    }
}
