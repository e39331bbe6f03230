//! Importing graphs from external network objects.
//!
//! A [`NetworkView`] exposes just enough of a foreign graph (node identities,
//! edge identities and their endpoints) for [`from_network`] to rebuild it as a
//! [`GraphStore`].

use std::hash::Hash;

use crate::collections::IdentifierSpace;
use crate::error::{GraphError, GraphResult};
use crate::graph::{EdgeId, GraphConfig, GraphStore, Weight};

/// Read-only view of an external network with identified nodes and edges.
pub trait NetworkView {
    /// Node identity type.
    type Node;
    /// Edge identity type.
    type Edge;

    /// Returns `true` if edges have a direction.
    fn is_directed(&self) -> bool;

    /// Returns `true` if an edge may join a node to itself.
    fn allows_self_loops(&self) -> bool {
        false
    }

    /// Returns `true` if two edges may join the same pair of nodes.
    fn allows_parallel_edges(&self) -> bool {
        false
    }

    /// Every node, each reported once.
    fn nodes(&self) -> Box<dyn Iterator<Item = Self::Node> + '_>;

    /// Every edge with its endpoints, each reported once.
    fn edges(&self) -> Box<dyn Iterator<Item = (Self::Edge, Self::Node, Self::Node)> + '_>;
}

/// Store built from a network, plus the edge identities keyed by store edge handle.
pub type Imported<N, E, W> = (GraphStore<N, W>, IdentifierSpace<E, EdgeId>);

/// Rebuilds `network` as a weighted store, weighting each edge with `weight_fn`.
///
/// The store copies the network's direction, self-loop and parallel-edge
/// settings. Nodes are added in the network's order, then edges; endpoints
/// that [`NetworkView::nodes`] did not report are added on first sight. The
/// returned identifier space hands out, for each network edge, exactly the
/// handle the store assigned to it.
///
/// # Errors
/// - [`GraphError::DuplicateNode`] if a node is reported twice,
/// - [`GraphError::SelfLoopNotAllowed`] if an edge is a self-loop the network does not allow,
/// - [`GraphError::InvalidArgument`] if an edge identity is reported twice, or the
///   network reports parallel edges while claiming not to allow them.
///
/// ```rust
/// use graph_extras::graph::adapt::{from_network, NetworkView};
///
/// struct Roads(Vec<(&'static str, &'static str, &'static str, f64)>);
///
/// impl NetworkView for Roads {
///     type Node = &'static str;
///     type Edge = &'static str;
///
///     fn is_directed(&self) -> bool {
///         false
///     }
///     fn nodes(&self) -> Box<dyn Iterator<Item = &'static str> + '_> {
///         Box::new(std::iter::empty())
///     }
///     fn edges(&self) -> Box<dyn Iterator<Item = (&'static str, &'static str, &'static str)> + '_> {
///         Box::new(self.0.iter().map(|&(name, a, b, _)| (name, a, b)))
///     }
/// }
///
/// let roads = Roads(vec![("A1", "London", "Leeds", 195.0), ("M62", "Leeds", "Hull", 59.0)]);
/// let lengths: std::collections::HashMap<_, _> =
///     roads.0.iter().map(|&(name, .., km)| (name, km)).collect();
/// let (graph, edges) = from_network(&roads, |name| lengths[name]).unwrap();
///
/// let m62 = edges.lookup("M62").unwrap();
/// assert_eq!(graph.edge_weight(m62), Ok(59.0));
/// ```
pub fn from_network<V, W, F>(
    network: &V,
    mut weight_fn: F,
) -> GraphResult<Imported<V::Node, V::Edge, W>>
where
    V: NetworkView + ?Sized,
    V::Node: Hash + Eq,
    V::Edge: Hash + Eq,
    W: Weight,
    F: FnMut(&V::Edge) -> W,
{
    let base = if network.is_directed() {
        GraphConfig::directed()
    } else {
        GraphConfig::undirected()
    };
    let config = base
        .with_self_loops(network.allows_self_loops())
        .with_parallel_edges(network.allows_parallel_edges());

    let mut graph = GraphStore::new(config);
    for node in network.nodes() {
        graph.add_node(node)?;
    }

    let mut edges: IdentifierSpace<V::Edge, EdgeId> = IdentifierSpace::new();
    for (edge, u, v) in network.edges() {
        if edges.lookup(&edge).is_some() {
            return Err(GraphError::InvalidArgument(
                "network reports the same edge twice".into(),
            ));
        }
        let weight = weight_fn(&edge);
        let u = graph.ensure_node(u);
        let v = graph.ensure_node(v);
        let id = graph.add_weighted_edge(u, v, weight)?;
        if id.index() != edges.bound() {
            return Err(GraphError::InvalidArgument(format!(
                "network reports parallel edges between {u} and {v} but does not allow them"
            )));
        }
        edges.intern_for(edge);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "network imported"
    );
    debug_assert!(graph.validate_invariants());
    Ok((graph, edges))
}
