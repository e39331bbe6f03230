//! Minimum spanning trees and forests of undirected graphs.
//!
//! Negative weights are allowed. Self-loops never join a tree; among parallel
//! edges the lighter one (then the smaller handle) is preferred.

use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::collections::{BitSet, DisjointSet, MinHeap, Scored};
use crate::error::{GraphError, GraphResult};
use crate::graph::{EdgeId, EdgeRef, GraphStore, NodeId, Weight};

/// Edges of a minimum spanning tree or forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanningTree<W> {
    edges: Vec<EdgeId>,
    total_weight: W,
    components: usize,
}

impl<W: Copy> SpanningTree<W> {
    /// Chosen edges, in the order they were added.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Sum of the chosen edges' weights.
    pub fn total_weight(&self) -> W {
        self.total_weight
    }

    /// Number of trees in the forest; `1` for a spanning tree of a connected graph.
    pub fn component_count(&self) -> usize {
        self.components
    }

    /// Number of chosen edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if no edge was chosen.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns `true` if `edge` belongs to the tree.
    pub fn contains(&self, edge: EdgeId) -> bool {
        self.edges.contains(&edge)
    }
}

fn by_weight_then_handle<W: Weight>(a: &EdgeRef<W>, b: &EdgeRef<W>) -> Ordering {
    a.weight
        .partial_cmp(&b.weight)
        .unwrap_or(Ordering::Equal)
        .then(a.id.cmp(&b.id))
}

/// Kruskal's algorithm over the whole graph.
///
/// Edges are processed by increasing `(weight, edge handle)`, so the result is
/// unique for a given store. One tree is produced per connected component.
/// Runs to completion.
///
/// # Errors
/// [`GraphError::UndirectedRequired`] for directed stores.
pub fn minimum_spanning_forest<N, W: Weight>(
    graph: &GraphStore<N, W>,
) -> GraphResult<SpanningTree<W>> {
    if graph.is_directed() {
        return Err(GraphError::UndirectedRequired("minimum spanning tree"));
    }

    let mut candidates: Vec<EdgeRef<W>> = graph.edges().collect();
    candidates.sort_by(by_weight_then_handle);

    let mut sets = DisjointSet::new(graph.node_bound());
    let mut edges = Vec::with_capacity(graph.node_count().saturating_sub(1));
    let mut total_weight = W::zero();
    for edge in candidates {
        if sets.union(edge.source.index(), edge.target.index()) {
            edges.push(edge.id);
            total_weight = total_weight + edge.weight;
        }
    }

    let components = graph.node_count() - edges.len();
    #[cfg(feature = "tracing")]
    tracing::debug!(edges = edges.len(), components, "spanning forest built");
    Ok(SpanningTree {
        edges,
        total_weight,
        components,
    })
}

/// Kruskal's algorithm, requiring a connected graph.
///
/// Use [`minimum_spanning_forest`] to accept disconnected graphs.
///
/// # Errors
/// - [`GraphError::UndirectedRequired`] for directed stores,
/// - [`GraphError::DisconnectedGraph`] if the graph has more than one component.
///
/// ```rust
/// use graph_extras::algorithms::minimum_spanning_tree;
/// use graph_extras::graph::{GraphConfig, GraphStore};
///
/// let g: GraphStore<char> = GraphStore::from_edges(
///     GraphConfig::undirected(),
///     [('a', 'b', 1.0), ('b', 'c', 1.0), ('c', 'a', 1.0)],
/// )
/// .unwrap();
/// let tree = minimum_spanning_tree(&g).unwrap();
/// assert_eq!(tree.len(), 2);
/// assert_eq!(tree.total_weight(), 2.0);
/// ```
pub fn minimum_spanning_tree<N, W: Weight>(
    graph: &GraphStore<N, W>,
) -> GraphResult<SpanningTree<W>> {
    let forest = minimum_spanning_forest(graph)?;
    if forest.components > 1 {
        return Err(GraphError::DisconnectedGraph {
            components: forest.components,
        });
    }
    Ok(forest)
}

/// Prim's algorithm: grows a minimum spanning tree of the component containing `root`.
///
/// Ties are broken by edge handle. Runs to completion.
///
/// # Errors
/// - [`GraphError::UndirectedRequired`] for directed stores,
/// - [`GraphError::UnknownNode`] if `root` is not live.
pub fn prim<N, W: Weight>(graph: &GraphStore<N, W>, root: NodeId) -> GraphResult<SpanningTree<W>> {
    if graph.is_directed() {
        return Err(GraphError::UndirectedRequired("minimum spanning tree"));
    }
    if !graph.contains_node(root) {
        return Err(GraphError::UnknownNode(root));
    }

    let mut in_tree = BitSet::new(graph.node_bound());
    let mut frontier = MinHeap::new();
    let mut edges = Vec::new();
    let mut total_weight = W::zero();

    in_tree.insert(root.index());
    for (next, edge) in graph.neighbors(root)? {
        frontier.push(Scored {
            score: graph.edge_weight(edge)?,
            item: (edge, next),
        });
    }

    while let Some(Scored {
        score,
        item: (edge, node),
    }) = frontier.pop()
    {
        if !in_tree.insert(node.index()) {
            continue;
        }
        edges.push(edge);
        total_weight = total_weight + score;
        for (next, edge) in graph.neighbors(node)? {
            if !in_tree.contains(next.index()) {
                frontier.push(Scored {
                    score: graph.edge_weight(edge)?,
                    item: (edge, next),
                });
            }
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(root = %root, edges = edges.len(), "prim tree built");
    Ok(SpanningTree {
        edges,
        total_weight,
        components: 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphConfig;

    fn e(i: usize) -> EdgeId {
        EdgeId::new(i)
    }

    fn sample() -> GraphStore<char> {
        // e0 a-b 4, e1 a-c 1, e2 b-c 2, e3 b-d 5, e4 c-d 8, e5 d-e 3, e6 c-e 3
        GraphStore::from_edges(
            GraphConfig::undirected(),
            [
                ('a', 'b', 4.0),
                ('a', 'c', 1.0),
                ('b', 'c', 2.0),
                ('b', 'd', 5.0),
                ('c', 'd', 8.0),
                ('d', 'e', 3.0),
                ('c', 'e', 3.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_kruskal_order_and_weight() {
        let tree = minimum_spanning_tree(&sample()).unwrap();
        assert_eq!(tree.edges(), &[e(1), e(2), e(5), e(6)]);
        assert_eq!(tree.total_weight(), 9.0);
        assert_eq!(tree.component_count(), 1);
    }

    #[test]
    fn test_prim_matches_kruskal_weight() {
        let g = sample();
        let a = g.node_id(&'a').unwrap();
        let tree = prim(&g, a).unwrap();
        assert_eq!(tree.total_weight(), 9.0);
        assert_eq!(tree.len(), 4);
        assert!(tree.contains(e(1)) && tree.contains(e(2)));
    }

    #[test]
    fn test_disconnected_policy() {
        let mut g = sample();
        g.add_node('z').unwrap();
        g.add_node('y').unwrap();

        assert_eq!(
            minimum_spanning_tree(&g),
            Err(GraphError::DisconnectedGraph { components: 3 })
        );
        let forest = minimum_spanning_forest(&g).unwrap();
        assert_eq!(forest.component_count(), 3);
        assert_eq!(forest.len(), 4);
    }

    #[test]
    fn test_negative_weights_and_directed() {
        let g: GraphStore<u8, i64> = GraphStore::from_edges(
            GraphConfig::undirected(),
            [(0, 1, -3), (1, 2, 4), (0, 2, -1)],
        )
        .unwrap();
        assert_eq!(minimum_spanning_tree(&g).unwrap().total_weight(), -4);

        let d: GraphStore<u8> = GraphStore::from_pairs(GraphConfig::directed(), [(0, 1)]).unwrap();
        assert_eq!(
            minimum_spanning_tree(&d),
            Err(GraphError::UndirectedRequired("minimum spanning tree"))
        );
    }
}
