//! Single-source shortest paths.
//!
//! Both algorithms return a [`ShortestPaths`] whose domain is exactly the set of
//! nodes reachable from the source; unreachable nodes are absent rather than
//! assigned an infinite distance.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::collections::{BitSet, MinHeap, Scored};
use crate::error::{GraphError, GraphResult};
use crate::graph::{EdgeId, GraphStore, NodeId, Weight};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Reached<W> {
    distance: W,
    /// Previous node and the edge used to get here; `None` for the source.
    via: Option<(NodeId, EdgeId)>,
}

/// Distances and one predecessor per reachable node.
///
/// Owned and detached from the store: it stays valid after the store is
/// mutated or dropped, and handles never change meaning because removed
/// handles are retired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortestPaths<W> {
    source: NodeId,
    entries: Vec<Option<Reached<W>>>,
    reached: usize,
}

impl<W: Copy> ShortestPaths<W> {
    fn new(source: NodeId, bound: usize, zero: W) -> Self {
        let mut entries = vec![None; bound];
        entries[source.index()] = Some(Reached {
            distance: zero,
            via: None,
        });
        Self {
            source,
            entries,
            reached: 1,
        }
    }

    fn entry(&self, node: NodeId) -> Option<&Reached<W>> {
        self.entries.get(node.index()).and_then(Option::as_ref)
    }

    fn set(&mut self, node: NodeId, distance: W, via: (NodeId, EdgeId)) {
        let slot = &mut self.entries[node.index()];
        if slot.is_none() {
            self.reached += 1;
        }
        *slot = Some(Reached {
            distance,
            via: Some(via),
        });
    }

    /// The node the paths start from.
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Returns `true` if `node` is reachable from the source.
    pub fn contains(&self, node: NodeId) -> bool {
        self.entry(node).is_some()
    }

    /// Distance from the source, or `None` if `node` is unreachable.
    pub fn distance(&self, node: NodeId) -> Option<W> {
        self.entry(node).map(|r| r.distance)
    }

    /// Previous node on a shortest path to `node`, with the edge taken.
    ///
    /// `None` for the source and for unreachable nodes.
    pub fn predecessor(&self, node: NodeId) -> Option<(NodeId, EdgeId)> {
        self.entry(node).and_then(|r| r.via)
    }

    /// Nodes of a shortest path from the source to `target`, both included.
    pub fn path_to(&self, target: NodeId) -> Option<Vec<NodeId>> {
        self.entry(target)?;
        let mut path = vec![target];
        let mut current = target;
        while let Some((prev, _)) = self.predecessor(current) {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        Some(path)
    }

    /// Edges of a shortest path from the source to `target`; empty for the source itself.
    pub fn edges_to(&self, target: NodeId) -> Option<Vec<EdgeId>> {
        self.entry(target)?;
        let mut edges = Vec::new();
        let mut current = target;
        while let Some((prev, edge)) = self.predecessor(current) {
            edges.push(edge);
            current = prev;
        }
        edges.reverse();
        Some(edges)
    }

    /// Reachable nodes and their distances, in handle order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, W)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|r| (NodeId::new(i), r.distance)))
    }

    /// Number of reachable nodes, the source included.
    pub fn len(&self) -> usize {
        self.reached
    }

    /// Always `false`: the source reaches itself.
    pub fn is_empty(&self) -> bool {
        self.reached == 0
    }
}

/// Edge-count distances from `source`, following outgoing edges.
///
/// When several shortest paths exist, the predecessor is the one discovered
/// first in neighbor insertion order. Weights are ignored.
///
/// # Errors
/// [`GraphError::UnknownNode`] if `source` is not live.
pub fn bfs_shortest_paths<N, W>(
    graph: &GraphStore<N, W>,
    source: NodeId,
) -> GraphResult<ShortestPaths<usize>> {
    if !graph.contains_node(source) {
        return Err(GraphError::UnknownNode(source));
    }
    #[cfg(feature = "tracing")]
    tracing::debug!(source = %source, nodes = graph.node_count(), "bfs shortest paths");

    let mut paths = ShortestPaths::new(source, graph.node_bound(), 0usize);
    let mut queue = VecDeque::from([(source, 0usize)]);
    while let Some((node, depth)) = queue.pop_front() {
        for (next, edge) in graph.neighbors(node)? {
            if !paths.contains(next) {
                paths.set(next, depth + 1, (node, edge));
                queue.push_back((next, depth + 1));
            }
        }
    }
    Ok(paths)
}

/// Returns the first edge with a negative (or NaN) weight.
pub(crate) fn first_negative<N, W: Weight>(graph: &GraphStore<N, W>) -> Option<EdgeId> {
    graph
        .edges()
        .find(|edge| !edge.weight.is_non_negative())
        .map(|edge| edge.id)
}

/// Weighted distances from `source` with Dijkstra's algorithm.
///
/// Among entries of equal tentative distance the smallest node handle is
/// settled first. A distance is only replaced by a strictly smaller one, so the
/// first-found predecessor wins ties. Runs to completion; there is no
/// mid-run cancellation.
///
/// # Errors
/// - [`GraphError::UnknownNode`] if `source` is not live,
/// - [`GraphError::NegativeWeight`] if any edge weight is negative or NaN.
///   Checked over the whole store before the search starts.
///
/// ```rust
/// use graph_extras::algorithms::dijkstra;
/// use graph_extras::graph::{GraphConfig, GraphStore};
///
/// let g: GraphStore<&str> = GraphStore::from_edges(
///     GraphConfig::directed(),
///     [("a", "b", 1.0), ("b", "c", 1.0), ("a", "c", 5.0)],
/// )
/// .unwrap();
/// let (a, b, c) = (g.node_id("a").unwrap(), g.node_id("b").unwrap(), g.node_id("c").unwrap());
///
/// let paths = dijkstra(&g, a).unwrap();
/// assert_eq!(paths.distance(c), Some(2.0));
/// assert_eq!(paths.path_to(c), Some(vec![a, b, c]));
/// ```
pub fn dijkstra<N, W: Weight>(
    graph: &GraphStore<N, W>,
    source: NodeId,
) -> GraphResult<ShortestPaths<W>> {
    if !graph.contains_node(source) {
        return Err(GraphError::UnknownNode(source));
    }
    if let Some(edge) = first_negative(graph) {
        return Err(GraphError::NegativeWeight(edge));
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(source = %source, nodes = graph.node_count(), "dijkstra");

    let mut paths = ShortestPaths::new(source, graph.node_bound(), W::zero());
    let mut settled = BitSet::new(graph.node_bound());
    let mut heap = MinHeap::new();
    heap.push(Scored {
        score: W::zero(),
        item: source,
    });

    while let Some(Scored { score, item: node }) = heap.pop() {
        if !settled.insert(node.index()) {
            continue;
        }
        for (next, edge) in graph.neighbors(node)? {
            if settled.contains(next.index()) {
                continue;
            }
            let candidate = score + graph.edge_weight(edge)?;
            let improves = paths.distance(next).map_or(true, |d| candidate < d);
            if improves {
                paths.set(next, candidate, (node, edge));
                heap.push(Scored {
                    score: candidate,
                    item: next,
                });
            }
        }
    }
    Ok(paths)
}
