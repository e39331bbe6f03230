//! Event-driven depth-first search.
//!
//! [`depth_first_search`] walks the graph with an explicit stack and reports
//! every discovery, edge classification and finish to a visitor closure. The
//! visitor steers the walk through [`Control`]. Cycle detection, topological
//! checks and reachability queries are all built on it.

use crate::collections::BitSet;
use crate::error::{GraphError, GraphResult};
use crate::graph::{Direction, EdgeId, GraphStore, Neighbors, NodeId};

/// Steers a traversal from inside a visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control<B> {
    /// Keep going.
    Continue,
    /// On `Discover`: do not explore the node's edges. On `TreeEdge`: do not
    /// follow the edge. Ignored for other events.
    Prune,
    /// Stop the traversal and return the value.
    Break(B),
}

impl<B> Control<B> {
    /// Returns the break value, if any.
    pub fn break_value(self) -> Option<B> {
        match self {
            Control::Break(b) => Some(b),
            _ => None,
        }
    }
}

/// An event reported by [`depth_first_search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DfsEvent {
    /// A node is seen for the first time.
    Discover(NodeId),
    /// `target` is discovered through `edge`.
    TreeEdge {
        /// Discovered node's parent.
        source: NodeId,
        /// Undiscovered node.
        target: NodeId,
        /// Edge followed.
        edge: EdgeId,
    },
    /// The edge leads to a node that is still on the DFS stack; it closes a cycle.
    BackEdge {
        /// Node being explored.
        source: NodeId,
        /// Ancestor (or the node itself for a self-loop).
        target: NodeId,
        /// Edge found.
        edge: EdgeId,
    },
    /// The edge leads to a finished node. Only reported for directed traversals.
    CrossForwardEdge {
        /// Node being explored.
        source: NodeId,
        /// Finished node.
        target: NodeId,
        /// Edge found.
        edge: EdgeId,
    },
    /// Every edge of the node has been explored.
    Finish(NodeId),
}

struct Frame<'a, W> {
    node: NodeId,
    neighbors: Neighbors<'a, W>,
    /// Edge this node was discovered through.
    via: Option<EdgeId>,
}

/// Runs a depth-first search from each source in turn, skipping sources
/// already reached from an earlier one.
///
/// In undirected traversals (an undirected store, or [`Direction::Both`]) the
/// edge a node was discovered through is not reported again as a back edge,
/// and edges to finished descendants are not reported at all, so every edge is
/// classified exactly once.
///
/// Returns `Control::Break(b)` if the visitor broke, `Control::Continue` otherwise.
///
/// # Errors
/// [`GraphError::UnknownNode`] if a source is not live; checked before the walk starts.
///
/// ```rust
/// use graph_extras::graph::{depth_first_search, Control, DfsEvent, Direction, GraphConfig, GraphStore};
///
/// let g: GraphStore<u32> =
///     GraphStore::from_pairs(GraphConfig::directed(), [(0, 1), (1, 2), (2, 0)]).unwrap();
/// let start = g.node_id(&0u32).unwrap();
/// let closing = depth_first_search(&g, [start], Direction::Outgoing, |event| match event {
///     DfsEvent::BackEdge { edge, .. } => Control::Break(edge),
///     _ => Control::Continue,
/// })
/// .unwrap();
/// assert_eq!(closing.break_value().map(|e| e.index()), Some(2));
/// ```
pub fn depth_first_search<N, W, I, F, B>(
    graph: &GraphStore<N, W>,
    sources: I,
    direction: Direction,
    mut visitor: F,
) -> GraphResult<Control<B>>
where
    I: IntoIterator<Item = NodeId>,
    F: FnMut(DfsEvent) -> Control<B>,
{
    let sources: Vec<NodeId> = sources.into_iter().collect();
    if let Some(&missing) = sources.iter().find(|&&s| !graph.contains_node(s)) {
        return Err(GraphError::UnknownNode(missing));
    }

    let undirected = !graph.is_directed() || direction == Direction::Both;
    let mut discovered = BitSet::new(graph.node_bound());
    let mut finished = BitSet::new(graph.node_bound());
    let mut stack: Vec<Frame<'_, W>> = Vec::new();

    macro_rules! emit {
        ($event:expr) => {
            if let Control::Break(b) = visitor($event) {
                return Ok(Control::Break(b));
            }
        };
    }

    // Marks `node` discovered and either opens a frame or finishes it at once.
    macro_rules! discover {
        ($node:expr, $via:expr) => {{
            let node = $node;
            discovered.insert(node.index());
            match visitor(DfsEvent::Discover(node)) {
                Control::Break(b) => return Ok(Control::Break(b)),
                Control::Prune => {
                    finished.insert(node.index());
                    emit!(DfsEvent::Finish(node));
                }
                Control::Continue => stack.push(Frame {
                    node,
                    neighbors: graph.neighbors_directed(node, direction)?,
                    via: $via,
                }),
            }
        }};
    }

    for source in sources {
        if discovered.contains(source.index()) {
            continue;
        }
        discover!(source, None);

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            let via = frame.via;
            let Some((next, edge)) = frame.neighbors.next() else {
                stack.pop();
                finished.insert(node.index());
                emit!(DfsEvent::Finish(node));
                continue;
            };

            if undirected && via == Some(edge) {
                continue;
            }
            if !discovered.contains(next.index()) {
                match visitor(DfsEvent::TreeEdge {
                    source: node,
                    target: next,
                    edge,
                }) {
                    Control::Break(b) => return Ok(Control::Break(b)),
                    Control::Prune => continue,
                    Control::Continue => discover!(next, Some(edge)),
                }
            } else if !finished.contains(next.index()) {
                emit!(DfsEvent::BackEdge {
                    source: node,
                    target: next,
                    edge,
                });
            } else if !undirected {
                emit!(DfsEvent::CrossForwardEdge {
                    source: node,
                    target: next,
                    edge,
                });
            }
        }
    }

    Ok(Control::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphConfig;

    fn record<N, W>(graph: &GraphStore<N, W>, sources: &[usize]) -> Vec<DfsEvent> {
        let mut events = Vec::new();
        let sources = sources.iter().map(|&s| NodeId::new(s));
        let outcome = depth_first_search(graph, sources, Direction::Outgoing, |event| {
            events.push(event);
            Control::<()>::Continue
        })
        .unwrap();
        assert_eq!(outcome, Control::Continue);
        events
    }

    fn n(i: usize) -> NodeId {
        NodeId::new(i)
    }

    fn e(i: usize) -> EdgeId {
        EdgeId::new(i)
    }

    #[test]
    fn test_directed_edge_classification() {
        // e0: 0->1, e1: 1->2, e2: 2->0, e3: 0->2
        let g: GraphStore<u32> = GraphStore::from_pairs(
            GraphConfig::directed(),
            [(0, 1), (1, 2), (2, 0), (0, 2)],
        )
        .unwrap();

        let events = record(&g, &[0]);
        assert_eq!(
            events,
            vec![
                DfsEvent::Discover(n(0)),
                DfsEvent::TreeEdge { source: n(0), target: n(1), edge: e(0) },
                DfsEvent::Discover(n(1)),
                DfsEvent::TreeEdge { source: n(1), target: n(2), edge: e(1) },
                DfsEvent::Discover(n(2)),
                DfsEvent::BackEdge { source: n(2), target: n(0), edge: e(2) },
                DfsEvent::Finish(n(2)),
                DfsEvent::Finish(n(1)),
                DfsEvent::CrossForwardEdge { source: n(0), target: n(2), edge: e(3) },
                DfsEvent::Finish(n(0)),
            ]
        );
    }

    #[test]
    fn test_undirected_parent_edge_is_not_a_back_edge() {
        let g: GraphStore<u32> =
            GraphStore::from_pairs(GraphConfig::undirected(), [(0, 1), (1, 2)]).unwrap();
        let events = record(&g, &[0]);
        assert!(events
            .iter()
            .all(|ev| !matches!(ev, DfsEvent::BackEdge { .. } | DfsEvent::CrossForwardEdge { .. })));
        // Three discoveries, two tree edges, three finishes
        assert_eq!(events.len(), 8);

        let triangle: GraphStore<u32> =
            GraphStore::from_pairs(GraphConfig::undirected(), [(0, 1), (1, 2), (2, 0)]).unwrap();
        let back_edges = record(&triangle, &[0])
            .into_iter()
            .filter(|ev| matches!(ev, DfsEvent::BackEdge { .. }))
            .count();
        assert_eq!(back_edges, 1);
    }

    #[test]
    fn test_prune_and_break() {
        let g: GraphStore<u32> =
            GraphStore::from_pairs(GraphConfig::directed(), [(0, 1), (1, 2), (0, 3)]).unwrap();

        let mut seen = Vec::new();
        depth_first_search(&g, [n(0)], Direction::Outgoing, |event| {
            if let DfsEvent::Discover(node) = event {
                seen.push(node);
                if node == n(1) {
                    return Control::<()>::Prune;
                }
            }
            Control::Continue
        })
        .unwrap();
        assert_eq!(seen, vec![n(0), n(1), n(3)]);

        let found = depth_first_search(&g, [n(0)], Direction::Outgoing, |event| match event {
            DfsEvent::Discover(node) if node == n(2) => Control::Break(node),
            _ => Control::Continue,
        })
        .unwrap();
        assert_eq!(found, Control::Break(n(2)));
    }

    #[test]
    fn test_multiple_sources_and_unknown_source() {
        let g: GraphStore<u32> =
            GraphStore::from_pairs(GraphConfig::directed(), [(0, 1), (2, 1)]).unwrap();
        let discovered: Vec<_> = record(&g, &[0, 2, 1])
            .into_iter()
            .filter_map(|ev| match ev {
                DfsEvent::Discover(node) => Some(node.index()),
                _ => None,
            })
            .collect();
        assert_eq!(discovered, vec![0, 1, 2]);

        let result = depth_first_search(&g, [n(9)], Direction::Outgoing, |_| Control::<()>::Continue);
        assert_eq!(result, Err(GraphError::UnknownNode(n(9))));
    }
}
