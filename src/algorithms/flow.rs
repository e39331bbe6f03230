//! Maximum flow with Edmonds-Karp.
//!
//! Edge weights are capacities. Flow runs along edge direction only; a reverse
//! edge, if present, is a separate edge with its own capacity.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::collections::BitSet;
use crate::error::{GraphError, GraphResult};
use crate::graph::{Direction, EdgeId, GraphStore, NodeId, Weight};

/// A maximum flow and a matching minimum cut.
///
/// The per-edge assignment respects every capacity and conserves flow at every
/// node except the source and the sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxFlow<W> {
    value: W,
    /// Indexed by edge handle; `None` for retired handles.
    flows: Vec<Option<W>>,
    source_side: Vec<NodeId>,
    cut: Vec<EdgeId>,
}

impl<W: Copy> MaxFlow<W> {
    /// Total flow leaving the source.
    pub fn value(&self) -> W {
        self.value
    }

    /// Flow carried by `edge`, or `None` if the edge was not live.
    pub fn flow(&self, edge: EdgeId) -> Option<W> {
        self.flows.get(edge.index()).copied().flatten()
    }

    /// Flow of every live edge, in handle order.
    pub fn flows(&self) -> impl Iterator<Item = (EdgeId, W)> + '_ {
        self.flows
            .iter()
            .enumerate()
            .filter_map(|(i, f)| f.map(|f| (EdgeId::new(i), f)))
    }

    /// Nodes reachable from the source in the final residual graph, in handle order.
    pub fn source_side(&self) -> &[NodeId] {
        &self.source_side
    }

    /// Saturated edges from the source side to the sink side.
    ///
    /// Their capacities sum to [`value`](Self::value).
    pub fn min_cut(&self) -> &[EdgeId] {
        &self.cut
    }
}

/// Residual search state shared by the augmenting and cut phases.
struct Residual<'a, N, W> {
    graph: &'a GraphStore<N, W>,
    flows: Vec<W>,
}

impl<N, W: Weight> Residual<'_, N, W> {
    /// Capacity left on `edge` when crossed from `from`, or `None` for self-loops.
    fn room(&self, edge: EdgeId, from: NodeId) -> GraphResult<Option<(W, bool)>> {
        let (source, target) = self.graph.edge_endpoints(edge)?;
        if source == target {
            return Ok(None);
        }
        let flow = self.flows[edge.index()];
        Ok(Some(if source == from {
            (self.graph.edge_weight(edge)? - flow, true)
        } else {
            (flow, false)
        }))
    }

    /// BFS over edges with room left. Returns, per node, the edge it was reached through.
    fn search(
        &self,
        source: NodeId,
        stop_at: Option<NodeId>,
    ) -> GraphResult<(BitSet, Vec<Option<EdgeId>>)> {
        let bound = self.graph.node_bound();
        let mut seen = BitSet::new(bound);
        let mut via: Vec<Option<EdgeId>> = vec![None; bound];
        let mut queue = VecDeque::from([source]);
        seen.insert(source.index());

        while let Some(node) = queue.pop_front() {
            for (next, edge) in self.graph.neighbors_directed(node, Direction::Both)? {
                if seen.contains(next.index()) {
                    continue;
                }
                let Some((room, _)) = self.room(edge, node)? else {
                    continue;
                };
                if room > W::zero() {
                    seen.insert(next.index());
                    via[next.index()] = Some(edge);
                    if Some(next) == stop_at {
                        return Ok((seen, via));
                    }
                    queue.push_back(next);
                }
            }
        }
        Ok((seen, via))
    }
}

/// Maximum flow from `source` to `sink` on a directed store.
///
/// Augments along shortest residual paths (Edmonds-Karp), which bounds the
/// number of augmentations by `O(V E)` for any capacity type. Runs to
/// completion.
///
/// # Errors
/// - [`GraphError::DirectedRequired`] for undirected stores,
/// - [`GraphError::UnknownNode`] if `source` or `sink` is not live,
/// - [`GraphError::InvalidArgument`] if `source == sink`,
/// - [`GraphError::NegativeCapacity`] if any capacity is negative or NaN.
///
/// ```rust
/// use graph_extras::algorithms::max_flow;
/// use graph_extras::graph::{GraphConfig, GraphStore};
///
/// let g: GraphStore<char, u32> = GraphStore::from_edges(
///     GraphConfig::directed(),
///     [('s', 'a', 3), ('s', 'b', 2), ('a', 'b', 1), ('a', 't', 2), ('b', 't', 3)],
/// )
/// .unwrap();
/// let (s, t) = (g.node_id(&'s').unwrap(), g.node_id(&'t').unwrap());
/// assert_eq!(max_flow(&g, s, t).unwrap().value(), 5);
/// ```
pub fn max_flow<N, W: Weight>(
    graph: &GraphStore<N, W>,
    source: NodeId,
    sink: NodeId,
) -> GraphResult<MaxFlow<W>> {
    if !graph.is_directed() {
        return Err(GraphError::DirectedRequired("maximum flow"));
    }
    for node in [source, sink] {
        if !graph.contains_node(node) {
            return Err(GraphError::UnknownNode(node));
        }
    }
    if source == sink {
        return Err(GraphError::InvalidArgument(format!(
            "flow source and sink are the same node ({source})"
        )));
    }
    if let Some(edge) = graph.edges().find(|e| !e.weight.is_non_negative()) {
        return Err(GraphError::NegativeCapacity(edge.id));
    }

    let mut residual = Residual {
        graph,
        flows: vec![W::zero(); graph.edge_bound()],
    };
    let mut value = W::zero();
    #[cfg(feature = "tracing")]
    let mut augmentations = 0usize;

    loop {
        let (seen, via) = residual.search(source, Some(sink))?;
        if !seen.contains(sink.index()) {
            break;
        }

        // Walk back once for the bottleneck, once more to push it.
        let mut path = Vec::new();
        let mut bottleneck: Option<W> = None;
        let mut node = sink;
        while node != source {
            let Some(edge) = via[node.index()] else { break };
            let (from, to) = graph.edge_endpoints(edge)?;
            let prev = if to == node { from } else { to };
            if let Some((room, forward)) = residual.room(edge, prev)? {
                bottleneck = Some(bottleneck.map_or(room, |b| if room < b { room } else { b }));
                path.push((edge, forward));
            }
            node = prev;
        }
        let Some(bottleneck) = bottleneck else { break };

        for (edge, forward) in path {
            let slot = &mut residual.flows[edge.index()];
            *slot = if forward { *slot + bottleneck } else { *slot - bottleneck };
        }
        value = value + bottleneck;
        #[cfg(feature = "tracing")]
        {
            augmentations += 1;
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(augmentations, "max flow done");

    let (source_side, _) = residual.search(source, None)?;
    let cut = graph
        .edges()
        .filter(|e| source_side.contains(e.source.index()) && !source_side.contains(e.target.index()))
        .map(|e| e.id)
        .collect();
    let flows = (0..graph.edge_bound())
        .map(|i| {
            let edge = EdgeId::new(i);
            graph.contains_edge(edge).then_some(residual.flows[i])
        })
        .collect();

    Ok(MaxFlow {
        value,
        flows,
        source_side: source_side.ones().map(NodeId::new).collect(),
        cut,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphConfig;

    /// The classic CLRS network; maximum flow 23.
    fn clrs() -> GraphStore<&'static str, u32> {
        GraphStore::from_edges(
            GraphConfig::directed(),
            [
                ("s", "v1", 16),
                ("s", "v2", 13),
                ("v2", "v1", 4),
                ("v1", "v3", 12),
                ("v3", "v2", 9),
                ("v2", "v4", 14),
                ("v4", "v3", 7),
                ("v3", "t", 20),
                ("v4", "t", 4),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_max_flow_value_and_conservation() {
        let g = clrs();
        let s = g.node_id("s").unwrap();
        let t = g.node_id("t").unwrap();
        let flow = max_flow(&g, s, t).unwrap();
        assert_eq!(flow.value(), 23);

        let mut balance = vec![0i64; g.node_bound()];
        for (edge, f) in flow.flows() {
            let e = g.edge(edge).unwrap();
            assert!(f <= e.weight);
            balance[e.source.index()] -= i64::from(f);
            balance[e.target.index()] += i64::from(f);
        }
        for node in g.nodes() {
            if node != s && node != t {
                assert_eq!(balance[node.index()], 0, "conservation at {node}");
            }
        }
        assert_eq!(balance[t.index()], 23);
    }

    #[test]
    fn test_min_cut_matches_value() {
        let g = clrs();
        let s = g.node_id("s").unwrap();
        let t = g.node_id("t").unwrap();
        let flow = max_flow(&g, s, t).unwrap();

        let capacity: u32 = flow
            .min_cut()
            .iter()
            .map(|&e| g.edge_weight(e).unwrap())
            .sum();
        assert_eq!(capacity, flow.value());
        assert!(flow.source_side().contains(&s));
        assert!(!flow.source_side().contains(&t));
    }

    #[test]
    fn test_flow_preconditions() {
        let g = clrs();
        let s = g.node_id("s").unwrap();
        assert!(matches!(max_flow(&g, s, s), Err(GraphError::InvalidArgument(_))));

        let neg: GraphStore<u8, i32> =
            GraphStore::from_edges(GraphConfig::directed(), [(0, 1, 3), (1, 2, -2)]).unwrap();
        assert_eq!(
            max_flow(&neg, NodeId::new(0), NodeId::new(2)),
            Err(GraphError::NegativeCapacity(EdgeId::new(1)))
        );

        let undirected: GraphStore<u8> =
            GraphStore::from_pairs(GraphConfig::undirected(), [(0, 1)]).unwrap();
        assert_eq!(
            max_flow(&undirected, NodeId::new(0), NodeId::new(1)),
            Err(GraphError::DirectedRequired("maximum flow"))
        );
    }

    #[test]
    fn test_unreachable_sink_has_zero_flow() {
        let mut g: GraphStore<u8> =
            GraphStore::from_edges(GraphConfig::directed(), [(0, 1, 2.5)]).unwrap();
        let t = g.add_node(9).unwrap();
        let flow = max_flow(&g, NodeId::new(0), t).unwrap();
        assert_eq!(flow.value(), 0.0);
        assert_eq!(flow.flow(EdgeId::new(0)), Some(0.0));
        assert!(flow.min_cut().is_empty());
    }
}
