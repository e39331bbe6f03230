//! Topological ordering of directed acyclic graphs.

use crate::collections::MinHeap;
use crate::error::{GraphError, GraphResult};
use crate::graph::{GraphStore, NodeId};

use super::cycle::find_cycle;

/// Kahn's algorithm: repeatedly emits a node with no remaining incoming edges,
/// always the smallest such handle, so the order is unique for a given store.
///
/// Runs to completion.
///
/// # Errors
/// - [`GraphError::DirectedRequired`] for undirected stores,
/// - [`GraphError::CycleDetected`] if the graph has a cycle; the error carries
///   one offending cycle.
///
/// ```rust
/// use graph_extras::algorithms::topological_sort;
/// use graph_extras::graph::{GraphConfig, GraphStore};
/// use graph_extras::GraphError;
///
/// let dag: GraphStore<&str> =
///     GraphStore::from_pairs(GraphConfig::directed(), [("shirt", "tie"), ("socks", "shoes")]).unwrap();
/// let order: Vec<_> = topological_sort(&dag).unwrap();
/// assert_eq!(order.len(), 4);
///
/// let cyclic: GraphStore<u8> =
///     GraphStore::from_pairs(GraphConfig::directed(), [(0, 1), (1, 0)]).unwrap();
/// assert!(matches!(topological_sort(&cyclic), Err(GraphError::CycleDetected { .. })));
/// ```
pub fn topological_sort<N, W>(graph: &GraphStore<N, W>) -> GraphResult<Vec<NodeId>> {
    if !graph.is_directed() {
        return Err(GraphError::DirectedRequired("topological sort"));
    }

    let mut remaining = vec![0usize; graph.node_bound()];
    let mut ready = MinHeap::new();
    for node in graph.nodes() {
        let degree = graph.in_degree(node)?;
        remaining[node.index()] = degree;
        if degree == 0 {
            ready.push(node);
        }
    }

    let mut order = Vec::with_capacity(graph.node_count());
    while let Some(node) = ready.pop() {
        order.push(node);
        for (next, _) in graph.neighbors(node)? {
            let slot = &mut remaining[next.index()];
            *slot -= 1;
            if *slot == 0 {
                ready.push(next);
            }
        }
    }

    if order.len() < graph.node_count() {
        let cycle = find_cycle(graph)?.unwrap_or_default();
        #[cfg(feature = "tracing")]
        tracing::debug!(cycle_len = cycle.len(), "topological sort hit a cycle");
        return Err(GraphError::CycleDetected { cycle });
    }
    #[cfg(feature = "tracing")]
    tracing::debug!(nodes = order.len(), "topological sort done");
    Ok(order)
}
