//! Cycle detection for directed and undirected stores.

use crate::error::GraphResult;
use crate::graph::{depth_first_search, Control, DfsEvent, Direction, GraphStore, NodeId};

/// Returns one cycle of the graph, or `None` if it is acyclic.
///
/// The cycle lists nodes in traversal order; each node has an edge to the next
/// and the last one has an edge back to the first. A self-loop yields a
/// single-node cycle. In undirected stores an edge is not a cycle by itself,
/// but two parallel edges are.
///
/// # Errors
/// Propagates store errors; none occur on a consistent store.
pub fn find_cycle<N, W>(graph: &GraphStore<N, W>) -> GraphResult<Option<Vec<NodeId>>> {
    let mut parent: Vec<Option<NodeId>> = vec![None; graph.node_bound()];

    let outcome = depth_first_search(graph, graph.nodes(), Direction::Outgoing, |event| {
        match event {
            DfsEvent::TreeEdge { source, target, .. } => parent[target.index()] = Some(source),
            DfsEvent::BackEdge { source, target, .. } => {
                let mut cycle = vec![source];
                let mut current = source;
                while current != target {
                    match parent[current.index()] {
                        Some(p) => {
                            cycle.push(p);
                            current = p;
                        }
                        None => break,
                    }
                }
                cycle.reverse();
                return Control::Break(cycle);
            }
            _ => {}
        }
        Control::Continue
    })?;

    let cycle = outcome.break_value();
    #[cfg(feature = "tracing")]
    tracing::debug!(found = cycle.is_some(), "cycle search done");
    Ok(cycle)
}

/// Returns `true` if the graph has a cycle.
///
/// # Errors
/// Propagates store errors; none occur on a consistent store.
pub fn is_cyclic<N, W>(graph: &GraphStore<N, W>) -> GraphResult<bool> {
    Ok(find_cycle(graph)?.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphConfig;

    fn n(i: usize) -> NodeId {
        NodeId::new(i)
    }

    #[test]
    fn test_directed_cycle() {
        let g: GraphStore<char> = GraphStore::from_pairs(
            GraphConfig::directed(),
            [('x', 'a'), ('a', 'b'), ('b', 'c'), ('c', 'a')],
        )
        .unwrap();
        assert_eq!(find_cycle(&g), Ok(Some(vec![n(1), n(2), n(3)])));

        let dag: GraphStore<char> =
            GraphStore::from_pairs(GraphConfig::directed(), [('a', 'b'), ('a', 'c'), ('b', 'c')])
                .unwrap();
        assert_eq!(is_cyclic(&dag), Ok(false));
    }

    #[test]
    fn test_undirected_cycles() {
        let tree: GraphStore<u8> =
            GraphStore::from_pairs(GraphConfig::undirected(), [(0, 1), (1, 2), (1, 3)]).unwrap();
        assert_eq!(is_cyclic(&tree), Ok(false));

        let mut multi: GraphStore<u8> =
            GraphStore::new(GraphConfig::undirected().with_parallel_edges(true));
        let a = multi.add_node(0).unwrap();
        let b = multi.add_node(1).unwrap();
        multi.add_edge(a, b).unwrap();
        assert_eq!(is_cyclic(&multi), Ok(false));
        multi.add_edge(b, a).unwrap();
        assert_eq!(find_cycle(&multi), Ok(Some(vec![a, b])));
    }

    #[test]
    fn test_self_loop() {
        let mut g: GraphStore<u8> =
            GraphStore::new(GraphConfig::directed().with_self_loops(true));
        let a = g.add_node(0).unwrap();
        g.add_edge(a, a).unwrap();
        assert_eq!(find_cycle(&g), Ok(Some(vec![a])));
    }
}
