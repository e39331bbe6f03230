//! Connected and strongly connected components.

use serde::{Deserialize, Serialize};

use crate::collections::BitSet;
use crate::error::GraphResult;
use crate::graph::{Bfs, Direction, GraphStore, Neighbors, NodeId};

/// Partition of the live nodes into components.
///
/// Each component is labelled by its smallest node handle, so two runs on the
/// same store produce identical maps regardless of discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentMap {
    /// Indexed by node handle; `None` for retired handles.
    labels: Vec<Option<NodeId>>,
    count: usize,
}

impl ComponentMap {
    fn from_labels(labels: Vec<Option<NodeId>>) -> Self {
        let count = labels
            .iter()
            .enumerate()
            .filter(|&(i, label)| label.is_some_and(|l| l.index() == i))
            .count();
        Self { labels, count }
    }

    /// Label of the component containing `node`: its smallest member.
    ///
    /// `None` if `node` was not live when the map was computed.
    pub fn component_of(&self, node: NodeId) -> Option<NodeId> {
        self.labels.get(node.index()).copied().flatten()
    }

    /// Returns `true` if both nodes lie in the same component.
    pub fn same_component(&self, a: NodeId, b: NodeId) -> bool {
        match (self.component_of(a), self.component_of(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// Number of components.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Components as member lists, ordered by label; members in handle order.
    pub fn components(&self) -> Vec<Vec<NodeId>> {
        let mut slot_of = vec![usize::MAX; self.labels.len()];
        let mut groups: Vec<Vec<NodeId>> = Vec::with_capacity(self.count);
        for (i, label) in self.labels.iter().enumerate() {
            let Some(label) = label else { continue };
            let slot = &mut slot_of[label.index()];
            if *slot == usize::MAX {
                *slot = groups.len();
                groups.push(Vec::new());
            }
            groups[*slot].push(NodeId::new(i));
        }
        groups
    }
}

/// Connected components in a single traversal pass.
///
/// Directed stores are treated as undirected, giving weakly connected
/// components. Runs to completion.
///
/// ```rust
/// use graph_extras::algorithms::connected_components;
/// use graph_extras::graph::{GraphConfig, GraphStore};
///
/// let mut g: GraphStore<char> =
///     GraphStore::from_pairs(GraphConfig::undirected(), [('a', 'b'), ('b', 'c')]).unwrap();
/// g.add_node('d').unwrap();
///
/// let components = connected_components(&g);
/// assert_eq!(components.count(), 2);
/// ```
#[allow(clippy::while_let_on_iterator)]
pub fn connected_components<N, W>(graph: &GraphStore<N, W>) -> ComponentMap {
    let mut labels = vec![None; graph.node_bound()];
    let mut label = None;
    let mut bfs = Bfs::full(graph).with_direction(Direction::Both);
    let mut frontier_was_empty = true;

    // Handle-order restarts mean every new root is the smallest node of its component.
    while let Some(node) = bfs.next() {
        if frontier_was_empty {
            label = Some(node);
        }
        labels[node.index()] = label;
        frontier_was_empty = bfs.frontier_is_empty();
    }
    let components = ComponentMap::from_labels(labels);
    #[cfg(feature = "tracing")]
    tracing::debug!(components = components.count(), "connected components done");
    components
}

struct TarjanFrame<'a, W> {
    node: NodeId,
    neighbors: Neighbors<'a, W>,
}

/// Strongly connected components with an iterative Tarjan search.
///
/// On undirected stores this equals [`connected_components`]. Components are
/// labelled by their smallest member; the labels of an unchanged component are
/// stable, but nothing is promised across mutations. Runs to completion.
///
/// # Errors
/// Propagates store errors; none occur on a consistent store.
pub fn strongly_connected_components<N, W>(graph: &GraphStore<N, W>) -> GraphResult<ComponentMap> {
    if !graph.is_directed() {
        return Ok(connected_components(graph));
    }

    let bound = graph.node_bound();
    let mut index: Vec<Option<usize>> = vec![None; bound];
    let mut lowlink = vec![0usize; bound];
    let mut on_stack = BitSet::new(bound);
    let mut component_stack: Vec<NodeId> = Vec::new();
    let mut labels: Vec<Option<NodeId>> = vec![None; bound];
    let mut counter = 0usize;

    for root in graph.nodes() {
        if index[root.index()].is_some() {
            continue;
        }

        let mut frames = Vec::new();
        index[root.index()] = Some(counter);
        lowlink[root.index()] = counter;
        counter += 1;
        component_stack.push(root);
        on_stack.insert(root.index());
        frames.push(TarjanFrame {
            node: root,
            neighbors: graph.neighbors(root)?,
        });

        while let Some(frame) = frames.last_mut() {
            let node = frame.node;
            if let Some((next, _)) = frame.neighbors.next() {
                match index[next.index()] {
                    None => {
                        index[next.index()] = Some(counter);
                        lowlink[next.index()] = counter;
                        counter += 1;
                        component_stack.push(next);
                        on_stack.insert(next.index());
                        frames.push(TarjanFrame {
                            node: next,
                            neighbors: graph.neighbors(next)?,
                        });
                    }
                    Some(next_index) if on_stack.contains(next.index()) => {
                        lowlink[node.index()] = lowlink[node.index()].min(next_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            frames.pop();
            if let Some(parent) = frames.last() {
                let parent = parent.node.index();
                lowlink[parent] = lowlink[parent].min(lowlink[node.index()]);
            }

            if Some(lowlink[node.index()]) == index[node.index()] {
                let start = component_stack
                    .iter()
                    .rposition(|&n| n == node)
                    .unwrap_or(0);
                let members = component_stack.split_off(start);
                let label = members.iter().copied().min();
                for member in members {
                    on_stack.remove(member.index());
                    labels[member.index()] = label;
                }
            }
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(nodes = graph.node_count(), "strongly connected components done");
    Ok(ComponentMap::from_labels(labels))
}
