//! Lazy breadth-first and depth-first traversals.
//!
//! Both iterators yield node handles in visitation order and keep their state
//! (a [`BitSet`] of visited handles and an explicit frontier) on the heap, so
//! traversal depth is bounded by memory rather than the call stack. Dropping an
//! iterator cancels the traversal.

use std::collections::VecDeque;

use crate::collections::BitSet;
use crate::error::{GraphError, GraphResult};
use crate::graph::{Direction, GraphStore, NodeId};

/// Seeds unvisited nodes as new roots in handle order.
#[derive(Debug, Clone)]
struct Restart {
    next: usize,
}

impl Restart {
    fn next_root<N, W>(&mut self, graph: &GraphStore<N, W>, visited: &BitSet) -> Option<NodeId> {
        while self.next < graph.node_bound() {
            let node = NodeId::new(self.next);
            self.next += 1;
            if graph.contains_node(node) && !visited.contains(node.index()) {
                return Some(node);
            }
        }
        None
    }
}

/// Breadth-first traversal.
///
/// ```rust
/// use graph_extras::graph::{Bfs, GraphConfig, GraphStore};
///
/// let g: GraphStore<u32> =
///     GraphStore::from_pairs(GraphConfig::directed(), [(0, 1), (0, 2), (1, 3)]).unwrap();
/// let start = g.node_id(&0u32).unwrap();
/// let order: Vec<_> = Bfs::new(&g, start).unwrap().map(|n| n.index()).collect();
/// assert_eq!(order, vec![0, 1, 2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct Bfs<'a, N, W> {
    graph: &'a GraphStore<N, W>,
    visited: BitSet,
    queue: VecDeque<NodeId>,
    direction: Direction,
    restart: Option<Restart>,
}

impl<'a, N, W> Bfs<'a, N, W> {
    /// Starts a traversal at `source`.
    ///
    /// # Errors
    /// [`GraphError::UnknownNode`] if `source` is not live.
    pub fn new(graph: &'a GraphStore<N, W>, source: NodeId) -> GraphResult<Self> {
        Self::from_sources(graph, [source])
    }

    /// Starts a traversal from several sources, visited in the given order.
    ///
    /// # Errors
    /// [`GraphError::UnknownNode`] for the first source that is not live.
    pub fn from_sources<I>(graph: &'a GraphStore<N, W>, sources: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut bfs = Self::empty(graph);
        for source in sources {
            bfs.push_root(source)?;
        }
        Ok(bfs)
    }

    /// Traverses the whole graph: whenever the frontier empties, the smallest
    /// unvisited node handle becomes the next root.
    pub fn full(graph: &'a GraphStore<N, W>) -> Self {
        let mut bfs = Self::empty(graph);
        bfs.restart = Some(Restart { next: 0 });
        bfs
    }

    fn empty(graph: &'a GraphStore<N, W>) -> Self {
        Self {
            graph,
            visited: BitSet::new(graph.node_bound()),
            queue: VecDeque::new(),
            direction: Direction::Outgoing,
            restart: None,
        }
    }

    /// Follows edges in `direction` instead of the default [`Direction::Outgoing`].
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Adds `root` to the frontier unless it was already visited.
    ///
    /// # Errors
    /// [`GraphError::UnknownNode`] if `root` is not live.
    pub fn push_root(&mut self, root: NodeId) -> GraphResult<()> {
        if !self.graph.contains_node(root) {
            return Err(GraphError::UnknownNode(root));
        }
        if self.visited.insert(root.index()) {
            self.queue.push_back(root);
        }
        Ok(())
    }

    /// Returns `true` if `node` has been discovered.
    #[inline]
    pub fn is_visited(&self, node: NodeId) -> bool {
        self.visited.contains(node.index())
    }

    /// Returns `true` if no discovered node is waiting to be yielded.
    ///
    /// In a [`full`](Self::full) traversal the next node is then a new root.
    #[inline]
    pub fn frontier_is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<N, W> Iterator for Bfs<'_, N, W> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let node = match self.queue.pop_front() {
            Some(node) => node,
            None => {
                let root = self.restart.as_mut()?.next_root(self.graph, &self.visited)?;
                self.visited.insert(root.index());
                root
            }
        };

        if let Ok(neighbors) = self.graph.neighbors_directed(node, self.direction) {
            for (next, _) in neighbors {
                if self.visited.insert(next.index()) {
                    self.queue.push_back(next);
                }
            }
        }
        Some(node)
    }
}

/// Depth-first traversal in pre-order.
///
/// Neighbors are explored in insertion order. Nodes are marked when popped, so
/// the order matches a recursive DFS.
#[derive(Debug, Clone)]
pub struct Dfs<'a, N, W> {
    graph: &'a GraphStore<N, W>,
    visited: BitSet,
    stack: Vec<NodeId>,
    scratch: Vec<NodeId>,
    direction: Direction,
    restart: Option<Restart>,
}

impl<'a, N, W> Dfs<'a, N, W> {
    /// Starts a traversal at `source`.
    ///
    /// # Errors
    /// [`GraphError::UnknownNode`] if `source` is not live.
    pub fn new(graph: &'a GraphStore<N, W>, source: NodeId) -> GraphResult<Self> {
        Self::from_sources(graph, [source])
    }

    /// Starts a traversal from several sources; the first one is explored first.
    ///
    /// # Errors
    /// [`GraphError::UnknownNode`] for the first source that is not live.
    pub fn from_sources<I>(graph: &'a GraphStore<N, W>, sources: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut dfs = Self::empty(graph);
        let sources: Vec<NodeId> = sources.into_iter().collect();
        for &source in sources.iter().rev() {
            dfs.push_root(source)?;
        }
        Ok(dfs)
    }

    /// Traverses the whole graph, restarting from the smallest unvisited node handle.
    pub fn full(graph: &'a GraphStore<N, W>) -> Self {
        let mut dfs = Self::empty(graph);
        dfs.restart = Some(Restart { next: 0 });
        dfs
    }

    fn empty(graph: &'a GraphStore<N, W>) -> Self {
        Self {
            graph,
            visited: BitSet::new(graph.node_bound()),
            stack: Vec::new(),
            scratch: Vec::new(),
            direction: Direction::Outgoing,
            restart: None,
        }
    }

    /// Follows edges in `direction` instead of the default [`Direction::Outgoing`].
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Pushes `root` on top of the stack; it is explored next unless already visited.
    ///
    /// # Errors
    /// [`GraphError::UnknownNode`] if `root` is not live.
    pub fn push_root(&mut self, root: NodeId) -> GraphResult<()> {
        if !self.graph.contains_node(root) {
            return Err(GraphError::UnknownNode(root));
        }
        if !self.visited.contains(root.index()) {
            self.stack.push(root);
        }
        Ok(())
    }

    /// Returns `true` if `node` has been yielded.
    #[inline]
    pub fn is_visited(&self, node: NodeId) -> bool {
        self.visited.contains(node.index())
    }
}

impl<N, W> Iterator for Dfs<'_, N, W> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let node = loop {
            match self.stack.pop() {
                Some(node) if self.visited.insert(node.index()) => break node,
                Some(_) => {}
                None => {
                    let root = self.restart.as_mut()?.next_root(self.graph, &self.visited)?;
                    self.visited.insert(root.index());
                    break root;
                }
            }
        };

        if let Ok(neighbors) = self.graph.neighbors_directed(node, self.direction) {
            self.scratch.clear();
            self.scratch.extend(
                neighbors
                    .map(|(next, _)| next)
                    .filter(|next| !self.visited.contains(next.index())),
            );
            // Reversed so the first neighbor ends on top.
            self.stack.extend(self.scratch.drain(..).rev());
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphConfig;

    fn diamond() -> GraphStore<u32> {
        // 0 -> 1 -> 3, 0 -> 2 -> 3, 3 -> 4; 5 isolated
        let mut g = GraphStore::from_pairs(
            GraphConfig::directed(),
            [(0, 1), (0, 2), (1, 3), (2, 3), (3, 4)],
        )
        .unwrap();
        g.add_node(5).unwrap();
        g
    }

    fn ids(order: impl Iterator<Item = NodeId>) -> Vec<usize> {
        order.map(NodeId::index).collect()
    }

    #[test]
    fn test_bfs_order() {
        let g = diamond();
        let bfs = Bfs::new(&g, NodeId::new(0)).unwrap();
        assert_eq!(ids(bfs), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_dfs_preorder() {
        let g = diamond();
        let dfs = Dfs::new(&g, NodeId::new(0)).unwrap();
        assert_eq!(ids(dfs), vec![0, 1, 3, 4, 2]);
    }

    #[test]
    fn test_full_traversal_restarts_in_handle_order() {
        let g = diamond();
        assert_eq!(ids(Bfs::full(&g)), vec![0, 1, 2, 3, 4, 5]);

        let dfs = Dfs::from_sources(&g, [NodeId::new(2)]).unwrap();
        assert_eq!(ids(dfs), vec![2, 3, 4]);
        let mut dfs = Dfs::full(&g);
        dfs.push_root(NodeId::new(2)).unwrap();
        assert_eq!(ids(dfs), vec![2, 3, 4, 0, 1, 5]);
    }

    #[test]
    fn test_incoming_direction() {
        let g = diamond();
        let bfs = Bfs::new(&g, NodeId::new(4))
            .unwrap()
            .with_direction(Direction::Incoming);
        assert_eq!(ids(bfs), vec![4, 3, 1, 2, 0]);
    }

    #[test]
    fn test_unknown_source() {
        let g = diamond();
        assert_eq!(
            Bfs::new(&g, NodeId::new(42)).err().map(|e| e.to_string()),
            Some("unknown node n42".to_string())
        );
        assert!(Dfs::new(&g, NodeId::new(42)).is_err());
    }

    #[test]
    fn test_early_stop() {
        let g = diamond();
        let mut bfs = Bfs::new(&g, NodeId::new(0)).unwrap();
        assert_eq!(bfs.next(), Some(NodeId::new(0)));
        assert!(bfs.is_visited(NodeId::new(2)));
        assert!(!bfs.is_visited(NodeId::new(4)));
    }
}
