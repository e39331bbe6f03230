//! Neighbor and edge iterators over a [`GraphStore`](super::GraphStore).

use core::slice;

use serde::{Deserialize, Serialize};

use super::{EdgeRecord, Incidence};
use crate::graph::{EdgeId, NodeId};

/// Which incident edges a neighbor query follows.
///
/// Undirected stores ignore the direction: every incident edge is followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Follow edges from source to target.
    #[default]
    Outgoing,
    /// Follow edges from target back to source.
    Incoming,
    /// Follow edges both ways.
    Both,
}

/// An edge of the store, copied out of the edge table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeRef<W> {
    /// Edge handle.
    pub id: EdgeId,
    /// First endpoint (tail for directed edges).
    pub source: NodeId,
    /// Second endpoint (head for directed edges).
    pub target: NodeId,
    /// Edge weight; one for unweighted stores.
    pub weight: W,
}

impl<W> EdgeRef<W> {
    /// Returns the endpoint opposite `node`.
    #[inline]
    pub fn other(&self, node: NodeId) -> NodeId {
        if self.source == node {
            self.target
        } else {
            self.source
        }
    }
}

/// Lazy sequence of `(neighbor, edge)` pairs around one node.
///
/// Yields in edge insertion order. The iterator is `Clone`, so a sequence can be
/// restarted by cloning it before consumption.
#[derive(Debug)]
pub struct Neighbors<'a, W> {
    pub(super) node: NodeId,
    pub(super) edges: &'a [Option<EdgeRecord<W>>],
    pub(super) first: slice::Iter<'a, EdgeId>,
    pub(super) second: slice::Iter<'a, EdgeId>,
}

impl<W> Clone for Neighbors<'_, W> {
    fn clone(&self) -> Self {
        Self {
            node: self.node,
            edges: self.edges,
            first: self.first.clone(),
            second: self.second.clone(),
        }
    }
}

impl<W> Iterator for Neighbors<'_, W> {
    type Item = (NodeId, EdgeId);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let edge = *self.first.next().or_else(|| self.second.next())?;
            if let Some(Some(record)) = self.edges.get(edge.index()) {
                return Some((record.other(self.node), edge));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.first.len() + self.second.len()))
    }
}

/// Iterator over live edges in handle order.
#[derive(Debug, Clone)]
pub struct Edges<'a, W> {
    pub(super) inner: core::iter::Enumerate<slice::Iter<'a, Option<EdgeRecord<W>>>>,
}

impl<W: Copy> Iterator for Edges<'_, W> {
    type Item = EdgeRef<W>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .find_map(|(i, slot)| slot.as_ref().map(|record| record.to_ref(EdgeId::new(i))))
    }
}

/// Iterator over live nodes in handle order.
#[derive(Debug, Clone)]
pub struct Nodes<'a> {
    pub(super) inner: core::iter::Enumerate<slice::Iter<'a, Option<Incidence>>>,
}

impl Iterator for Nodes<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .find_map(|(i, slot)| slot.as_ref().map(|_| NodeId::new(i)))
    }
}
