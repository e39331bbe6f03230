//! Adjacency-based graph storage.
//!
//! Nodes and edges live in dense tables indexed by their handles. Each live
//! node owns its incident edge handles in insertion order: an outgoing and an
//! incoming list for directed stores, a single incidence list for undirected
//! stores (a self-loop is recorded once).
//!
//! # Handle policy
//! Removing a node or edge leaves a tombstone in its table; the handle is
//! retired and never issued again. Results computed before a removal keep
//! meaning exactly what they meant, and a stale handle is reported as
//! [`GraphError::UnknownNode`] / [`GraphError::UnknownEdge`] rather than
//! silently aliasing a newer element.
//!
//! # Concurrency
//! The store is not synchronized. Mutation takes `&mut self` and every
//! algorithm takes `&GraphStore`, so the borrow checker rules out mutation
//! while an algorithm runs.

mod iter;

use std::hash::Hash;

use crate::collections::IdentifierSpace;
use crate::error::{GraphError, GraphResult};
use crate::graph::{EdgeId, EdgeKind, GraphConfig, IdentityPolicy, NodeId, Weight};

pub use iter::{Direction, EdgeRef, Edges, Neighbors, Nodes};

/// Incident edges of one live node.
#[derive(Debug, Clone, Default)]
pub(crate) struct Incidence {
    /// Outgoing edges; all incident edges for undirected stores.
    outgoing: Vec<EdgeId>,
    /// Incoming edges; unused for undirected stores.
    incoming: Vec<EdgeId>,
}

/// One slot of the edge table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EdgeRecord<W> {
    source: NodeId,
    target: NodeId,
    weight: W,
}

impl<W: Copy> EdgeRecord<W> {
    #[inline]
    fn to_ref(&self, id: EdgeId) -> EdgeRef<W> {
        EdgeRef {
            id,
            source: self.source,
            target: self.target,
            weight: self.weight,
        }
    }
}

impl<W> EdgeRecord<W> {
    #[inline]
    fn other(&self, node: NodeId) -> NodeId {
        if self.source == node {
            self.target
        } else {
            self.source
        }
    }
}

/// A directed or undirected graph over dense handles.
///
/// `N` is the client identity type of nodes, `W` the edge weight type.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `add_node` | \(O(1)\) amortized | Interns the identity |
/// | `add_edge` | \(O(1)\) amortized | \(O(\deg u)\) when parallel edges are disallowed |
/// | `remove_edge` | \(O(\deg u + \deg v)\) | Unlinks from both incidence lists |
/// | `remove_node` | \(O(\sum \deg)\) | Over the node and its neighbors |
/// | `neighbors` | \(O(1)\) to create | Lazy, insertion order |
/// | `degree` | \(O(\deg)\) | Counts undirected self-loops twice |
/// | `node_count` / `edge_count` | \(O(1)\) | |
///
/// ```rust
/// use graph_extras::graph::{GraphConfig, GraphStore};
///
/// let mut g: GraphStore<&str> = GraphStore::new(GraphConfig::directed());
/// let a = g.add_node("a").unwrap();
/// let b = g.add_node("b").unwrap();
/// let e = g.add_weighted_edge(a, b, 2.5).unwrap();
///
/// assert_eq!(g.neighbors(a).unwrap().collect::<Vec<_>>(), vec![(b, e)]);
/// assert_eq!(g.edge_weight(e), Ok(2.5));
/// ```
#[derive(Debug, Clone)]
pub struct GraphStore<N, W = f64> {
    config: GraphConfig,
    nodes: IdentifierSpace<N, NodeId>,
    /// Indexed by node handle; `None` marks a retired node.
    incidence: Vec<Option<Incidence>>,
    /// Indexed by edge handle; `None` marks a retired edge.
    edges: Vec<Option<EdgeRecord<W>>>,
    edge_count: usize,
}

impl<N, W> GraphStore<N, W> {
    /// Creates an empty store.
    pub fn new(config: GraphConfig) -> Self {
        Self::with_capacity(config, 0, 0)
    }

    /// Creates an empty store with room for `nodes` nodes and `edges` edges.
    pub fn with_capacity(config: GraphConfig, nodes: usize, edges: usize) -> Self {
        Self {
            config,
            nodes: IdentifierSpace::with_capacity(nodes),
            incidence: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
            edge_count: 0,
        }
    }

    /// Returns the store configuration.
    #[inline]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Returns `true` for directed stores.
    #[inline]
    pub fn is_directed(&self) -> bool {
        self.config.is_directed()
    }

    /// Number of live nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of live edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Upper bound (exclusive) of every node handle issued so far.
    ///
    /// Algorithms size their dense per-node arrays with this.
    #[inline]
    pub fn node_bound(&self) -> usize {
        self.incidence.len()
    }

    /// Upper bound (exclusive) of every edge handle issued so far.
    #[inline]
    pub fn edge_bound(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if `node` is live.
    #[inline]
    pub fn contains_node(&self, node: NodeId) -> bool {
        matches!(self.incidence.get(node.index()), Some(Some(_)))
    }

    /// Returns `true` if `edge` is live.
    #[inline]
    pub fn contains_edge(&self, edge: EdgeId) -> bool {
        matches!(self.edges.get(edge.index()), Some(Some(_)))
    }

    /// Live node handles in increasing order.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            inner: self.incidence.iter().enumerate(),
        }
    }

    /// Live edges in increasing handle order.
    pub fn edges(&self) -> Edges<'_, W> {
        Edges {
            inner: self.edges.iter().enumerate(),
        }
    }

    fn incidence(&self, node: NodeId) -> GraphResult<&Incidence> {
        match self.incidence.get(node.index()) {
            Some(Some(incidence)) => Ok(incidence),
            _ => Err(GraphError::UnknownNode(node)),
        }
    }

    fn record(&self, edge: EdgeId) -> GraphResult<&EdgeRecord<W>> {
        match self.edges.get(edge.index()) {
            Some(Some(record)) => Ok(record),
            _ => Err(GraphError::UnknownEdge(edge)),
        }
    }

    /// Lazy `(neighbor, edge)` sequence following outgoing edges.
    ///
    /// For undirected stores every incident edge is followed.
    ///
    /// # Errors
    /// [`GraphError::UnknownNode`] if `node` is not live.
    pub fn neighbors(&self, node: NodeId) -> GraphResult<Neighbors<'_, W>> {
        self.neighbors_directed(node, Direction::Outgoing)
    }

    /// Lazy `(neighbor, edge)` sequence following `direction`.
    ///
    /// With [`Direction::Both`] on a directed store, outgoing edges come first,
    /// then incoming ones; a directed self-loop therefore appears twice.
    ///
    /// # Errors
    /// [`GraphError::UnknownNode`] if `node` is not live.
    pub fn neighbors_directed(
        &self,
        node: NodeId,
        direction: Direction,
    ) -> GraphResult<Neighbors<'_, W>> {
        let incidence = self.incidence(node)?;
        let empty: &[EdgeId] = &[];
        let (first, second) = match (self.config.kind, direction) {
            (EdgeKind::Undirected, _) | (EdgeKind::Directed, Direction::Outgoing) => {
                (incidence.outgoing.as_slice(), empty)
            }
            (EdgeKind::Directed, Direction::Incoming) => (incidence.incoming.as_slice(), empty),
            (EdgeKind::Directed, Direction::Both) => {
                (incidence.outgoing.as_slice(), incidence.incoming.as_slice())
            }
        };
        Ok(Neighbors {
            node,
            edges: &self.edges,
            first: first.iter(),
            second: second.iter(),
        })
    }

    /// Total degree of `node`.
    ///
    /// Directed: in-degree plus out-degree. Undirected: number of incident
    /// edges, with self-loops counted twice.
    ///
    /// # Errors
    /// [`GraphError::UnknownNode`] if `node` is not live.
    pub fn degree(&self, node: NodeId) -> GraphResult<usize> {
        let incidence = self.incidence(node)?;
        Ok(match self.config.kind {
            EdgeKind::Directed => incidence.outgoing.len() + incidence.incoming.len(),
            EdgeKind::Undirected => {
                let loops = incidence
                    .outgoing
                    .iter()
                    .filter(|e| {
                        self.edges[e.index()]
                            .as_ref()
                            .is_some_and(|r| r.source == r.target)
                    })
                    .count();
                incidence.outgoing.len() + loops
            }
        })
    }

    /// Number of outgoing edges (incident edges for undirected stores).
    ///
    /// # Errors
    /// [`GraphError::UnknownNode`] if `node` is not live.
    pub fn out_degree(&self, node: NodeId) -> GraphResult<usize> {
        Ok(self.incidence(node)?.outgoing.len())
    }

    /// Number of incoming edges (incident edges for undirected stores).
    ///
    /// # Errors
    /// [`GraphError::UnknownNode`] if `node` is not live.
    pub fn in_degree(&self, node: NodeId) -> GraphResult<usize> {
        let incidence = self.incidence(node)?;
        Ok(match self.config.kind {
            EdgeKind::Directed => incidence.incoming.len(),
            EdgeKind::Undirected => incidence.outgoing.len(),
        })
    }

    /// Returns the first edge (in insertion order) from `u` to `v`.
    ///
    /// Undirected stores treat `(u, v)` and `(v, u)` alike. Unknown nodes have no edges.
    pub fn edge_connecting(&self, u: NodeId, v: NodeId) -> Option<EdgeId> {
        let directed = self.is_directed();
        let incidence = self.incidence(u).ok()?;
        incidence.outgoing.iter().copied().find(|e| {
            self.edges[e.index()].as_ref().is_some_and(|r| {
                (r.source == u && r.target == v) || (!directed && r.source == v && r.target == u)
            })
        })
    }

    /// Returns the identity of `node`; `None` for anonymous nodes.
    ///
    /// # Errors
    /// [`GraphError::UnknownNode`] if `node` is not live.
    pub fn identity(&self, node: NodeId) -> GraphResult<Option<&N>> {
        self.nodes
            .identity_for(node)
            .map_err(|_| GraphError::UnknownNode(node))
    }

    /// Live `(node, identity)` pairs in handle order; anonymous nodes are skipped.
    pub fn identities(&self) -> impl Iterator<Item = (NodeId, &N)> + '_ {
        self.nodes.iter()
    }
}

impl<N, W: Weight> GraphStore<N, W> {
    /// Returns a copy of `edge`.
    ///
    /// # Errors
    /// [`GraphError::UnknownEdge`] if `edge` is not live.
    pub fn edge(&self, edge: EdgeId) -> GraphResult<EdgeRef<W>> {
        Ok(self.record(edge)?.to_ref(edge))
    }

    /// Returns the endpoints `(source, target)` of `edge`.
    ///
    /// # Errors
    /// [`GraphError::UnknownEdge`] if `edge` is not live.
    pub fn edge_endpoints(&self, edge: EdgeId) -> GraphResult<(NodeId, NodeId)> {
        let record = self.record(edge)?;
        Ok((record.source, record.target))
    }

    /// Returns the weight of `edge`; one for unweighted stores.
    ///
    /// # Errors
    /// [`GraphError::UnknownEdge`] if `edge` is not live.
    pub fn edge_weight(&self, edge: EdgeId) -> GraphResult<W> {
        Ok(self.record(edge)?.weight)
    }

    /// Replaces the weight of `edge`, returning the previous one.
    ///
    /// # Errors
    /// [`GraphError::UnweightedGraph`] for unweighted stores,
    /// [`GraphError::UnknownEdge`] if `edge` is not live.
    pub fn set_edge_weight(&mut self, edge: EdgeId, weight: W) -> GraphResult<W> {
        if !self.config.weighted {
            return Err(GraphError::UnweightedGraph);
        }
        match self.edges.get_mut(edge.index()) {
            Some(Some(record)) => Ok(std::mem::replace(&mut record.weight, weight)),
            _ => Err(GraphError::UnknownEdge(edge)),
        }
    }

    /// Adds an edge of weight one.
    ///
    /// # Errors
    /// See [`add_weighted_edge`](Self::add_weighted_edge); never fails with
    /// [`GraphError::UnweightedGraph`].
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> GraphResult<EdgeId> {
        self.insert_edge(u, v, W::one())
    }

    /// Adds an edge `u -> v` (or `u - v`) carrying `weight`.
    ///
    /// If parallel edges are disallowed and the pair is already connected, the
    /// existing edge takes the new weight and its handle is returned.
    ///
    /// # Errors
    /// - [`GraphError::UnknownNode`] if either endpoint is not live,
    /// - [`GraphError::SelfLoopNotAllowed`] if `u == v` and self-loops are disabled,
    /// - [`GraphError::UnweightedGraph`] for unweighted stores.
    ///
    /// On error the store is unchanged.
    pub fn add_weighted_edge(&mut self, u: NodeId, v: NodeId, weight: W) -> GraphResult<EdgeId> {
        if !self.config.weighted {
            return Err(GraphError::UnweightedGraph);
        }
        self.insert_edge(u, v, weight)
    }

    fn insert_edge(&mut self, u: NodeId, v: NodeId, weight: W) -> GraphResult<EdgeId> {
        self.incidence(u)?;
        self.incidence(v)?;
        if u == v && !self.config.allows_self_loops {
            return Err(GraphError::SelfLoopNotAllowed(u));
        }

        if !self.config.allows_parallel_edges {
            if let Some(existing) = self.edge_connecting(u, v) {
                if let Some(Some(record)) = self.edges.get_mut(existing.index()) {
                    record.weight = weight;
                }
                return Ok(existing);
            }
        }

        let id = EdgeId::new(self.edges.len());
        self.edges.push(Some(EdgeRecord {
            source: u,
            target: v,
            weight,
        }));
        self.edge_count += 1;

        match self.config.kind {
            EdgeKind::Directed => {
                if let Some(incidence) = self.incidence[u.index()].as_mut() {
                    incidence.outgoing.push(id);
                }
                if let Some(incidence) = self.incidence[v.index()].as_mut() {
                    incidence.incoming.push(id);
                }
            }
            EdgeKind::Undirected => {
                if let Some(incidence) = self.incidence[u.index()].as_mut() {
                    incidence.outgoing.push(id);
                }
                if u != v {
                    if let Some(incidence) = self.incidence[v.index()].as_mut() {
                        incidence.outgoing.push(id);
                    }
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(edge = %id, source = %u, target = %v, "edge added");
        Ok(id)
    }

    /// Removes `edge` and returns its weight.
    ///
    /// # Errors
    /// [`GraphError::UnknownEdge`] if `edge` is not live.
    pub fn remove_edge(&mut self, edge: EdgeId) -> GraphResult<W> {
        let record = self
            .edges
            .get_mut(edge.index())
            .and_then(Option::take)
            .ok_or(GraphError::UnknownEdge(edge))?;
        self.edge_count -= 1;

        match self.config.kind {
            EdgeKind::Directed => {
                self.unlink(record.source, edge, Direction::Outgoing);
                self.unlink(record.target, edge, Direction::Incoming);
            }
            EdgeKind::Undirected => {
                self.unlink(record.source, edge, Direction::Outgoing);
                if record.target != record.source {
                    self.unlink(record.target, edge, Direction::Outgoing);
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(edge = %edge, "edge removed");
        Ok(record.weight)
    }

    fn unlink(&mut self, node: NodeId, edge: EdgeId, list: Direction) {
        if let Some(Some(incidence)) = self.incidence.get_mut(node.index()) {
            let edges = match list {
                Direction::Incoming => &mut incidence.incoming,
                Direction::Outgoing | Direction::Both => &mut incidence.outgoing,
            };
            edges.retain(|&e| e != edge);
        }
    }

    /// Returns a store with the same nodes, edges and handles, and weights mapped by `f`.
    ///
    /// The result is always weighted; this is how an unweighted store becomes a
    /// weighted one.
    pub fn map_weights<W2, F>(&self, mut f: F) -> GraphStore<N, W2>
    where
        N: Clone,
        W2: Weight,
        F: FnMut(EdgeRef<W>) -> W2,
    {
        let edges = self
            .edges
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.as_ref().map(|record| EdgeRecord {
                    source: record.source,
                    target: record.target,
                    weight: f(record.to_ref(EdgeId::new(i))),
                })
            })
            .collect();

        GraphStore {
            config: self.config.with_weighted(true),
            nodes: self.nodes.clone(),
            incidence: self.incidence.clone(),
            edges,
            edge_count: self.edge_count,
        }
    }

    /// Checks adjacency consistency: every live edge appears exactly once in
    /// each incidence list it belongs to, and nowhere else.
    pub fn validate_invariants(&self) -> bool {
        let live_edges = self.edges.iter().flatten().count();
        let live_nodes = self.incidence.iter().flatten().count();
        if live_edges != self.edge_count || live_nodes != self.nodes.len() {
            return false;
        }

        let count_in = |node: NodeId, edge: EdgeId, incoming: bool| -> usize {
            self.incidence[node.index()].as_ref().map_or(0, |inc| {
                let list = if incoming { &inc.incoming } else { &inc.outgoing };
                list.iter().filter(|&&e| e == edge).count()
            })
        };

        for (i, slot) in self.edges.iter().enumerate() {
            let Some(record) = slot else { continue };
            let id = EdgeId::new(i);
            if !self.contains_node(record.source) || !self.contains_node(record.target) {
                return false;
            }
            let consistent = match self.config.kind {
                EdgeKind::Directed => {
                    count_in(record.source, id, false) == 1
                        && count_in(record.target, id, true) == 1
                }
                EdgeKind::Undirected => {
                    count_in(record.source, id, false) == 1
                        && count_in(record.target, id, false) == 1
                }
            };
            if !consistent {
                return false;
            }
        }

        for (i, slot) in self.incidence.iter().enumerate() {
            let Some(incidence) = slot else { continue };
            let node = NodeId::new(i);
            let touches = |e: &EdgeId| {
                self.edges
                    .get(e.index())
                    .and_then(Option::as_ref)
                    .is_some_and(|r| r.source == node || r.target == node)
            };
            if !incidence.outgoing.iter().all(touches) || !incidence.incoming.iter().all(touches) {
                return false;
            }
            if !self.is_directed() && !incidence.incoming.is_empty() {
                return false;
            }
        }

        true
    }
}

impl<N, W> GraphStore<N, W>
where
    N: Hash + Eq,
    W: Weight,
{
    /// Builds a store from `(u, v, weight)` triples, creating endpoint nodes on first sight.
    ///
    /// # Errors
    /// Same as [`add_weighted_edge`](Self::add_weighted_edge).
    pub fn from_edges<I>(config: GraphConfig, edges: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = (N, N, W)>,
    {
        let edges = edges.into_iter();
        let mut store = Self::with_capacity(config, 0, edges.size_hint().0);
        for (u, v, weight) in edges {
            store.connect(u, v, weight)?;
        }
        Ok(store)
    }

    /// Builds a store from `(u, v)` pairs with unit weights.
    ///
    /// # Errors
    /// Same as [`add_edge`](Self::add_edge).
    pub fn from_pairs<I>(config: GraphConfig, pairs: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = (N, N)>,
    {
        let mut store = Self::new(config);
        for (u, v) in pairs {
            store.connect(u, v, W::one())?;
        }
        Ok(store)
    }

    /// Adds a node bound to `identity`.
    ///
    /// # Errors
    /// [`GraphError::DuplicateNode`] if the identity is already bound and the
    /// store uses [`IdentityPolicy::Strict`]. With [`IdentityPolicy::Idempotent`]
    /// the existing handle is returned instead.
    pub fn add_node(&mut self, identity: N) -> GraphResult<NodeId> {
        if let Some(existing) = self.nodes.lookup(&identity) {
            return match self.config.node_identity {
                IdentityPolicy::Strict => Err(GraphError::DuplicateNode(existing)),
                IdentityPolicy::Idempotent => Ok(existing),
            };
        }
        Ok(self.push_node(Some(identity)))
    }

    /// Adds a node without identity.
    pub fn add_anonymous_node(&mut self) -> NodeId {
        self.push_node(None)
    }

    /// Returns the node bound to `identity`, adding it if needed.
    ///
    /// Idempotent regardless of the store's [`IdentityPolicy`].
    pub fn ensure_node(&mut self, identity: N) -> NodeId {
        match self.nodes.lookup(&identity) {
            Some(existing) => existing,
            None => self.push_node(Some(identity)),
        }
    }

    fn push_node(&mut self, identity: Option<N>) -> NodeId {
        let id = match identity {
            Some(identity) => self.nodes.intern_for(identity),
            None => self.nodes.reserve(),
        };
        debug_assert_eq!(id.index(), self.incidence.len(), "node tables out of step");
        self.incidence.push(Some(Incidence::default()));

        #[cfg(feature = "tracing")]
        tracing::trace!(node = %id, "node added");
        id
    }

    /// Connects the nodes bound to `u` and `v`, creating them on first sight.
    ///
    /// Unweighted stores accept only a weight of one here. Endpoints are
    /// created only once the edge is known to be accepted.
    ///
    /// # Errors
    /// Same as [`add_weighted_edge`](Self::add_weighted_edge). A rejected
    /// self-loop on an unseen identity reports the handle it would have taken.
    pub fn connect(&mut self, u: N, v: N, weight: W) -> GraphResult<EdgeId> {
        if !self.config.weighted && weight != W::one() {
            return Err(GraphError::UnweightedGraph);
        }
        if u == v && !self.config.allows_self_loops {
            let node = self
                .nodes
                .lookup(&u)
                .unwrap_or_else(|| NodeId::new(self.nodes.bound()));
            return Err(GraphError::SelfLoopNotAllowed(node));
        }
        let a = self.ensure_node(u);
        let b = self.ensure_node(v);
        self.insert_edge(a, b, weight)
    }

    /// Returns the node bound to `identity`.
    pub fn node_id<Q>(&self, identity: &Q) -> Option<NodeId>
    where
        N: std::borrow::Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.nodes.lookup(identity)
    }

    /// Removes `node` with all incident edges and returns its identity.
    ///
    /// # Errors
    /// [`GraphError::UnknownNode`] if `node` is not live.
    pub fn remove_node(&mut self, node: NodeId) -> GraphResult<Option<N>> {
        let incidence = self
            .incidence
            .get_mut(node.index())
            .and_then(Option::take)
            .ok_or(GraphError::UnknownNode(node))?;

        for &edge in incidence.outgoing.iter().chain(&incidence.incoming) {
            // Directed self-loops sit in both lists; the second `take` finds nothing.
            let Some(record) = self.edges[edge.index()].take() else {
                continue;
            };
            self.edge_count -= 1;
            let other = record.other(node);
            if other == node {
                continue;
            }
            let list = match self.config.kind {
                EdgeKind::Directed if record.source == node => Direction::Incoming,
                _ => Direction::Outgoing,
            };
            self.unlink(other, edge, list);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(node = %node, "node removed");
        self.nodes
            .release(node)
            .map_err(|_| GraphError::UnknownNode(node))
    }
}
