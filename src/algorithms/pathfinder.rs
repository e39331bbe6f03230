//! Goal-directed single-pair pathfinding.
//!
//! A [`Pathfinder`] returns the node sequence of a cheapest path between two
//! nodes, an empty sequence if the target is unreachable, and `[source]` when
//! source and target coincide. Heuristics see node identities, not handles;
//! anonymous nodes are estimated at zero.

use crate::collections::{BitSet, MinHeap, Scored};
use crate::error::{GraphError, GraphResult};
use crate::graph::{GraphStore, Neighbors, NodeId, Weight};

use super::shortest_path::first_negative;

/// Estimates the remaining cost between two node identities.
///
/// Must never overestimate (admissible) for the returned paths to be
/// cheapest. Every `Fn(&N, &N) -> W` closure is a heuristic; see
/// [`heuristics`](super::heuristics) for planar ones.
pub trait Heuristic<N, W> {
    /// Lower bound on the cost of going from `from` to `to`.
    fn estimate(&self, from: &N, to: &N) -> W;
}

impl<N, W, F> Heuristic<N, W> for F
where
    F: Fn(&N, &N) -> W,
{
    #[inline]
    fn estimate(&self, from: &N, to: &N) -> W {
        self(from, to)
    }
}

/// Single-pair path search over a [`GraphStore`].
pub trait Pathfinder<N, W> {
    /// Finds a cheapest path from `source` to `target`.
    ///
    /// # Errors
    /// - [`GraphError::UnknownNode`] if either endpoint is not live,
    /// - [`GraphError::NegativeWeight`] if the store has a negative (or NaN) weight.
    fn find_path(
        &self,
        graph: &GraphStore<N, W>,
        source: NodeId,
        target: NodeId,
    ) -> GraphResult<Vec<NodeId>>;
}

fn estimate<N, W: Weight, H: Heuristic<N, W>>(
    heuristic: &H,
    graph: &GraphStore<N, W>,
    from: NodeId,
    to: NodeId,
) -> W {
    match (graph.identity(from), graph.identity(to)) {
        (Ok(Some(a)), Ok(Some(b))) => heuristic.estimate(a, b),
        _ => W::zero(),
    }
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn check_endpoints<N, W: Weight>(
    search: &'static str,
    graph: &GraphStore<N, W>,
    source: NodeId,
    target: NodeId,
) -> GraphResult<()> {
    #[cfg(feature = "tracing")]
    tracing::debug!(search, source = %source, target = %target, "path search");

    for node in [source, target] {
        if !graph.contains_node(node) {
            return Err(GraphError::UnknownNode(node));
        }
    }
    match first_negative(graph) {
        Some(edge) => Err(GraphError::NegativeWeight(edge)),
        None => Ok(()),
    }
}

/// A* search: best-first on `g + h`.
///
/// With a consistent heuristic every node is expanded at most once.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar<H> {
    heuristic: H,
}

impl<H> AStar<H> {
    /// Creates an A* pathfinder guided by `heuristic`.
    pub fn new(heuristic: H) -> Self {
        Self { heuristic }
    }
}

impl<N, W, H> Pathfinder<N, W> for AStar<H>
where
    W: Weight,
    H: Heuristic<N, W>,
{
    fn find_path(
        &self,
        graph: &GraphStore<N, W>,
        source: NodeId,
        target: NodeId,
    ) -> GraphResult<Vec<NodeId>> {
        check_endpoints("astar", graph, source, target)?;
        if source == target {
            return Ok(vec![source]);
        }

        let bound = graph.node_bound();
        let mut cost: Vec<Option<W>> = vec![None; bound];
        let mut came_from: Vec<Option<NodeId>> = vec![None; bound];
        let mut closed = BitSet::new(bound);
        let mut open = MinHeap::new();

        cost[source.index()] = Some(W::zero());
        open.push(Scored {
            score: estimate(&self.heuristic, graph, source, target),
            item: source,
        });

        while let Some(Scored { item: node, .. }) = open.pop() {
            if node == target {
                return Ok(walk_back(&came_from, target));
            }
            if !closed.insert(node.index()) {
                continue;
            }
            let Some(g) = cost[node.index()] else { continue };

            for (next, edge) in graph.neighbors(node)? {
                if closed.contains(next.index()) {
                    continue;
                }
                let candidate = g + graph.edge_weight(edge)?;
                if cost[next.index()].map_or(true, |known| candidate < known) {
                    cost[next.index()] = Some(candidate);
                    came_from[next.index()] = Some(node);
                    open.push(Scored {
                        score: candidate + estimate(&self.heuristic, graph, next, target),
                        item: next,
                    });
                }
            }
        }
        Ok(Vec::new())
    }
}

fn walk_back(came_from: &[Option<NodeId>], target: NodeId) -> Vec<NodeId> {
    let mut path = vec![target];
    let mut current = target;
    while let Some(prev) = came_from[current.index()] {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Iterative-deepening A*.
///
/// Repeats a bounded depth-first search, raising the bound on `g + h` to the
/// smallest value that exceeded it, until the target is found or nothing
/// exceeds the bound. Memory is linear in the path length; time can be
/// exponential on graphs with many alternative routes. A node is never
/// repeated on the current path.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdaStar<H> {
    heuristic: H,
}

impl<H> IdaStar<H> {
    /// Creates an IDA* pathfinder guided by `heuristic`.
    pub fn new(heuristic: H) -> Self {
        Self { heuristic }
    }
}

struct Frame<'a, W> {
    node: NodeId,
    cost: W,
    neighbors: Neighbors<'a, W>,
}

/// Outcome of one bounded pass.
enum Pass<W> {
    Found(Vec<NodeId>),
    /// Smallest `f` above the bound, `None` if nothing was cut off.
    Exceeded(Option<W>),
}

impl<H> IdaStar<H> {
    fn bounded_search<N, W>(
        &self,
        graph: &GraphStore<N, W>,
        source: NodeId,
        target: NodeId,
        threshold: W,
        on_path: &mut BitSet,
    ) -> GraphResult<Pass<W>>
    where
        W: Weight,
        H: Heuristic<N, W>,
    {
        let mut next_threshold: Option<W> = None;
        let mut stack = vec![Frame {
            node: source,
            cost: W::zero(),
            neighbors: graph.neighbors(source)?,
        }];
        on_path.clear();
        on_path.insert(source.index());

        while let Some(frame) = stack.last_mut() {
            let Some((next, edge)) = frame.neighbors.next() else {
                on_path.remove(frame.node.index());
                stack.pop();
                continue;
            };
            if on_path.contains(next.index()) {
                continue;
            }

            let cost = frame.cost + graph.edge_weight(edge)?;
            let f = cost + estimate(&self.heuristic, graph, next, target);
            if f > threshold {
                if next_threshold.map_or(true, |t| f < t) {
                    next_threshold = Some(f);
                }
                continue;
            }
            if next == target {
                let mut path: Vec<NodeId> = stack.iter().map(|fr| fr.node).collect();
                path.push(target);
                return Ok(Pass::Found(path));
            }

            on_path.insert(next.index());
            stack.push(Frame {
                node: next,
                cost,
                neighbors: graph.neighbors(next)?,
            });
        }
        Ok(Pass::Exceeded(next_threshold))
    }
}

impl<N, W, H> Pathfinder<N, W> for IdaStar<H>
where
    W: Weight,
    H: Heuristic<N, W>,
{
    fn find_path(
        &self,
        graph: &GraphStore<N, W>,
        source: NodeId,
        target: NodeId,
    ) -> GraphResult<Vec<NodeId>> {
        check_endpoints("idastar", graph, source, target)?;
        if source == target {
            return Ok(vec![source]);
        }

        let mut on_path = BitSet::new(graph.node_bound());
        let mut threshold = estimate(&self.heuristic, graph, source, target);
        loop {
            match self.bounded_search(graph, source, target, threshold, &mut on_path)? {
                Pass::Found(path) => return Ok(path),
                Pass::Exceeded(Some(next)) => threshold = next,
                Pass::Exceeded(None) => return Ok(Vec::new()),
            }
        }
    }
}

/// Uninformed best-first search; A* with a heuristic of zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraPathfinder;

impl<N, W: Weight> Pathfinder<N, W> for DijkstraPathfinder {
    fn find_path(
        &self,
        graph: &GraphStore<N, W>,
        source: NodeId,
        target: NodeId,
    ) -> GraphResult<Vec<NodeId>> {
        AStar::new(|_: &N, _: &N| W::zero()).find_path(graph, source, target)
    }
}
