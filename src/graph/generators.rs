//! Graph generators: planar point grids and random graphs.
//!
//! Both generators take a `node_fn` that turns a pair of coordinates into a
//! node identity, so callers pick their own point type.

use std::hash::Hash;

use rand::Rng;

use crate::error::{GraphError, GraphResult};
use crate::graph::{GraphConfig, GraphStore};

/// Tolerance used when comparing point distances to the grid spacing.
pub const SPACING_EPSILON: f64 = 1e-6;

/// Attempts at drawing a fresh identity before [`random_graph`] gives up.
const MAX_IDENTITY_DRAWS: usize = 64;

/// Builds an undirected weighted store from planar points.
///
/// One node is created per point with `node_fn(x, y)`; points that map to the
/// same identity share a node. Every two points whose Euclidean distance equals
/// `spacing` (within [`SPACING_EPSILON`]) are joined by an edge weighted with
/// that distance.
///
/// # Errors
/// [`GraphError::InvalidArgument`] if `points` is empty or `spacing` is not a
/// finite positive number.
///
/// ```rust
/// use graph_extras::graph::generators::grid_from_points;
///
/// let points = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)];
/// let grid = grid_from_points(&points, 1.0, |x, y| (x as i32, y as i32)).unwrap();
/// assert_eq!(grid.node_count(), 4);
/// assert_eq!(grid.edge_count(), 4);
/// ```
pub fn grid_from_points<N, F>(
    points: &[(f64, f64)],
    spacing: f64,
    mut node_fn: F,
) -> GraphResult<GraphStore<N>>
where
    N: Hash + Eq,
    F: FnMut(f64, f64) -> N,
{
    if points.is_empty() {
        return Err(GraphError::InvalidArgument(
            "an empty set of points was supplied".into(),
        ));
    }
    if !(spacing.is_finite() && spacing > 0.0) {
        return Err(GraphError::InvalidArgument(format!(
            "grid spacing must be a positive number, got {spacing}"
        )));
    }

    let mut graph =
        GraphStore::with_capacity(GraphConfig::undirected(), points.len(), points.len() * 2);
    let nodes: Vec<_> = points
        .iter()
        .map(|&(x, y)| graph.ensure_node(node_fn(x, y)))
        .collect();

    for (i, &(x1, y1)) in points.iter().enumerate() {
        for (j, &(x2, y2)) in points.iter().enumerate().skip(i + 1) {
            let distance = (x1 - x2).hypot(y1 - y2);
            if (distance - spacing).abs() <= SPACING_EPSILON && nodes[i] != nodes[j] {
                graph.add_weighted_edge(nodes[i], nodes[j], distance)?;
            }
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "grid generated"
    );
    debug_assert!(graph.validate_invariants());
    Ok(graph)
}

/// Builds an undirected random graph with unit weights.
///
/// Creates `node_count` nodes whose identities come from `node_fn` applied to
/// coordinates drawn uniformly from `[0, 1)`; an identity that is already taken
/// is redrawn. Every ordered pair of nodes, including a node with itself, is
/// then connected with probability `density`. Self-loops are allowed and the
/// two orders of a pair share one edge.
///
/// # Errors
/// [`GraphError::InvalidArgument`] if `node_count` is zero, `density` is not in
/// `(0, 1]`, or `node_fn` keeps returning identities that are already taken.
///
/// ```rust
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use graph_extras::graph::generators::random_graph;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let g = random_graph(&mut rng, 10, 1.0, |x, y| (x.to_bits(), y.to_bits())).unwrap();
/// assert_eq!(g.node_count(), 10);
/// assert_eq!(g.edge_count(), 10 * 11 / 2);
/// ```
pub fn random_graph<N, R, F>(
    rng: &mut R,
    node_count: usize,
    density: f64,
    mut node_fn: F,
) -> GraphResult<GraphStore<N>>
where
    N: Hash + Eq,
    R: Rng + ?Sized,
    F: FnMut(f64, f64) -> N,
{
    if node_count == 0 {
        return Err(GraphError::InvalidArgument("node count must be positive".into()));
    }
    if !(density > 0.0 && density <= 1.0) {
        return Err(GraphError::InvalidArgument(format!(
            "density must be in (0, 1], got {density}"
        )));
    }

    let config = GraphConfig::undirected().with_self_loops(true);
    let mut graph = GraphStore::with_capacity(config, node_count, 0);
    let mut nodes = Vec::with_capacity(node_count);
    for _ in 0..node_count {
        let identity = (0..MAX_IDENTITY_DRAWS)
            .map(|_| node_fn(rng.gen::<f64>(), rng.gen::<f64>()))
            .find(|candidate| graph.node_id(candidate).is_none())
            .ok_or_else(|| {
                GraphError::InvalidArgument(format!(
                    "node_fn produced only taken identities in {MAX_IDENTITY_DRAWS} draws"
                ))
            })?;
        nodes.push(graph.add_node(identity)?);
    }

    for &u in &nodes {
        for &v in &nodes {
            if rng.gen_bool(density) {
                graph.add_edge(u, v)?;
            }
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        nodes = node_count,
        edges = graph.edge_count(),
        density,
        "random graph generated"
    );
    debug_assert!(graph.validate_invariants());
    Ok(graph)
}
