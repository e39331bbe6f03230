use graph_extras::algorithms::heuristics::euclidean;
use graph_extras::algorithms::{dijkstra, AStar, DijkstraPathfinder, IdaStar, Pathfinder};
use graph_extras::graph::{GraphConfig, GraphStore, NodeId};

/// Eighteen planar points; node identities are indices into this table.
const POINTS: [(f64, f64); 18] = [
    (0.0, 0.0),
    (1.0, -1.0),
    (0.0, -3.0),
    (0.5, -5.0),
    (-0.5, -5.0),
    (0.0, -6.0),
    (3.0, 1.0),
    (4.0, 3.0),
    (3.0, 5.0),
    (0.0, 4.5),
    (0.0, 5.5),
    (0.3, 2.0),
    (-0.5, 2.0),
    (-3.0, 0.2),
    (-3.5, 2.0),
    (-4.0, 2.5),
    (-5.0, 2.5),
    (-1.0, 3.0),
];

/// Edge list; `0 -> 1` appears twice and collapses into one edge.
const LINKS: [(usize, usize); 19] = [
    (0, 2),
    (0, 1),
    (0, 6),
    (0, 1),
    (0, 12),
    (2, 3),
    (2, 4),
    (4, 5),
    (6, 7),
    (7, 8),
    (8, 9),
    (9, 10),
    (9, 11),
    (9, 12),
    (12, 13),
    (12, 14),
    (12, 15),
    (12, 17),
    (15, 16),
];

fn distance(a: usize, b: usize) -> f64 {
    let (x1, y1) = POINTS[a];
    let (x2, y2) = POINTS[b];
    (x1 - x2).hypot(y1 - y2)
}

/// Nodes are added in index order, so `NodeId::new(i)` is point `i`.
fn planar(config: GraphConfig) -> GraphStore<usize> {
    let mut g = GraphStore::with_capacity(config, POINTS.len(), LINKS.len());
    for i in 0..POINTS.len() {
        g.add_node(i).unwrap();
    }
    for (u, v) in LINKS {
        g.add_weighted_edge(NodeId::new(u), NodeId::new(v), distance(u, v))
            .unwrap();
    }
    g
}

fn heuristic() -> impl Fn(&usize, &usize) -> f64 {
    euclidean(|&i: &usize| POINTS[i].0, |&i: &usize| POINTS[i].1)
}

fn ids(path: &[usize]) -> Vec<NodeId> {
    path.iter().copied().map(NodeId::new).collect()
}

type Finder = Box<dyn Pathfinder<usize, f64>>;

fn finders() -> Vec<(&'static str, Finder)> {
    vec![
        ("a*", Box::new(AStar::new(heuristic())) as Finder),
        ("ida*", Box::new(IdaStar::new(heuristic())) as Finder),
        ("dijkstra", Box::new(DijkstraPathfinder) as Finder),
    ]
}

#[test]
fn test_fixture_shape() {
    let directed = planar(GraphConfig::directed());
    assert_eq!(directed.node_count(), 18);
    assert_eq!(directed.edge_count(), 18);
    assert!(directed.validate_invariants());
}

#[test]
fn test_undirected_paths() {
    let g = planar(GraphConfig::undirected());
    let cases: [(usize, usize, &[usize]); 4] = [
        (0, 2, &[0, 2]),
        (6, 16, &[6, 0, 12, 15, 16]),
        (3, 6, &[3, 2, 0, 6]),
        (3, 3, &[3]),
    ];
    for (name, finder) in finders() {
        for (from, to, expected) in cases {
            let path = finder
                .find_path(&g, NodeId::new(from), NodeId::new(to))
                .unwrap();
            assert_eq!(path, ids(expected), "{name}: {from} -> {to}");
        }
    }
}

#[test]
fn test_directed_paths() {
    let g = planar(GraphConfig::directed());
    let cases: [(usize, usize, &[usize]); 4] = [
        (0, 2, &[0, 2]),
        (6, 16, &[6, 7, 8, 9, 12, 15, 16]),
        (3, 6, &[]),
        (3, 3, &[3]),
    ];
    for (name, finder) in finders() {
        for (from, to, expected) in cases {
            let path = finder
                .find_path(&g, NodeId::new(from), NodeId::new(to))
                .unwrap();
            assert_eq!(path, ids(expected), "{name}: {from} -> {to}");
        }
    }
}

#[test]
fn test_pathfinders_agree_with_dijkstra_costs() {
    let g = planar(GraphConfig::undirected());
    let source = NodeId::new(5);
    let reference = dijkstra(&g, source).unwrap();

    for (name, finder) in finders() {
        for target in g.nodes() {
            let path = finder.find_path(&g, source, target).unwrap();
            let cost: f64 = path
                .windows(2)
                .map(|w| distance(w[0].index(), w[1].index()))
                .sum();
            let expected = reference.distance(target).unwrap();
            assert!(
                (cost - expected).abs() < 1e-9,
                "{name}: cost to {target} is {cost}, expected {expected}"
            );
        }
    }
}
