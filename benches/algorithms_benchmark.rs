use criterion::{black_box, criterion_group, criterion_main, Criterion};
use graph_extras::algorithms::heuristics::manhattan;
use graph_extras::algorithms::{
    connected_components, dijkstra, max_flow, minimum_spanning_forest,
    strongly_connected_components, topological_sort, AStar, IdaStar, Pathfinder,
};
use graph_extras::graph::generators::{grid_from_points, random_graph};
use graph_extras::graph::{GraphConfig, GraphStore, NodeId};
use rand::rngs::StdRng;
use rand::SeedableRng;

type Point = (i64, i64);

#[allow(clippy::cast_possible_truncation)]
fn grid(side: i64) -> GraphStore<Point> {
    let mut points = Vec::new();
    for x in 0..side {
        for y in 0..side {
            #[allow(clippy::cast_precision_loss)]
            points.push((x as f64, y as f64));
        }
    }
    grid_from_points(&points, 1.0, |x, y| (x as i64, y as i64)).unwrap()
}

/// Layered DAG: every node of one layer feeds two nodes of the next.
fn layered(layers: usize, width: usize) -> GraphStore<usize> {
    let mut g = GraphStore::with_capacity(GraphConfig::directed(), layers * width, layers * width * 2);
    for i in 0..layers * width {
        g.add_node(i).unwrap();
    }
    for layer in 0..layers - 1 {
        for i in 0..width {
            let from = NodeId::new(layer * width + i);
            let next = (layer + 1) * width;
            g.add_weighted_edge(from, NodeId::new(next + i), 3.0).unwrap();
            g.add_weighted_edge(from, NodeId::new(next + (i + 1) % width), 2.0).unwrap();
        }
    }
    g
}

fn bench_paths(c: &mut Criterion) {
    let g = grid(60);
    let source = g.node_id(&(0, 0)).unwrap();
    let target = g.node_id(&(59, 59)).unwrap();
    let astar = AStar::new(manhattan(|p: &Point| p.0 as f64, |p: &Point| p.1 as f64));

    c.bench_function("dijkstra_grid_60", |b| {
        b.iter(|| black_box(dijkstra(&g, source).unwrap()));
    });
    c.bench_function("astar_grid_60", |b| {
        b.iter(|| black_box(astar.find_path(&g, source, target).unwrap()));
    });

    let small = grid(12);
    let (s, t) = (small.node_id(&(0, 0)).unwrap(), small.node_id(&(11, 11)).unwrap());
    let ida = IdaStar::new(manhattan(|p: &Point| p.0 as f64, |p: &Point| p.1 as f64));
    c.bench_function("idastar_grid_12", |b| {
        b.iter(|| black_box(ida.find_path(&small, s, t).unwrap()));
    });
}

fn bench_structure(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let random = random_graph(&mut rng, 2_000, 0.002, |x, y| (x.to_bits(), y.to_bits())).unwrap();
    let dag = layered(100, 50);

    c.bench_function("connected_components_random_2000", |b| {
        b.iter(|| black_box(connected_components(&random)));
    });
    c.bench_function("scc_layered", |b| {
        b.iter(|| black_box(strongly_connected_components(&dag).unwrap()));
    });
    c.bench_function("toposort_layered", |b| {
        b.iter(|| black_box(topological_sort(&dag).unwrap()));
    });
    c.bench_function("kruskal_grid_60", |b| {
        let g = grid(60);
        b.iter(|| black_box(minimum_spanning_forest(&g).unwrap()));
    });
}

fn bench_flow(c: &mut Criterion) {
    let mut g = layered(20, 20);
    let source = g.add_node(usize::MAX - 1).unwrap();
    let sink = g.add_node(usize::MAX).unwrap();
    for i in 0..20 {
        g.add_weighted_edge(source, NodeId::new(i), 10.0).unwrap();
        g.add_weighted_edge(NodeId::new(19 * 20 + i), sink, 10.0).unwrap();
    }
    c.bench_function("max_flow_layered", |b| {
        b.iter(|| black_box(max_flow(&g, source, sink).unwrap()));
    });
}

criterion_group!(benches, bench_paths, bench_structure, bench_flow);
criterion_main!(benches);
