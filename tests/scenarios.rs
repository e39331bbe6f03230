use anyhow::Result;
use graph_extras::algorithms::{
    connected_components, dijkstra, minimum_spanning_tree, topological_sort,
};
use graph_extras::graph::{EdgeKind, GraphConfig, GraphStore, IdentityPolicy, NodeId};
use graph_extras::GraphError;

#[test]
fn test_dijkstra_prefers_cheaper_detour() -> Result<()> {
    let g: GraphStore<char> = GraphStore::from_edges(
        GraphConfig::directed(),
        [('A', 'B', 1.0), ('B', 'C', 1.0), ('A', 'C', 5.0), ('C', 'D', 1.0)],
    )?;
    let id = |c: char| g.node_id(&c).ok_or_else(|| anyhow::anyhow!("missing {c}"));
    let (a, b, c, d) = (id('A')?, id('B')?, id('C')?, id('D')?);

    let paths = dijkstra(&g, a)?;
    assert_eq!(paths.distance(a), Some(0.0));
    assert_eq!(paths.distance(b), Some(1.0));
    assert_eq!(paths.distance(c), Some(2.0));
    assert_eq!(paths.distance(d), Some(3.0));
    assert_eq!(paths.predecessor(c).map(|(node, _)| node), Some(b));
    assert_eq!(paths.path_to(d), Some(vec![a, b, c, d]));
    Ok(())
}

#[test]
fn test_triangle_components_and_tree() -> Result<()> {
    let mut g: GraphStore<char> = GraphStore::from_edges(
        GraphConfig::undirected(),
        [('A', 'B', 1.0), ('B', 'C', 1.0), ('C', 'A', 1.0)],
    )?;
    let tree = minimum_spanning_tree(&g)?;
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.total_weight(), 2.0);

    let d = g.add_node('D')?;
    let components = connected_components(&g);
    assert_eq!(components.count(), 2);

    let a = g.node_id(&'A').unwrap();
    let mut groups = components.components();
    groups.sort();
    assert_eq!(
        groups,
        vec![vec![a, g.node_id(&'B').unwrap(), g.node_id(&'C').unwrap()], vec![d]]
    );
    Ok(())
}

#[test]
fn test_cycle_blocks_topological_sort() -> Result<()> {
    let g: GraphStore<char> = GraphStore::from_pairs(
        GraphConfig::directed(),
        [('A', 'B'), ('B', 'C'), ('C', 'A')],
    )?;
    match topological_sort(&g) {
        Err(GraphError::CycleDetected { cycle }) => {
            assert_eq!(cycle.len(), 3);
            for pair in cycle.iter().zip(cycle.iter().cycle().skip(1)) {
                assert!(g.edge_connecting(*pair.0, *pair.1).is_some());
            }
        }
        other => panic!("expected a cycle, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_unknown_endpoint_leaves_store_untouched() -> Result<()> {
    let mut g: GraphStore<&str> =
        GraphStore::from_pairs(GraphConfig::directed(), [("a", "b")])?;
    let a = g.node_id("a").unwrap();
    let ghost = NodeId::new(99);

    let before = (g.node_count(), g.edge_count(), g.edge_bound());
    assert_eq!(g.add_edge(a, ghost), Err(GraphError::UnknownNode(ghost)));
    assert_eq!(g.add_weighted_edge(ghost, a, 2.0), Err(GraphError::UnknownNode(ghost)));
    assert_eq!((g.node_count(), g.edge_count(), g.edge_bound()), before);
    assert_eq!(g.neighbors(a)?.count(), 1);
    assert!(g.validate_invariants());
    Ok(())
}

#[test]
fn test_removed_handles_stay_retired() -> Result<()> {
    let mut g: GraphStore<u32> =
        GraphStore::from_pairs(GraphConfig::undirected(), [(1, 2), (2, 3)])?;
    let two = g.node_id(&2).unwrap();
    let before = dijkstra(&g, g.node_id(&1).unwrap())?;

    assert_eq!(g.remove_node(two)?, Some(2));
    let again = g.add_node(2)?;
    assert_ne!(again, two);
    assert_eq!(g.neighbors(two).err(), Some(GraphError::UnknownNode(two)));

    // Results computed earlier still refer to the old handle.
    assert_eq!(before.distance(two), Some(1.0));
    assert!(g.validate_invariants());
    Ok(())
}

#[test]
fn test_config_loads_from_json() -> Result<()> {
    let config: GraphConfig = serde_json::from_str(
        r#"{ "kind": "undirected", "allows_self_loops": true, "node_identity": "idempotent" }"#,
    )?;
    assert_eq!(config.kind, EdgeKind::Undirected);
    assert!(config.weighted);
    assert!(config.allows_self_loops);
    assert!(!config.allows_parallel_edges);
    assert_eq!(config.node_identity, IdentityPolicy::Idempotent);

    let mut g: GraphStore<&str> = GraphStore::new(config);
    let first = g.add_node("x")?;
    assert_eq!(g.add_node("x")?, first);

    let round_trip: GraphConfig = serde_json::from_str(&serde_json::to_string(&config)?)?;
    assert_eq!(round_trip, config);
    Ok(())
}
