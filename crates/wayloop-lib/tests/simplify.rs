mod common;

use common::deg;
use wayloop_lib::{Cost, Graph};

#[test]
fn collapse_replaces_pass_through_node_with_summed_edge() {
    let mut graph = Graph::new();
    graph.add_node(1, 0.0, 0.0); // A
    graph.add_node(2, 0.0, 1.0); // B, degree 2
    graph.add_node(3, 0.0, 2.0); // C
    graph.add_node(4, 1.0, 0.0); // unrelated pair D-E
    graph.add_node(5, 1.0, 1.0);
    graph.add_edge(1, 2, Cost::new(3.0));
    graph.add_edge(2, 3, Cost::new(4.0));
    graph.add_edge(4, 5, Cost::new(9.0));

    let removed = graph.collapse_degree_two();

    assert_eq!(removed, 1);
    assert!(!graph.contains(2));
    assert_eq!(graph.edge_cost(1, 3).unwrap().meters(), 7.0);
    // The unrelated edge is untouched.
    assert_eq!(graph.edge_cost(4, 5).unwrap().meters(), 9.0);
}

#[test]
fn collapse_runs_chains_to_a_fixpoint() {
    // A - w - x - y - B: three chained pass-through nodes.
    let mut graph = Graph::new();
    for (id, lon) in [(1, 0.0), (2, 1.0), (3, 2.0), (4, 3.0), (5, 4.0)] {
        graph.add_node(id, 0.0, lon);
    }
    for (a, b, meters) in [(1, 2, 10.0), (2, 3, 20.0), (3, 4, 30.0), (4, 5, 40.0)] {
        graph.add_edge(a, b, Cost::new(meters));
    }

    let removed = graph.collapse_degree_two();

    assert_eq!(removed, 3);
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_cost(1, 5).unwrap().meters(), 100.0);
}

#[test]
fn collapse_ignores_junctions() {
    // A 3-way junction must survive.
    let mut graph = Graph::new();
    graph.add_node(1, 0.0, 0.0);
    graph.add_node(2, 0.0, 1.0);
    graph.add_node(3, 1.0, 0.0);
    graph.add_node(4, 1.0, 1.0);
    graph.add_edge(1, 2, Cost::new(1.0));
    graph.add_edge(1, 3, Cost::new(1.0));
    graph.add_edge(1, 4, Cost::new(1.0));

    assert_eq!(graph.collapse_degree_two(), 0);
    assert_eq!(graph.node_count(), 4);
}

#[test]
fn collapse_keeps_cheaper_parallel_edge() {
    // B sits on a detour between junctions A and C; A-C already has a
    // direct edge cheaper than the detour sum. Two leaves per junction keep
    // A and C above degree 2 once B is gone.
    let mut graph = Graph::new();
    graph.add_node(1, 0.0, 0.0); // A
    graph.add_node(2, 0.0, 1.0); // B
    graph.add_node(3, 0.0, 2.0); // C
    graph.add_node(4, 1.0, 0.0);
    graph.add_node(5, -1.0, 0.0);
    graph.add_node(6, 1.0, 2.0);
    graph.add_node(7, -1.0, 2.0);
    graph.add_edge(1, 2, Cost::new(50.0));
    graph.add_edge(2, 3, Cost::new(50.0));
    graph.add_edge(1, 3, Cost::new(30.0));
    graph.add_edge(1, 4, Cost::new(5.0));
    graph.add_edge(1, 5, Cost::new(5.0));
    graph.add_edge(3, 6, Cost::new(5.0));
    graph.add_edge(3, 7, Cost::new(5.0));

    assert_eq!(graph.collapse_degree_two(), 1);
    assert!(!graph.contains(2));
    assert_eq!(graph.edge_cost(1, 3).unwrap().meters(), 30.0);
}

#[test]
fn merge_combines_nodes_within_threshold() {
    // Nodes 1 and 2 sit ~5 m apart; node 3 is a distant neighbour of 2.
    let mut graph = Graph::new();
    graph.add_node(1, 0.0, 0.0);
    graph.add_node(2, deg(5.0), 0.0);
    graph.add_node(3, deg(5_000.0), 0.0);
    graph.add_edge(2, 3, Cost::new(4_995.0));

    let merged = graph.merge_close_nodes(20.0);

    assert_eq!(merged, 1);
    assert_eq!(graph.node_count(), 2);
    // The survivor inherits the removed node's edge with its cost intact.
    let survivor = if graph.contains(1) { 1 } else { 2 };
    assert_eq!(graph.edge_cost(survivor, 3).unwrap().meters(), 4_995.0);
}

#[test]
fn merge_leaves_distant_pairs_alone() {
    let mut graph = Graph::new();
    graph.add_node(1, 0.0, 0.0);
    graph.add_node(2, deg(25.0), 0.0);

    assert_eq!(graph.merge_close_nodes(20.0), 0);
    assert_eq!(graph.node_count(), 2);
}

#[test]
fn merge_drops_the_edge_between_the_pair() {
    let mut graph = Graph::new();
    graph.add_node(1, 0.0, 0.0);
    graph.add_node(2, deg(5.0), 0.0);
    graph.add_edge(1, 2, Cost::new(5.0));

    graph.merge_close_nodes(20.0);

    assert_eq!(graph.node_count(), 1);
    // No self-loop on the survivor.
    let survivor = if graph.contains(1) { 1 } else { 2 };
    assert_eq!(graph.degree(survivor), 0);
}

#[test]
fn simplify_collapses_then_merges() {
    // Node 2 is a pure waypoint on the way to junction 3; node 4 is a
    // near-duplicate of the junction carrying its own spur to node 5.
    let mut graph = Graph::new();
    graph.add_node(1, 0.0, 0.0);
    graph.add_node(2, deg(500.0), 0.0); // waypoint
    graph.add_node(3, deg(1_000.0), 0.0); // junction
    graph.add_node(6, deg(1_000.0), deg(300.0));
    graph.add_node(7, deg(1_000.0), deg(-300.0));
    graph.add_node(4, deg(1_004.0), 0.0); // ~4 m from the junction
    graph.add_node(5, deg(1_500.0), 0.0);
    graph.add_edge(1, 2, Cost::new(500.0));
    graph.add_edge(2, 3, Cost::new(500.0));
    graph.add_edge(3, 6, Cost::new(300.0));
    graph.add_edge(3, 7, Cost::new(300.0));
    graph.add_edge(4, 5, Cost::new(496.0));

    graph.simplify(20.0);

    // The waypoint collapsed, the duplicate merged into the junction.
    assert!(!graph.contains(2));
    assert!(!graph.contains(4));
    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.edge_cost(1, 3).unwrap().meters(), 1_000.0);
    assert_eq!(graph.edge_cost(3, 5).unwrap().meters(), 496.0);
}
