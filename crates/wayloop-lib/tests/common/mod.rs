// Shared fixtures for `wayloop-lib` integration tests.
#![allow(dead_code)]

use wayloop_lib::{Cost, Graph, NodeId};

/// Meters per degree of latitude under the mean-earth haversine model.
pub const METERS_PER_DEGREE: f64 = 111_194.93;

/// Convert a meter offset into degrees of latitude (or longitude on the
/// equator).
pub fn deg(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}

/// Connect two existing nodes with an edge costing their geodesic distance.
pub fn connect(graph: &mut Graph, a: NodeId, b: NodeId) {
    let distance = graph
        .geodesic_between(a, b)
        .expect("both endpoints are present");
    graph.add_edge(a, b, Cost::new(distance));
}

/// Build a graph from node positions and undirected geodesically-costed edges.
pub fn geodesic_graph(nodes: &[(NodeId, f64, f64)], edges: &[(NodeId, NodeId)]) -> Graph {
    let mut graph = Graph::new();
    for &(id, lat, lon) in nodes {
        graph.add_node(id, lat, lon);
    }
    for &(a, b) in edges {
        connect(&mut graph, a, b);
    }
    graph
}

/// Uniform `size × size` grid, 4-connected, `spacing_deg` degrees apart.
/// Node ids are `row * size + col`, starting at zero.
pub fn grid_graph(size: i64, spacing_deg: f64) -> Graph {
    let mut graph = Graph::new();
    for row in 0..size {
        for col in 0..size {
            graph.add_node(
                row * size + col,
                row as f64 * spacing_deg,
                col as f64 * spacing_deg,
            );
        }
    }
    for row in 0..size {
        for col in 0..size {
            let id = row * size + col;
            if col + 1 < size {
                connect(&mut graph, id, id + 1);
            }
            if row + 1 < size {
                connect(&mut graph, id, id + size);
            }
        }
    }
    graph
}
