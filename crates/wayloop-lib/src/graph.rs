use std::collections::HashMap;

use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

/// Numeric identifier for a graph node.
pub type NodeId = i64;

/// Meters per degree of latitude, used to size the merge grid cells.
pub(crate) const METERS_PER_DEGREE: f64 = 111_320.0;

/// Edge weight used to mark an edge as blocked.
///
/// The value is finite on purpose: a search accumulating blocked weights must
/// keep a total ordering, and a blocked edge stays traversable as a strictly
/// last-resort choice instead of disappearing from the topology.
const BLOCKED_METERS: f64 = 1.0e12;

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Great-circle distance to another position, in meters.
    pub fn geodesic_distance(&self, other: &Self) -> f64 {
        Haversine.distance(
            Point::new(self.lon, self.lat),
            Point::new(other.lon, other.lat),
        )
    }

    /// Euclidean distance over raw degree values.
    ///
    /// Degree units are tiny compared to meter costs, which keeps this a
    /// lower bound on the geodesic distance for any realistic span.
    pub fn planar_distance(&self, other: &Self) -> f64 {
        let dlat = self.lat - other.lat;
        let dlon = self.lon - other.lon;
        (dlat * dlat + dlon * dlon).sqrt()
    }
}

/// Non-negative edge weight in meters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Cost {
    meters: f64,
}

impl Cost {
    /// Sentinel weight for a blocked edge.
    pub const BLOCKED: Cost = Cost {
        meters: BLOCKED_METERS,
    };

    /// Create a cost from a meter value. Negative inputs collapse to zero.
    pub fn new(meters: f64) -> Self {
        Self {
            meters: meters.max(0.0),
        }
    }

    /// The weight in meters.
    pub fn meters(&self) -> f64 {
        self.meters
    }

    /// Whether this cost carries the blocking sentinel.
    pub fn is_blocked(&self) -> bool {
        self.meters >= BLOCKED_METERS
    }
}

/// A single vertex: position plus adjacency keyed by neighbour id.
///
/// Neighbours are referenced by id only; the owning [`Graph`] resolves them,
/// so removing or merging a node cannot leave a dangling reference behind.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub coordinates: Coordinates,
    pub(crate) edges: HashMap<NodeId, Cost>,
}

impl Node {
    fn new(id: NodeId, lat: f64, lon: f64) -> Self {
        Self {
            id,
            coordinates: Coordinates { lat, lon },
            edges: HashMap::new(),
        }
    }
}

/// Road-network graph owning all nodes, keyed by id.
///
/// Edges are logically undirected: every mutation writes both adjacency
/// entries, so each stored neighbour id always names a node present in the
/// graph. Node ids are stable only between simplification passes.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: HashMap<NodeId, Node>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node. Returns `false` if the id is already taken.
    pub fn add_node(&mut self, id: NodeId, lat: f64, lon: f64) -> bool {
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.nodes.insert(id, Node::new(id, lat, lon));
        true
    }

    /// Remove a node and every adjacency entry pointing at it.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(node) = self.nodes.remove(&id) else {
            return false;
        };
        for neighbour in node.edges.keys() {
            if let Some(other) = self.nodes.get_mut(neighbour) {
                other.edges.remove(&id);
            }
        }
        true
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|node| node.edges.len()).sum::<usize>() / 2
    }

    /// Iterate over all node ids.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Add an undirected edge between two existing nodes.
    ///
    /// Both endpoints are verified before either adjacency map is touched;
    /// a missing endpoint or a self-loop leaves the graph unchanged.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, cost: Cost) -> bool {
        if a == b || !self.nodes.contains_key(&a) || !self.nodes.contains_key(&b) {
            return false;
        }
        if let Some(node) = self.nodes.get_mut(&a) {
            node.edges.insert(b, cost);
        }
        if let Some(node) = self.nodes.get_mut(&b) {
            node.edges.insert(a, cost);
        }
        true
    }

    /// Remove an undirected edge. Returns `false` when no such edge exists.
    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        let forward = self
            .nodes
            .get_mut(&a)
            .map(|node| node.edges.remove(&b).is_some())
            .unwrap_or(false);
        let backward = self
            .nodes
            .get_mut(&b)
            .map(|node| node.edges.remove(&a).is_some())
            .unwrap_or(false);
        forward || backward
    }

    /// Overwrite the weight of an existing edge in both directions.
    pub fn set_edge_cost(&mut self, a: NodeId, b: NodeId, cost: Cost) -> bool {
        if self.edge_cost(a, b).is_none() {
            return false;
        }
        if let Some(node) = self.nodes.get_mut(&a) {
            node.edges.insert(b, cost);
        }
        if let Some(node) = self.nodes.get_mut(&b) {
            node.edges.insert(a, cost);
        }
        true
    }

    /// Weight of the edge between two nodes, if one exists.
    pub fn edge_cost(&self, a: NodeId, b: NodeId) -> Option<Cost> {
        self.nodes.get(&a).and_then(|node| node.edges.get(&b)).copied()
    }

    /// Iterate over a node's neighbours and edge weights.
    pub fn neighbours(&self, id: NodeId) -> impl Iterator<Item = (NodeId, Cost)> + '_ {
        self.nodes
            .get(&id)
            .into_iter()
            .flat_map(|node| node.edges.iter().map(|(&target, &cost)| (target, cost)))
    }

    /// Number of distinct neighbours of a node.
    pub fn degree(&self, id: NodeId) -> usize {
        self.nodes.get(&id).map(|node| node.edges.len()).unwrap_or(0)
    }

    /// Position of a node, if present.
    pub fn coordinates(&self, id: NodeId) -> Option<Coordinates> {
        self.nodes.get(&id).map(|node| node.coordinates)
    }

    /// Geodesic distance in meters between two nodes, if both exist.
    pub fn geodesic_between(&self, a: NodeId, b: NodeId) -> Option<f64> {
        let first = self.coordinates(a)?;
        let second = self.coordinates(b)?;
        Some(first.geodesic_distance(&second))
    }

    /// Node closest to a position, by planar degree distance over all nodes.
    pub fn nearest_node(&self, lat: f64, lon: f64) -> Option<NodeId> {
        let target = Coordinates { lat, lon };
        let mut best: Option<(NodeId, f64)> = None;
        for node in self.nodes.values() {
            let distance = node.coordinates.planar_distance(&target);
            match best {
                Some((_, current)) if current <= distance => {}
                _ => best = Some((node.id, distance)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Sum of the stored edge weights along a node sequence.
    ///
    /// Returns `None` when a consecutive pair is not connected.
    pub fn path_length(&self, path: &[NodeId]) -> Option<f64> {
        let mut total = 0.0;
        for pair in path.windows(2) {
            total += self.edge_cost(pair[0], pair[1])?.meters();
        }
        Some(total)
    }
}
