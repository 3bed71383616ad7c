//! wayloop library entry points.
//!
//! This crate exposes the road-network graph model, the two simplification
//! passes that make raw extracts tractable, the A* shortest-path primitive,
//! and the generators that turn a target travel distance into concrete
//! point-to-point routes or round-trip loops. Higher-level consumers (CLI,
//! serving boundaries) should only depend on the functions exported here
//! instead of reimplementing behavior.

pub mod error;
pub mod graph;
pub mod path;
pub mod ring;
pub mod routing;
pub mod snapshot;

mod simplify;

pub use error::{Error, Result};
pub use graph::{Coordinates, Cost, Graph, Node, NodeId};
pub use path::{shortest_path, MinPriorityQueue};
pub use ring::ring_candidates;
pub use routing::{
    compute_loop, compute_loop_with, compute_routes, compute_routes_with, RoutePath, RouteRequest,
};
pub use snapshot::load_graph;
