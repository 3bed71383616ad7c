//! Target-distance route generation.
//!
//! This module provides:
//! - [`RouteRequest`] - Parameters shared by both generators
//! - [`RoutePath`] - A generated route with its on-graph length
//! - [`compute_routes`] - Point-to-point candidate destinations
//! - [`compute_loop`] - Round-trip loops that avoid retracing the outbound leg
//!
//! Both generators run the same adaptive scheme: query ring candidates at a
//! search radius, path to a sampled subset, then scale the radius by how far
//! the achieved on-graph lengths overshot the target. Graph tortuosity makes
//! real paths longer than the straight-line radius; the convergence loop
//! compensates for it without any knowledge of the road layout.
//!
//! Candidate sampling draws from a caller-supplied random source in the
//! `_with` variants, which keeps expected outputs reproducible under a fixed
//! seed. The plain variants use the thread-local generator.

mod generator;

use rand::Rng;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::{Coordinates, Graph, NodeId};

/// Parameters for a route-generation request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    /// Start node; must be present in the graph.
    pub start: NodeId,
    /// Target travel distance in meters. For loops this is the full
    /// round-trip length.
    pub target_m: f64,
    /// Scaling factor for refinement rounds and the per-round candidate
    /// budget. Higher values trade time for tighter convergence.
    pub precision: u32,
}

impl RouteRequest {
    pub fn new(start: NodeId, target_m: f64, precision: u32) -> Self {
        Self {
            start,
            target_m,
            precision,
        }
    }
}

/// A generated route: its on-graph length and node/coordinate sequences.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePath {
    /// Achieved on-graph length in meters.
    pub length_m: f64,
    /// Inclusive node-id sequence from the start node.
    pub nodes: Vec<NodeId>,
    /// The same sequence as positions, ready for the serving boundary.
    pub points: Vec<Coordinates>,
}

/// Compute up to ten destination paths approximating the target distance.
pub fn compute_routes(graph: &Graph, request: &RouteRequest) -> Result<Vec<RoutePath>> {
    compute_routes_with(graph, request, &mut rand::rng())
}

/// [`compute_routes`] with an explicit random source for candidate sampling.
pub fn compute_routes_with<R: Rng + ?Sized>(
    graph: &Graph,
    request: &RouteRequest,
    rng: &mut R,
) -> Result<Vec<RoutePath>> {
    validate(graph, request)?;
    let ranked = generator::generate_destination_routes(graph, request, rng);
    Ok(into_route_paths(graph, ranked))
}

/// Compute up to ten round-trip loops approximating the target distance.
pub fn compute_loop(graph: &Graph, request: &RouteRequest) -> Result<Vec<RoutePath>> {
    compute_loop_with(graph, request, &mut rand::rng())
}

/// [`compute_loop`] with an explicit random source for candidate sampling.
pub fn compute_loop_with<R: Rng + ?Sized>(
    graph: &Graph,
    request: &RouteRequest,
    rng: &mut R,
) -> Result<Vec<RoutePath>> {
    validate(graph, request)?;
    let ranked = generator::generate_loop_routes(graph, request, rng);
    Ok(into_route_paths(graph, ranked))
}

fn validate(graph: &Graph, request: &RouteRequest) -> Result<()> {
    if !graph.contains(request.start) {
        return Err(Error::UnknownNode { id: request.start });
    }
    if !request.target_m.is_finite() || request.target_m <= 0.0 {
        return Err(Error::InvalidRequest {
            reason: format!(
                "target distance must be positive and finite, got {}",
                request.target_m
            ),
        });
    }
    if request.precision == 0 {
        return Err(Error::InvalidRequest {
            reason: "precision must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn into_route_paths(graph: &Graph, ranked: Vec<generator::RecordedPath>) -> Vec<RoutePath> {
    ranked
        .into_iter()
        .map(|recorded| RoutePath {
            length_m: recorded.length_m,
            points: recorded
                .nodes
                .iter()
                .filter_map(|&id| graph.coordinates(id))
                .collect(),
            nodes: recorded.nodes,
        })
        .collect()
}
