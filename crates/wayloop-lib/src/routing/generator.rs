//! Adaptive convergence engines behind [`compute_routes`] and [`compute_loop`].
//!
//! [`compute_routes`]: super::compute_routes
//! [`compute_loop`]: super::compute_loop

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::RouteRequest;
use crate::graph::{Cost, Graph, NodeId};
use crate::path::shortest_path;
use crate::ring::ring_candidates;

/// Maximum number of routes either generator returns.
pub(crate) const MAX_ROUTES: usize = 10;

/// Refinement rounds per unit of precision.
const ROUNDS_PER_PRECISION: u32 = 5;

/// Floor on the per-round radius ratio: the radius never shrinks by more
/// than ten percent in a single round, so one outlier batch cannot collapse
/// the search ring.
const MIN_RADIUS_RATIO: f64 = 0.9;

/// A path recorded during refinement, keyed by its destination node.
#[derive(Debug, Clone)]
pub(crate) struct RecordedPath {
    pub(crate) destination: NodeId,
    pub(crate) nodes: Vec<NodeId>,
    pub(crate) length_m: f64,
}

/// Single-leg engine: converge the ring radius toward the target distance
/// and record one path per destination.
pub(crate) fn generate_destination_routes<R: Rng + ?Sized>(
    graph: &Graph,
    request: &RouteRequest,
    rng: &mut R,
) -> Vec<RecordedPath> {
    let rounds = request.precision * ROUNDS_PER_PRECISION;
    let budget = candidate_budget(request.precision);
    let mut radius = request.target_m;
    let mut recorded: HashMap<NodeId, RecordedPath> = HashMap::new();

    for round in 0..rounds {
        let pool = ring_candidates(graph, request.start, radius);
        let picks = sample_candidates(pool, budget, rng);

        let mut sum_achieved = 0.0;
        let mut sum_target = 0.0;
        for goal in picks {
            if goal == request.start {
                continue;
            }
            let Some(path) = shortest_path(graph, request.start, goal) else {
                continue;
            };
            let Some(length) = graph.path_length(&path) else {
                continue;
            };
            // First path per destination wins; later rounds only feed the
            // radius correction.
            recorded.entry(goal).or_insert_with(|| RecordedPath {
                destination: goal,
                nodes: path,
                length_m: length,
            });
            sum_achieved += length;
            sum_target += radius;
        }

        radius = next_radius(radius, sum_achieved, sum_target);
        debug!(
            round,
            rounds,
            radius,
            recorded = recorded.len(),
            "destination refinement round complete"
        );
    }

    rank(recorded, request.target_m)
}

/// Round-trip engine: converge on half the target per leg, then close each
/// outbound leg with a return search on a copy that blocks the outbound
/// edges.
pub(crate) fn generate_loop_routes<R: Rng + ?Sized>(
    graph: &Graph,
    request: &RouteRequest,
    rng: &mut R,
) -> Vec<RecordedPath> {
    let rounds = request.precision * ROUNDS_PER_PRECISION;
    let budget = candidate_budget(request.precision);
    let half_target = request.target_m / 2.0;
    let mut leg_radius = half_target;
    let mut recorded: HashMap<NodeId, RecordedPath> = HashMap::new();

    for round in 0..rounds {
        let pool = ring_candidates(graph, request.start, leg_radius);
        let picks = sample_candidates(pool, budget, rng);

        let mut sum_achieved = 0.0;
        let mut sum_target = 0.0;
        for goal in picks {
            if goal == request.start {
                continue;
            }
            let Some(outbound) = shortest_path(graph, request.start, goal) else {
                continue;
            };
            let outbound = truncate_at_distance(graph, outbound, half_target);
            if outbound.len() < 2 {
                continue;
            }
            let Some(&turnaround) = outbound.last() else {
                continue;
            };

            let working = block_outbound(graph, &outbound);
            let Some(return_leg) = shortest_path(&working, turnaround, request.start) else {
                continue;
            };

            let mut nodes = outbound;
            nodes.extend_from_slice(&return_leg[1..]);
            // Length comes from the original graph so blocked sentinels never
            // leak into the reported totals.
            let Some(length) = graph.path_length(&nodes) else {
                continue;
            };

            recorded.entry(turnaround).or_insert_with(|| RecordedPath {
                destination: turnaround,
                nodes,
                length_m: length,
            });
            sum_achieved += length;
            sum_target += request.target_m;
        }

        leg_radius = next_radius(leg_radius, sum_achieved, sum_target);
        debug!(
            round,
            rounds,
            leg_radius,
            recorded = recorded.len(),
            "loop refinement round complete"
        );
    }

    rank(recorded, request.target_m)
}

/// Per-round cap on candidates handed to the search.
fn candidate_budget(precision: u32) -> usize {
    (precision as usize * MAX_ROUTES).max(MAX_ROUTES)
}

/// Reduce the pool to at most `budget` entries, sampled uniformly without
/// replacement when it is larger.
fn sample_candidates<R: Rng + ?Sized>(
    mut pool: Vec<NodeId>,
    budget: usize,
    rng: &mut R,
) -> Vec<NodeId> {
    if pool.len() <= budget {
        return pool;
    }
    let (picked, _) = pool.partial_shuffle(rng, budget);
    picked.to_vec()
}

/// Scale the search radius by how far achieved lengths overshot the target.
///
/// A round with no reachable candidates leaves the radius untouched.
fn next_radius(radius: f64, sum_achieved: f64, sum_target: f64) -> f64 {
    if sum_target == 0.0 {
        return radius;
    }
    let ratio = (1.0 - (sum_achieved - sum_target) / sum_target).max(MIN_RADIUS_RATIO);
    radius * ratio
}

/// Cut an outbound path at the first crossing of `limit_m`.
///
/// Whichever of the two bracketing nodes lands numerically closer to the
/// limit becomes the final node. Paths that never reach the limit are kept
/// whole.
fn truncate_at_distance(graph: &Graph, mut path: Vec<NodeId>, limit_m: f64) -> Vec<NodeId> {
    let mut cumulative = 0.0;
    for index in 1..path.len() {
        let Some(cost) = graph.edge_cost(path[index - 1], path[index]) else {
            return path;
        };
        let section = cost.meters();
        cumulative += section;
        if cumulative >= limit_m {
            let keep = if (limit_m - cumulative).abs() < (limit_m - (cumulative - section)).abs() {
                index
            } else {
                index - 1
            };
            path.truncate(keep + 1);
            return path;
        }
    }
    path
}

/// Working copy of the graph with every outbound edge set to the blocking
/// sentinel, in both directions. The copy lives for one candidate only.
fn block_outbound(graph: &Graph, outbound: &[NodeId]) -> Graph {
    let mut working = graph.clone();
    for pair in outbound.windows(2) {
        working.set_edge_cost(pair[0], pair[1], Cost::BLOCKED);
    }
    working
}

/// Order recorded paths by deviation from the target and keep the best ten.
fn rank(recorded: HashMap<NodeId, RecordedPath>, target_m: f64) -> Vec<RecordedPath> {
    let mut ranked: Vec<RecordedPath> = recorded.into_values().collect();
    ranked.sort_by(|a, b| {
        let deviation_a = (a.length_m - target_m).abs();
        let deviation_b = (b.length_m - target_m).abs();
        deviation_a
            .total_cmp(&deviation_b)
            .then_with(|| a.destination.cmp(&b.destination))
    });
    ranked.truncate(MAX_ROUTES);
    ranked
}
