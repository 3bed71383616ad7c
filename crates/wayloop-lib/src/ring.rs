//! Radius-ring candidate search.

use tracing::debug;

use crate::graph::{Graph, NodeId};

/// Hard ceiling on the widened ring tolerance, in meters.
const MAX_RING_TOLERANCE_M: f64 = 500.0;

/// Collect nodes whose geodesic distance to `center` lies in `[radius − ε, radius + ε]`.
///
/// ε starts at one percent of the radius and doubles on every empty retry, so
/// sparse regions where no node sits near the exact radius still produce
/// candidates. The initial scan always runs; the ceiling only bounds the
/// retries, and once the next widening would exceed it the search gives up
/// and returns an empty list. The result is sorted by id so downstream
/// sampling is reproducible under a fixed seed.
pub fn ring_candidates(graph: &Graph, center: NodeId, radius_m: f64) -> Vec<NodeId> {
    let Some(center_position) = graph.coordinates(center) else {
        return Vec::new();
    };
    if radius_m < 0.0 {
        return Vec::new();
    }

    let mut tolerance = radius_m / 100.0;
    loop {
        let mut candidates = Vec::new();
        for id in graph.node_ids() {
            let Some(position) = graph.coordinates(id) else {
                continue;
            };
            let distance = center_position.geodesic_distance(&position);
            if distance >= radius_m - tolerance && distance <= radius_m + tolerance {
                candidates.push(id);
            }
        }
        if !candidates.is_empty() {
            candidates.sort_unstable();
            return candidates;
        }

        tolerance *= 2.0;
        if tolerance > MAX_RING_TOLERANCE_M {
            break;
        }
    }

    debug!(center, radius_m, "ring tolerance ceiling reached without candidates");
    Vec::new()
}
