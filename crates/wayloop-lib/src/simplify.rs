//! Graph-simplification passes.
//!
//! Raw road extracts carry long chains of geometry-only waypoints and bursts
//! of near-duplicate vertices around junctions. Both passes shrink the graph
//! searched by A* without changing reachable distances: degree-2 chains
//! collapse into single edges, then near-coincident nodes merge.

use std::collections::HashMap;

use tracing::debug;

use crate::graph::{Cost, Graph, NodeId, METERS_PER_DEGREE};

impl Graph {
    /// Run both simplification passes, collapse first.
    ///
    /// Collapsing ahead of the merge keeps the merge grid small: every
    /// removed pass-through vertex is one fewer merge candidate. Call once
    /// per freshly ingested graph, before the first search.
    pub fn simplify(&mut self, merge_threshold_m: f64) {
        let nodes_before = self.node_count();
        let collapsed = self.collapse_degree_two();
        let merged = self.merge_close_nodes(merge_threshold_m);
        debug!(
            nodes_before,
            collapsed,
            merged,
            nodes_after = self.node_count(),
            edges_after = self.edge_count(),
            "graph simplified"
        );
    }

    /// Remove every pass-through vertex, repeating until none remain.
    ///
    /// A node of degree exactly 2 is replaced by a direct edge between its
    /// two neighbours, weighted with the sum of the removed edges. Removal
    /// can drop a neighbour to degree 2 (when it was already connected to
    /// the opposite side), so passes repeat to a fixpoint.
    pub fn collapse_degree_two(&mut self) -> usize {
        let mut removed_total = 0;
        loop {
            let candidates: Vec<NodeId> = self
                .node_ids()
                .filter(|&id| self.degree(id) == 2)
                .collect();

            let mut removed_this_pass = 0;
            for id in candidates {
                // An earlier collapse in this pass may have retired the node
                // or changed its degree.
                if self.degree(id) != 2 {
                    continue;
                }
                let endpoints = {
                    let mut ends = self.neighbours(id);
                    (ends.next(), ends.next())
                };
                let (Some((first, first_cost)), Some((second, second_cost))) = endpoints else {
                    continue;
                };

                let through = Cost::new(first_cost.meters() + second_cost.meters());
                let replacement = match self.edge_cost(first, second) {
                    Some(existing) if existing.meters() <= through.meters() => existing,
                    _ => through,
                };

                self.remove_node(id);
                self.add_edge(first, second, replacement);
                removed_this_pass += 1;
            }

            removed_total += removed_this_pass;
            if removed_this_pass == 0 {
                return removed_total;
            }
        }
    }

    /// Merge nodes closer than `threshold_m` meters into single vertices.
    ///
    /// Nodes are bucketed into a uniform grid of threshold-sized cells keyed
    /// by truncated coordinate division; merging only considers pairs inside
    /// one cell. Pairs straddling a cell boundary can be missed, which costs
    /// merge recall but never correctness. Within a cell the true geodesic
    /// distance decides.
    pub fn merge_close_nodes(&mut self, threshold_m: f64) -> usize {
        if threshold_m <= 0.0 {
            return 0;
        }
        let cell_degrees = threshold_m / METERS_PER_DEGREE;

        let mut cells: HashMap<(i64, i64), Vec<NodeId>> = HashMap::new();
        for id in self.node_ids().collect::<Vec<_>>() {
            let Some(position) = self.coordinates(id) else {
                continue;
            };
            let key = (
                (position.lat / cell_degrees).floor() as i64,
                (position.lon / cell_degrees).floor() as i64,
            );
            cells.entry(key).or_default().push(id);
        }

        let mut removed = 0;
        for bucket in cells.values_mut() {
            bucket.sort_unstable();
            for i in 0..bucket.len() {
                let keep = bucket[i];
                if !self.contains(keep) {
                    continue;
                }
                for j in (i + 1)..bucket.len() {
                    let candidate = bucket[j];
                    if !self.contains(candidate) {
                        continue;
                    }
                    let Some(distance) = self.geodesic_between(keep, candidate) else {
                        continue;
                    };
                    if distance < threshold_m {
                        self.merge_into(keep, candidate);
                        removed += 1;
                    }
                }
            }
        }
        removed
    }

    /// Re-attach all of `remove`'s edges to `keep`, then delete `remove`.
    ///
    /// Edge costs carry over unchanged; when both nodes already connect to
    /// the same neighbour the cheaper edge wins. Any edge between the pair
    /// itself is dropped rather than becoming a self-loop.
    fn merge_into(&mut self, keep: NodeId, remove: NodeId) {
        let edges: Vec<(NodeId, Cost)> = self.neighbours(remove).collect();
        self.remove_node(remove);
        for (target, cost) in edges {
            if target == keep || !self.contains(target) {
                continue;
            }
            match self.edge_cost(keep, target) {
                Some(existing) if existing.meters() <= cost.meters() => {}
                _ => {
                    self.add_edge(keep, target, cost);
                }
            }
        }
    }
}
