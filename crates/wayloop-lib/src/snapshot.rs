//! Graph snapshots on disk.
//!
//! A snapshot is a pair of CSV files describing an already-extracted road
//! network: `nodes.csv` with `id,lat,lon` rows and `edges.csv` with
//! `from,to` rows. Edge weights are not stored; each edge costs the geodesic
//! distance between its endpoints, which is what live ingestion provides.

use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::warn;

use crate::error::{Error, Result};
use crate::graph::{Cost, Graph};

#[derive(Debug, Deserialize)]
struct NodeRecord {
    id: i64,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    from: i64,
    to: i64,
}

/// Load a graph from a snapshot's node and edge files.
///
/// Malformed rows abort the load; rows referencing unknown node ids are
/// skipped with a warning so one stray edge cannot sink an entire snapshot.
pub fn load_graph(nodes_path: &Path, edges_path: &Path) -> Result<Graph> {
    for path in [nodes_path, edges_path] {
        if !path.exists() {
            return Err(Error::SnapshotNotFound {
                path: path.to_path_buf(),
            });
        }
    }

    let mut graph = Graph::new();

    let mut reader = ReaderBuilder::new().trim(Trim::All).from_path(nodes_path)?;
    for record in reader.deserialize::<NodeRecord>() {
        let record = record?;
        if !graph.add_node(record.id, record.lat, record.lon) {
            warn!(id = record.id, "duplicate node id in snapshot, keeping the first");
        }
    }

    let mut reader = ReaderBuilder::new().trim(Trim::All).from_path(edges_path)?;
    for record in reader.deserialize::<EdgeRecord>() {
        let record = record?;
        match graph.geodesic_between(record.from, record.to) {
            Some(distance) => {
                graph.add_edge(record.from, record.to, Cost::new(distance));
            }
            None => {
                warn!(
                    from = record.from,
                    to = record.to,
                    "edge references an unknown node, skipped"
                );
            }
        }
    }

    Ok(graph)
}
