use std::path::PathBuf;

use thiserror::Error;

use crate::graph::NodeId;

/// Convenient result alias for the wayloop library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Search-level conditions (unreachable destinations, empty candidate rings,
/// stale queue entries) are absorbed by the engine and show up as reduced
/// result counts instead of errors. Only structurally invalid input surfaces
/// here.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a request names a node id that is not present in the graph.
    #[error("unknown node id: {id}")]
    UnknownNode { id: NodeId },

    /// Raised when a request carries values the engine cannot work with.
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// Raised when a snapshot file is missing on disk.
    #[error("snapshot file not found at {path}")]
    SnapshotNotFound { path: PathBuf },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
