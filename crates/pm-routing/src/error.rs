//! Routing-subsystem error type.
//!
//! "No route" is not an error: the solver and planner report it as an empty
//! [`Route`](crate::Route).  The variants here are either caller mistakes
//! (bad ids, bad weights, bad config, bad input files) or internal invariant
//! violations.

use thiserror::Error;

use pm_core::{CoreError, NodeId};

/// Errors produced by `pm-routing`.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("invalid edge weight {length_m} between {from} and {to}")]
    InvalidWeight { from: NodeId, to: NodeId, length_m: f64 },

    /// Predecessor links did not lead back to the source even though the
    /// target was reached.  Indicates corrupted graph or solver bookkeeping.
    #[error("predecessor chain from {to} stalled at {stalled_at} before reaching {from}")]
    BrokenPredecessorChain { from: NodeId, to: NodeId, stalled_at: NodeId },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "geojson")]
    #[error("GeoJSON error: {0}")]
    GeoJson(String),
}

pub type RoutingResult<T> = Result<T, RoutingError>;
