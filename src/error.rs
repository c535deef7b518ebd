use thiserror::Error;

use crate::NodeId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Graph contains no nodes")]
    EmptyGraph,
    #[error("Node {0} not found in the graph")]
    MissingNode(NodeId),
    #[error("Node {0} is already present in the graph")]
    DuplicateNode(NodeId),
    #[error("Edge {from} -> {to} has weight {weight}, expected a finite non-negative travel time")]
    InvalidWeight {
        from: NodeId,
        to: NodeId,
        weight: f64,
    },
    #[error("Threshold list is empty")]
    EmptyThresholds,
    #[error("Threshold {0} is not a finite positive travel time")]
    InvalidThreshold(f64),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
