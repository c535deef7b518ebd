//! Travel network model

pub mod network;

pub use network::{EdgeRecord, IndexedPoint, NodeRecord, SpatialIndex, TravelEdge, TravelGraph, TravelNode};
