//! Travel network components and graph storage

pub mod components;
pub mod graph;

pub use components::{EdgeRecord, NodeRecord, TravelEdge, TravelNode};
pub use graph::{IndexedPoint, SpatialIndex, TravelGraph};
