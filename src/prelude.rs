// Re-export key components
pub use crate::algo::isochrone::{
    BandAssignment, IsochroneBand, IsochroneGeometry, IsochroneMap, build_isochrone_map,
    bulk_isochrone_maps,
};
pub use crate::error::Error;
pub use crate::model::{EdgeRecord, NodeRecord, SpatialIndex, TravelEdge, TravelGraph, TravelNode};
pub use crate::routing::travel_times;

// Core types for the travel network
pub use crate::NodeId;
pub use crate::TravelTime;
