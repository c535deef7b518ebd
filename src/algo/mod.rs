//! Isochrone construction and export

pub mod export;
pub mod isochrone;

pub use isochrone::{
    BandAssignment, IsochroneBand, IsochroneGeometry, IsochroneMap, build_isochrone_map,
    bulk_isochrone_maps,
};
