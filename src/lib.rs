//! Multi-band isochrone construction over weighted travel networks.
//!
//! An isochrone map answers "what can I reach from here within 5, 10, 15
//! minutes?" over a street (or any other) network whose edge weights are
//! travel times. This crate takes a [`model::TravelGraph`], a center node
//! and a set of time thresholds, partitions the reachable nodes into time
//! bands, and returns one enclosing geometry per band, ready to hand to a
//! renderer as GeoJSON or WKT.
//!
//! Network acquisition, coordinate projection and drawing are the caller's
//! concern; coordinates are expected to be in a planar projection so that
//! hull geometry is meaningful.

pub mod algo;
pub mod error;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;

/// External identifier of a network node, as assigned by the data source
/// (e.g. an OSM node id).
pub type NodeId = u64;

/// Travel time in the caller's unit. Edge weights and isochrone thresholds
/// must use the same unit.
pub type TravelTime = f64;
