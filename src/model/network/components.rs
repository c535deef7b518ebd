//! Travel network components - nodes, edges, and their tabular form

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::{NodeId, TravelTime};

/// Travel network node
#[derive(Debug, Clone)]
pub struct TravelNode {
    /// External ID of the node
    pub id: NodeId,
    /// Node coordinates in a planar projection
    pub geometry: Point<f64>,
}

/// Travel network edge (street segment or other link)
#[derive(Debug, Clone)]
pub struct TravelEdge {
    /// Traversal time, in the same unit as isochrone thresholds
    pub weight: TravelTime,
}

impl TravelEdge {
    pub fn travel_time(&self) -> TravelTime {
        self.weight
    }

    /// Derives a traversal time in minutes from segment length and an
    /// assumed travel speed.
    pub fn from_length_and_speed(length_m: f64, speed_kmh: f64) -> Self {
        let meters_per_minute = speed_kmh * 1000.0 / 60.0;
        Self {
            weight: length_m / meters_per_minute,
        }
    }
}

/// Node row of the tabular network form
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
}

/// Edge row of the tabular network form
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: NodeId,
    pub to: NodeId,
    pub travel_time: TravelTime,
}
