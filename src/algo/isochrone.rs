//! Multi-band isochrone construction.
//!
//! One shortest-path expansion from the center, bounded by the largest
//! threshold, yields every node's cumulative travel time; each node is then
//! assigned the smallest threshold it fits under. This produces the same
//! partition as running one reachability pass per threshold from largest to
//! smallest and overwriting assignments as the radius shrinks.

use geo::{ConvexHull, Line, MultiPoint, Point, Polygon};
use hashbrown::HashMap;
use itertools::Itertools;
use log::debug;
use rayon::prelude::*;

use crate::model::TravelGraph;
use crate::routing::shortest_times;
use crate::{Error, NodeId, TravelTime};

/// Enclosing geometry of one isochrone band.
///
/// Bands with fewer than three member nodes cannot form a polygon and
/// degenerate explicitly: no members yield [`IsochroneGeometry::Empty`],
/// one member a point, two members a segment.
#[derive(Debug, Clone, PartialEq)]
pub enum IsochroneGeometry {
    Empty,
    Point(Point<f64>),
    Segment(Line<f64>),
    Polygon(Polygon<f64>),
}

impl IsochroneGeometry {
    pub fn is_empty(&self) -> bool {
        matches!(self, IsochroneGeometry::Empty)
    }

    /// The band geometry as a generic `geo` geometry, `None` when empty.
    pub fn to_geometry(&self) -> Option<geo::Geometry<f64>> {
        match self {
            IsochroneGeometry::Empty => None,
            IsochroneGeometry::Point(point) => Some(geo::Geometry::Point(*point)),
            IsochroneGeometry::Segment(line) => Some(geo::Geometry::Line(*line)),
            IsochroneGeometry::Polygon(polygon) => Some(geo::Geometry::Polygon(polygon.clone())),
        }
    }
}

/// One isochrone time band: the nodes whose minimal travel time from the
/// center falls under this threshold but over every smaller one.
#[derive(Debug, Clone)]
pub struct IsochroneBand {
    /// Band threshold, in the same unit as edge weights
    pub threshold: TravelTime,
    /// External ids of member nodes
    pub nodes: Vec<NodeId>,
    /// Enclosing geometry over member node coordinates
    pub geometry: IsochroneGeometry,
}

/// Band membership of a single node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandAssignment {
    /// Index into [`IsochroneMap::bands`]; renderers key their palette on it
    Band(usize),
    /// Not reachable under any threshold
    Unreached,
}

/// Result of one isochrone build: bands in ascending threshold order plus
/// the retained unreached group.
#[derive(Debug, Clone)]
pub struct IsochroneMap {
    center: NodeId,
    bands: Vec<IsochroneBand>,
    unreached: Vec<NodeId>,
}

impl IsochroneMap {
    pub fn center(&self) -> NodeId {
        self.center
    }

    /// Bands in ascending threshold order. Empty bands are retained so that
    /// positional indexing by threshold stays stable.
    pub fn bands(&self) -> &[IsochroneBand] {
        &self.bands
    }

    /// Nodes not reachable under any threshold. Kept for rendering as a
    /// neutral group, never part of [`IsochroneMap::bands`].
    pub fn unreached(&self) -> &[NodeId] {
        &self.unreached
    }

    /// Band membership per node. Every graph node appears exactly once,
    /// either in a band or as unreached.
    pub fn assignments(&self) -> HashMap<NodeId, BandAssignment> {
        let mut assignments = HashMap::new();
        for (index, band) in self.bands.iter().enumerate() {
            for &node in &band.nodes {
                assignments.insert(node, BandAssignment::Band(index));
            }
        }
        for &node in &self.unreached {
            assignments.insert(node, BandAssignment::Unreached);
        }
        assignments
    }
}

/// Builds an isochrone map around `center`.
///
/// Each node is assigned the smallest threshold under which it is reachable,
/// where reachability means cumulative shortest travel time along graph
/// edges, not hop count. Returned bands are ordered by ascending threshold;
/// thresholds are deduplicated first. The center itself travels at cost 0
/// and always lands in the smallest band.
///
/// Disconnected graphs are valid input: nodes beyond every threshold end up
/// in the unreached group.
///
/// # Errors
///
/// Returns an error if the graph is empty, `center` is absent, any edge
/// weight is negative or non-finite, or `thresholds` is empty or contains a
/// non-positive or non-finite value.
pub fn build_isochrone_map(
    graph: &TravelGraph,
    center: NodeId,
    thresholds: &[TravelTime],
) -> Result<IsochroneMap, Error> {
    if graph.is_empty() {
        return Err(Error::EmptyGraph);
    }
    graph.validate()?;
    let start = graph.index_of(center).ok_or(Error::MissingNode(center))?;
    let thresholds = normalize_thresholds(thresholds)?;

    let max_threshold = *thresholds.last().unwrap_or(&0.0);
    let times = shortest_times(graph, start, Some(max_threshold));

    let mut members: Vec<Vec<NodeId>> = vec![Vec::new(); thresholds.len()];
    let mut unreached = Vec::new();
    for index in graph.graph.node_indices() {
        let id = graph.id_of(index);
        let band = times
            .get(&index)
            .and_then(|time| thresholds.iter().position(|threshold| time <= threshold));
        match band {
            Some(band) => members[band].push(id),
            None => unreached.push(id),
        }
    }

    let bands = thresholds
        .iter()
        .zip(members)
        .map(|(&threshold, nodes)| {
            let geometry = band_geometry(graph, &nodes);
            IsochroneBand {
                threshold,
                nodes,
                geometry,
            }
        })
        .collect::<Vec<_>>();

    debug!(
        "Isochrone map for node {center}: {} bands, {} unreached nodes",
        bands.len(),
        unreached.len()
    );

    Ok(IsochroneMap {
        center,
        bands,
        unreached,
    })
}

/// Builds isochrone maps for several centers over the same graph.
///
/// # Errors
///
/// Fails on the first invalid center; input validation is the same as for
/// [`build_isochrone_map`].
pub fn bulk_isochrone_maps(
    graph: &TravelGraph,
    centers: &[NodeId],
    thresholds: &[TravelTime],
) -> Result<Vec<IsochroneMap>, Error> {
    centers
        .par_iter()
        .map(|&center| build_isochrone_map(graph, center, thresholds))
        .collect()
}

/// Sorted, deduplicated, validated thresholds
fn normalize_thresholds(thresholds: &[TravelTime]) -> Result<Vec<TravelTime>, Error> {
    if thresholds.is_empty() {
        return Err(Error::EmptyThresholds);
    }
    if let Some(&bad) = thresholds
        .iter()
        .find(|threshold| !threshold.is_finite() || **threshold <= 0.0)
    {
        return Err(Error::InvalidThreshold(bad));
    }
    Ok(thresholds
        .iter()
        .copied()
        .sorted_by(f64::total_cmp)
        .dedup()
        .collect())
}

/// Enclosing geometry over band member coordinates: convex hull for three
/// or more nodes, degenerating to a segment, point, or nothing below that.
fn band_geometry(graph: &TravelGraph, nodes: &[NodeId]) -> IsochroneGeometry {
    let points: Vec<Point<f64>> = nodes
        .iter()
        .filter_map(|&node| graph.geometry(node))
        .collect();

    match points.as_slice() {
        [] => IsochroneGeometry::Empty,
        [point] => IsochroneGeometry::Point(*point),
        [a, b] => IsochroneGeometry::Segment(Line::new(a.0, b.0)),
        _ => {
            let hull = MultiPoint::from(points).convex_hull();
            IsochroneGeometry::Polygon(hull)
        }
    }
}
