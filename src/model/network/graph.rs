use geo::Point;
use hashbrown::HashMap;
use log::info;
use petgraph::Directed;
use petgraph::graph::{DiGraph, Edges, NodeIndex};
use petgraph::visit::EdgeRef;
use rstar::{AABB, PointDistance, RTree, RTreeObject};

use super::components::{EdgeRecord, NodeRecord, TravelEdge, TravelNode};
use crate::{Error, NodeId, TravelTime};

/// Directed travel network with external-id lookup.
///
/// Edge weights are travel times in a caller-chosen unit; an undirected
/// network is modeled by inserting both edge directions.
#[derive(Debug, Clone, Default)]
pub struct TravelGraph {
    pub(crate) graph: DiGraph<TravelNode, TravelEdge>,
    node_lookup: HashMap<NodeId, NodeIndex>,
}

impl TravelGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from the tabular network form.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate node ids or edges referencing unknown
    /// nodes.
    pub fn from_records(nodes: &[NodeRecord], edges: &[EdgeRecord]) -> Result<Self, Error> {
        let mut graph = Self {
            graph: DiGraph::with_capacity(nodes.len(), edges.len()),
            node_lookup: HashMap::with_capacity(nodes.len()),
        };
        for node in nodes {
            graph.add_node(node.id, node.x, node.y)?;
        }
        for edge in edges {
            graph.add_edge(edge.from, edge.to, edge.travel_time)?;
        }
        info!(
            "Built travel graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Adds a node with planar coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is already present.
    pub fn add_node(&mut self, id: NodeId, x: f64, y: f64) -> Result<(), Error> {
        match self.node_lookup.entry(id) {
            hashbrown::hash_map::Entry::Occupied(_) => Err(Error::DuplicateNode(id)),
            hashbrown::hash_map::Entry::Vacant(entry) => {
                let index = self.graph.add_node(TravelNode {
                    id,
                    geometry: Point::new(x, y),
                });
                entry.insert(index);
                Ok(())
            }
        }
    }

    /// Adds a directed edge between two existing nodes.
    ///
    /// The weight is not inspected here; [`TravelGraph::validate`] checks
    /// all weights before any routing runs.
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint is unknown.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, travel_time: TravelTime) -> Result<(), Error> {
        let source = self.index_of(from).ok_or(Error::MissingNode(from))?;
        let target = self.index_of(to).ok_or(Error::MissingNode(to))?;
        self.graph.add_edge(source, target, TravelEdge { weight: travel_time });
        Ok(())
    }

    /// Checks that every edge weight is a finite non-negative travel time.
    ///
    /// # Errors
    ///
    /// Returns the first offending edge.
    pub fn validate(&self) -> Result<(), Error> {
        for edge in self.graph.edge_references() {
            let weight = edge.weight().weight;
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::InvalidWeight {
                    from: self.graph[edge.source()].id,
                    to: self.graph[edge.target()].id,
                    weight,
                });
            }
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node_lookup.contains_key(&id)
    }

    /// Coordinates of a node, if present.
    pub fn geometry(&self, id: NodeId) -> Option<Point<f64>> {
        self.index_of(id).map(|index| self.graph[index].geometry)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.node_weights().map(|node| node.id)
    }

    pub(crate) fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.node_lookup.get(&id).copied()
    }

    pub(crate) fn id_of(&self, index: NodeIndex) -> NodeId {
        self.graph[index].id
    }

    pub(crate) fn edges(&self, node: NodeIndex) -> Edges<'_, TravelEdge, Directed> {
        self.graph.edges(node)
    }
}

/// Node coordinates paired with the node id, for the R*-tree
#[derive(Debug, Clone, Copy)]
pub struct IndexedPoint {
    pub point: [f64; 2],
    pub node: NodeId,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index over graph nodes for snapping arbitrary coordinates to
/// the nearest network node.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: RTree<IndexedPoint>,
}

impl SpatialIndex {
    pub fn new(graph: &TravelGraph) -> Self {
        let points: Vec<IndexedPoint> = graph
            .graph
            .node_weights()
            .map(|node| IndexedPoint {
                point: [node.geometry.x(), node.geometry.y()],
                node: node.id,
            })
            .collect();
        Self {
            tree: RTree::bulk_load(points),
        }
    }

    /// Nearest network node to the given planar coordinates.
    pub fn nearest_node(&self, x: f64, y: f64) -> Option<NodeId> {
        self.tree.nearest_neighbor(&[x, y]).map(|entry| entry.node)
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> TravelGraph {
        let mut graph = TravelGraph::new();
        graph.add_node(1, 0.0, 0.0).unwrap();
        graph.add_node(2, 100.0, 0.0).unwrap();
        graph.add_node(3, 0.0, 100.0).unwrap();
        graph.add_edge(1, 2, 4.0).unwrap();
        graph.add_edge(2, 3, 6.0).unwrap();
        graph
    }

    #[test]
    fn duplicate_node_is_rejected() {
        let mut graph = triangle();
        assert!(matches!(
            graph.add_node(2, 5.0, 5.0),
            Err(Error::DuplicateNode(2))
        ));
    }

    #[test]
    fn edge_to_unknown_node_is_rejected() {
        let mut graph = triangle();
        assert!(matches!(
            graph.add_edge(1, 99, 1.0),
            Err(Error::MissingNode(99))
        ));
    }

    #[test]
    fn validate_flags_negative_and_non_finite_weights() {
        let mut graph = triangle();
        graph.add_edge(3, 1, -2.0).unwrap();
        assert!(matches!(
            graph.validate(),
            Err(Error::InvalidWeight { from: 3, to: 1, .. })
        ));

        let mut graph = triangle();
        graph.add_edge(3, 1, f64::NAN).unwrap();
        assert!(graph.validate().is_err());
    }

    #[test]
    fn nearest_node_snaps_to_closest_coordinates() {
        let graph = triangle();
        let index = SpatialIndex::new(&graph);
        assert_eq!(index.nearest_node(90.0, 10.0), Some(2));
        assert_eq!(index.nearest_node(-5.0, -5.0), Some(1));
        assert_eq!(index.len(), 3);
    }
}
