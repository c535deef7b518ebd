use std::{cmp::Ordering, collections::BinaryHeap};

use hashbrown::HashMap;
use petgraph::{graph::NodeIndex, visit::EdgeRef};

use crate::model::TravelGraph;
use crate::{Error, NodeId, TravelTime};

#[derive(Copy, Clone)]
struct State {
    cost: f64,
    node: NodeIndex,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node && self.cost.total_cmp(&other.cost) == Ordering::Equal
    }
}

impl Eq for State {}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap)
        other.cost.total_cmp(&self.cost)
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra's algorithm over the travel network
/// Returns a map of node indices to cumulative travel times from `start`
pub(crate) fn shortest_times(
    graph: &TravelGraph,
    start: NodeIndex,
    max_cost: Option<f64>,
) -> HashMap<NodeIndex, f64> {
    let mut distances: HashMap<NodeIndex, f64> = HashMap::new();
    let mut heap = BinaryHeap::new();

    // Start node has distance 0
    heap.push(State {
        cost: 0.0,
        node: start,
    });
    distances.insert(start, 0.0);

    while let Some(State { cost, node }) = heap.pop() {
        // Skip if we've found a better path
        if let Some(&best) = distances.get(&node) {
            if cost > best {
                continue;
            }
        }

        // Check max cost constraint
        if let Some(max) = max_cost {
            if cost > max {
                continue;
            }
        }

        // Examine neighbors
        for edge in graph.edges(node) {
            let next = edge.target();
            let travel_time = edge.weight().weight;
            let next_cost = cost + travel_time;

            // Add or update distance if better using Entry API
            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    distances
}

/// One-to-all travel times from `center`, optionally bounded by `cutoff`.
///
/// Nodes whose shortest cumulative travel time exceeds the cutoff are
/// omitted from the result.
///
/// # Errors
///
/// Returns an error if `center` is absent or any edge weight is negative
/// or non-finite.
pub fn travel_times(
    graph: &TravelGraph,
    center: NodeId,
    cutoff: Option<TravelTime>,
) -> Result<HashMap<NodeId, TravelTime>, Error> {
    graph.validate()?;
    let start = graph.index_of(center).ok_or(Error::MissingNode(center))?;

    let times = shortest_times(graph, start, cutoff);
    let result = times
        .into_iter()
        .filter(|(_, time)| cutoff.is_none_or(|max| *time <= max))
        .map(|(index, time)| (graph.id_of(index), time))
        .collect();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1 --2.0--> 2 --3.0--> 3 --10.0--> 4, plus a slow direct 1 -> 3
    fn line_graph() -> TravelGraph {
        let mut graph = TravelGraph::new();
        for (id, x) in [(1, 0.0), (2, 1.0), (3, 2.0), (4, 3.0)] {
            graph.add_node(id, x, 0.0).unwrap();
        }
        graph.add_edge(1, 2, 2.0).unwrap();
        graph.add_edge(2, 3, 3.0).unwrap();
        graph.add_edge(3, 4, 10.0).unwrap();
        graph.add_edge(1, 3, 9.0).unwrap();
        graph
    }

    #[test]
    fn picks_cheapest_path() {
        let graph = line_graph();
        let times = travel_times(&graph, 1, None).unwrap();
        assert_eq!(times[&1], 0.0);
        assert_eq!(times[&2], 2.0);
        assert_eq!(times[&3], 5.0);
        assert_eq!(times[&4], 15.0);
    }

    #[test]
    fn cutoff_bounds_the_search() {
        let graph = line_graph();
        let times = travel_times(&graph, 1, Some(6.0)).unwrap();
        assert_eq!(times.len(), 3);
        assert!(!times.contains_key(&4));
    }

    #[test]
    fn unreachable_nodes_are_absent() {
        let mut graph = line_graph();
        graph.add_node(5, 10.0, 10.0).unwrap();
        let times = travel_times(&graph, 1, None).unwrap();
        assert!(!times.contains_key(&5));
    }

    #[test]
    fn missing_center_is_an_error() {
        let graph = line_graph();
        assert!(matches!(
            travel_times(&graph, 42, None),
            Err(Error::MissingNode(42))
        ));
    }
}
