pub mod dijkstra;
pub mod a_star;
mod shortest_path;

use std::cmp::Ordering;

use ordered_float::OrderedFloat;

use shortest_path::shortest_path;

use crate::collections::FxIndexMap;
use crate::errors::RouteResult;
use crate::graph::Graph;

pub use a_star::AStar;
pub use dijkstra::{Dijkstra, dijkstra};

/// Type alias for the node map used in path planning algorithms
/// The searches use `GraphNodeMap<usize, f64>`; reconstruction only needs
/// the parent links, so it stays generic over key and cost
/// N: Node - key of the search node, the facility index in the searches
/// C: Cost of reaching the node from the start
/// The tuple contains (parent_index, cost) where:
/// - parent_index is the index of the parent node in the map
/// - cost is the total cost to reach this node from the start
pub(crate) type GraphNodeMap<N, C> = FxIndexMap<N, (usize, C)>;

/// parent_index marker for the start node
pub(crate) const NO_PARENT: usize = usize::MAX;


/// Result of a route query
/// An unreachable goal is a normal result: empty path with infinite cost
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub path: Vec<String>, // start to goal, both inclusive
    pub cost: f64,
}

impl Route {

    pub fn unreachable() -> Self {
        Self { path: Vec::new(), cost: f64::INFINITY }
    }

    /// Single node route for start == goal
    pub fn trivial(name: &str) -> Self {
        Self { path: vec![name.to_string()], cost: 0.0 }
    }

    pub fn is_reachable(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of edges travelled
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}


/// Shortest path search over a built facility graph
/// Implementations only read the graph, so one graph may serve many concurrent queries
pub trait Pathfinder: Send + Sync {
    /// Fails with `UnknownNode` when either name is missing from the graph
    fn shortest_path(&self, graph: &Graph, start: &str, end: &str) -> RouteResult<Route>;
}


/// Turn a settled search map into a named route
fn into_route(graph: &Graph, node_map: &GraphNodeMap<usize, f64>, goal_index: Option<usize>) -> Route {
    match goal_index {
        Some(goal_index) => {
            let cost = node_map.get_index(goal_index).map_or(f64::INFINITY, |(_, &(_, c))| c);
            let path = shortest_path(node_map, goal_index)
                .into_iter()
                .map(|node| graph.name_at(node).to_string())
                .collect();
            Route { path, cost }
        }
        None => Route::unreachable(),
    }
}


/// Priority queue entry shared by both searches
/// BinaryHeap is a max-heap, so ordering is reversed to pop the smallest priority first.
/// Equal priorities pop in push order (`seq`), which keeps results reproducible
#[derive(Debug)]
struct QueueEntry {
    index: usize, // index in the node map
    cost: f64, // accumulated edge weight
    priority: OrderedFloat<f64>, // cost for Dijkstra, cost + heuristic for A*
    seq: usize,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.priority.cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}
impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}
impl Eq for QueueEntry {}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn test_queue_pops_lowest_priority_then_push_order() {
        let mut heap = BinaryHeap::new();
        for (seq, (index, priority)) in [(0, 5.0), (1, 1.0), (2, 5.0), (3, 1.0)].into_iter().enumerate() {
            heap.push(QueueEntry { index, cost: priority, priority: OrderedFloat(priority), seq });
        }

        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|e| e.index)).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_route_helpers() {
        let route = Route::trivial("A");
        assert!(route.is_reachable());
        assert_eq!(route.hop_count(), 0);

        let route = Route::unreachable();
        assert!(!route.is_reachable());
        assert_eq!(route.hop_count(), 0);
        assert!(route.cost.is_infinite());
    }
}
