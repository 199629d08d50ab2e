use crate::errors::{RouteError, RouteResult};
use crate::graph::Graph;
use super::{GraphNodeMap, NO_PARENT, Pathfinder, QueueEntry, Route, into_route};

use std::collections::BinaryHeap;
use ordered_float::OrderedFloat;
use indexmap::map::Entry::{Occupied, Vacant};
use tracing::debug;



/// A* Algorithm guided by great-circle distance to the goal
/// https://en.wikipedia.org/wiki/A*_search_algorithm
///
/// The heuristic is the haversine distance in kilometers. The result is only
/// optimal while that distance never exceeds the remaining edge weighted cost,
/// i.e. edge weights are at least the distance they span. With other weight
/// schemes a suboptimal route may be returned, without an error.
#[derive(Clone, Copy, Debug, Default)]
pub struct AStar;

impl Pathfinder for AStar {
    fn shortest_path(&self, graph: &Graph, start: &str, end: &str) -> RouteResult<Route> {
        self.plan(graph, start, end)
    }
}

impl AStar {

    /// From start node, traverse through graph until the goal is popped
    /// Returns an empty path with infinite cost when `end` cannot be reached
    pub fn plan(&self, graph: &Graph, start: &str, end: &str) -> RouteResult<Route> {
        let start_node = graph.index_of(start).ok_or_else(|| RouteError::unknown_node(start))?;
        let goal_node = graph.index_of(end).ok_or_else(|| RouteError::unknown_node(end))?;

        if start_node == goal_node {
            return Ok(Route::trivial(start));
        }

        let (node_map, goal_index) = self.build_graph(graph, start_node, goal_node);
        debug!(start, end, labelled = node_map.len(), found = goal_index.is_some(), "a* search finished");

        Ok(into_route(graph, &node_map, goal_index))
    }


    /// Traverses the graph using A* algorithm
    /// Returns a map of nodes with their smallest costs along with the index of the goal node
    fn build_graph(&self, graph: &Graph, start: usize, goal: usize) -> (GraphNodeMap<usize, f64>, Option<usize>) {
        // Open List
        // Nodes that need to be evaluated, implemented as priority queue
        // Sorting is done by f_cost (cost + heuristic)
        let mut open_list: BinaryHeap<QueueEntry> = BinaryHeap::new();
        let mut seq = 0;

        // Evaluated nodes with (parent_index, cost), cost is the accumulated edge weight only
        // The heuristic orders the queue but never reaches the reported cost
        let mut closed_list: GraphNodeMap<usize, f64> = GraphNodeMap::default();

        let start_index = closed_list.insert_full(start, (NO_PARENT, 0.0)).0;
        open_list.push(QueueEntry {
            index: start_index,
            cost: 0.0,
            priority: OrderedFloat(graph.distance_between(start, goal)),
            seq,
        });

        while let Some(QueueEntry { index, cost, .. }) = open_list.pop() {

            // fetch current best cost for node
            let Some((&node, &(_, c))) = closed_list.get_index(index) else {
                continue;
            };

            // If cost of new node from BinaryHeap is higher than the best cost, skip it
            // This implies we've already found a better path to this node
            if cost > c {
                continue;
            }

            // Check if we've reached the goal
            if node == goal {
                return (closed_list, Some(index));
            }

            for edge in graph.edges_at(node) {

                // This is confirmed cost, not heuristic
                let new_cost = c + edge.weight;

                let neighbor_index = match closed_list.entry(edge.target) {
                    Vacant(e) => {
                        // This is the first time we're seeing this neighbor
                        let i = e.index();
                        e.insert((index, new_cost));
                        i
                    }
                    Occupied(mut e) => {
                        if new_cost < e.get().1 {
                            // We've found a better path to this neighbor
                            e.insert((index, new_cost));
                            e.index()
                        } else {
                            continue;
                        }
                    }
                };

                let h_cost = graph.distance_between(edge.target, goal);
                seq += 1;
                open_list.push(QueueEntry {
                    index: neighbor_index,
                    cost: new_cost,
                    priority: OrderedFloat(new_cost + h_cost),
                    seq,
                });
            }
        }

        (closed_list, None)
    }
}
