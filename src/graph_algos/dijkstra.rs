use crate::errors::{RouteError, RouteResult};
use crate::graph::Graph;
use super::{GraphNodeMap, NO_PARENT, Pathfinder, QueueEntry, Route, into_route};

use std::collections::BinaryHeap;
use ordered_float::OrderedFloat;
use indexmap::map::Entry::{Occupied, Vacant};
use tracing::debug;



/// Uniform cost search
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
#[derive(Clone, Copy, Debug, Default)]
pub struct Dijkstra;

impl Pathfinder for Dijkstra {
    fn shortest_path(&self, graph: &Graph, start: &str, end: &str) -> RouteResult<Route> {
        dijkstra(graph, start, end)
    }
}


/// Identify the shortest path between two facilities using Dijkstra's Algorithm
/// Returns an empty path with infinite cost when `end` cannot be reached
pub fn dijkstra(graph: &Graph, start: &str, end: &str) -> RouteResult<Route> {
    let start_node = graph.index_of(start).ok_or_else(|| RouteError::unknown_node(start))?;
    let goal_node = graph.index_of(end).ok_or_else(|| RouteError::unknown_node(end))?;

    // a node is never its own predecessor, answer the trivial query directly
    if start_node == goal_node {
        return Ok(Route::trivial(start));
    }

    // Build the graph - terminates when the goal is met
    let (node_map, goal_index) = build_dijkstra_graph(graph, start_node, goal_node);
    debug!(start, end, labelled = node_map.len(), found = goal_index.is_some(), "dijkstra search finished");

    Ok(into_route(graph, &node_map, goal_index))
}


/// Traverses the graph using Dijkstra's algorithm
/// Returns a map of nodes with their smallest costs along with the index of the goal node
fn build_dijkstra_graph(graph: &Graph, start: usize, goal: usize) -> (GraphNodeMap<usize, f64>, Option<usize>) {

    // Nodes to visit - popped smallest cost first
    let mut nodes_to_visit: BinaryHeap<QueueEntry> = BinaryHeap::new();
    let mut seq = 0;

    // The tuple contains (parent_index, cost) where parent_index is the index of the parent node in the map
    // Nodes absent from the map have an implicit cost of +infinity
    let mut nodes_map: GraphNodeMap<usize, f64> = GraphNodeMap::default();

    let start_index = nodes_map.insert_full(start, (NO_PARENT, 0.0)).0;
    nodes_to_visit.push(QueueEntry {
        index: start_index,
        cost: 0.0,
        priority: OrderedFloat(0.0),
        seq,
    });

    // Loop over each node to visit, removing the smallest node
    while let Some(QueueEntry { index, cost, .. }) = nodes_to_visit.pop() {

        // fetch current best cost for node
        let Some((&node, &(_, c))) = nodes_map.get_index(index) else {
            continue;
        };

        // A better path to this node was already settled, stale entry
        if cost > c {
            continue;
        }

        // Non-negative weights make the popped cost final
        if node == goal {
            return (nodes_map, Some(index));
        }

        for edge in graph.edges_at(node) {

            // new cost to reach this node = edge cost + node cost
            let new_cost = c + edge.weight;

            let neighbor_index = match nodes_map.entry(edge.target) {
                Vacant(e) => {
                    let i = e.index();
                    e.insert((index, new_cost));
                    i
                }
                Occupied(mut e) => {
                    // relax only on a strictly shorter path
                    if new_cost < e.get().1 {
                        e.insert((index, new_cost));
                        e.index()
                    } else {
                        continue;
                    }
                }
            };

            seq += 1;
            nodes_to_visit.push(QueueEntry {
                index: neighbor_index,
                cost: new_cost,
                priority: OrderedFloat(new_cost),
                seq,
            });
        }
    }

    (nodes_map, None)
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    // A(0,0) - B(0,1) - C(0,2) with a direct but more expensive A - C edge
    fn create_test_graph() -> Graph {
        let mut graph = Graph::new();
        graph.add_node("A", 0.0, 0.0).unwrap();
        graph.add_node("B", 0.0, 1.0).unwrap();
        graph.add_node("C", 0.0, 2.0).unwrap();
        graph.add_edge("A", "B", 5.0).unwrap();
        graph.add_edge("B", "C", 5.0).unwrap();
        graph.add_edge("A", "C", 20.0).unwrap();
        graph
    }

    // Smallest cost over every simple path, by exhaustive DFS
    fn brute_force_cost(graph: &Graph, start: usize, goal: usize) -> f64 {
        fn walk(graph: &Graph, node: usize, goal: usize, cost: f64, visited: &mut Vec<bool>, best: &mut f64) {
            if node == goal {
                *best = best.min(cost);
                return;
            }
            for edge in graph.edges_at(node) {
                if !visited[edge.target] {
                    visited[edge.target] = true;
                    walk(graph, edge.target, goal, cost + edge.weight, visited, best);
                    visited[edge.target] = false;
                }
            }
        }
        let mut visited = vec![false; graph.node_count()];
        visited[start] = true;
        let mut best = f64::INFINITY;
        walk(graph, start, goal, 0.0, &mut visited, &mut best);
        best
    }

    fn path_cost(graph: &Graph, path: &[String]) -> f64 {
        path.windows(2)
            .map(|pair| {
                graph.neighbours(&pair[0]).unwrap()
                    .into_iter()
                    .filter(|(name, _)| *name == pair[1])
                    .map(|(_, w)| w)
                    .fold(f64::INFINITY, f64::min)
            })
            .sum()
    }

    #[test]
    fn test_dijkstra_prefers_cheaper_two_hop_path() {
        let graph = create_test_graph();

        let route = dijkstra(&graph, "A", "C").unwrap();

        assert_eq!(route.path, vec!["A", "B", "C"]);
        assert_eq!(route.cost, 10.0);
    }

    #[test]
    fn test_dijkstra_start_equals_goal() {
        let graph = create_test_graph();
        for name in ["A", "B", "C"] {
            assert_eq!(dijkstra(&graph, name, name).unwrap(), Route::trivial(name));
        }
    }

    #[test]
    fn test_dijkstra_handles_unreachable_goal() {
        let mut graph = create_test_graph();
        graph.add_node("D", 1.0, 1.0).unwrap();

        let route = dijkstra(&graph, "A", "D").unwrap();

        assert!(route.path.is_empty());
        assert_eq!(route.cost, f64::INFINITY);
    }

    #[test]
    fn test_dijkstra_unknown_nodes() {
        let graph = create_test_graph();

        assert!(matches!(dijkstra(&graph, "X", "A"), Err(RouteError::UnknownNode { ref name }) if name == "X"));
        assert!(matches!(dijkstra(&graph, "A", "Y"), Err(RouteError::UnknownNode { ref name }) if name == "Y"));
        // start checked first
        assert!(matches!(dijkstra(&graph, "X", "Y"), Err(RouteError::UnknownNode { ref name }) if name == "X"));
    }

    #[test]
    fn test_dijkstra_zero_weight_edges() {
        let mut graph = create_test_graph();
        graph.add_node("D", 0.0, 3.0).unwrap();
        graph.add_edge("C", "D", 0.0).unwrap();

        let route = dijkstra(&graph, "A", "D").unwrap();
        assert_eq!(route.path, vec!["A", "B", "C", "D"]);
        assert_eq!(route.cost, 10.0);
    }

    #[test]
    fn test_dijkstra_duplicate_edges_use_cheapest() {
        let mut graph = create_test_graph();
        graph.add_edge("A", "C", 3.0).unwrap();

        let route = dijkstra(&graph, "C", "A").unwrap();
        assert_eq!(route.path, vec!["C", "A"]);
        assert_eq!(route.cost, 3.0);
    }

    #[test]
    fn test_dijkstra_equal_cost_paths_are_deterministic() {
        // two equal cost routes A-B-D and A-C-D
        let mut graph = Graph::new();
        for (name, lon) in [("A", 0.0), ("B", 1.0), ("C", 1.0), ("D", 2.0)] {
            graph.add_node(name, 0.0, lon).unwrap();
        }
        graph.add_edge("A", "B", 1.0).unwrap();
        graph.add_edge("A", "C", 1.0).unwrap();
        graph.add_edge("B", "D", 1.0).unwrap();
        graph.add_edge("C", "D", 1.0).unwrap();

        let first = dijkstra(&graph, "A", "D").unwrap();
        for _ in 0..10 {
            assert_eq!(dijkstra(&graph, "A", "D").unwrap(), first);
        }
        // B is pushed before C and relaxes D first
        assert_eq!(first.path, vec!["A", "B", "D"]);
        assert_eq!(first.cost, 2.0);
    }

    #[test]
    fn test_dijkstra_matches_brute_force_on_random_graphs() {
        let mut rng = StdRng::seed_from_u64(17);

        for _ in 0..40 {
            let n = rng.random_range(2..8);
            let mut graph = Graph::new();
            for i in 0..n {
                graph.add_node(&format!("N{i}"), 0.0, i as f64 * 0.1).unwrap();
            }
            for a in 0..n {
                for b in (a + 1)..n {
                    if rng.random_bool(0.4) {
                        let weight = rng.random_range(0..20) as f64;
                        graph.add_edge(&format!("N{a}"), &format!("N{b}"), weight).unwrap();
                    }
                }
            }

            for a in 0..n {
                for b in 0..n {
                    let route = dijkstra(&graph, &format!("N{a}"), &format!("N{b}")).unwrap();
                    let expected = if a == b { 0.0 } else { brute_force_cost(&graph, a, b) };

                    assert_eq!(route.cost, expected, "N{a} -> N{b}");
                    if expected.is_finite() {
                        assert_eq!(route.path.first().unwrap(), &format!("N{a}"));
                        assert_eq!(route.path.last().unwrap(), &format!("N{b}"));
                        assert_eq!(path_cost(&graph, &route.path), expected);
                    } else {
                        assert!(route.path.is_empty());
                    }
                }
            }
        }
    }
}
