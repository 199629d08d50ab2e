use crate::collections::FxIndexMap;
use crate::errors::{RouteError, RouteResult};
use crate::geometry::Coordinate;


/// Weighted adjacency entry
/// `target` is the index of the neighbour inside the graph's node map
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub target: usize,
    pub weight: f64,
}

/// Facility vertex
#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub coordinate: Coordinate,
    pub edges: Vec<Edge>, // insertion ordered, duplicates kept
}


/// Undirected weighted graph of facilities keyed by name.
///
/// Built once (nodes, then edges) and read-only afterwards: every query takes
/// `&self`, so one graph can be shared across threads for concurrent searches.
/// Callers that need to mutate a shared graph must serialize that themselves,
/// e.g. behind an `RwLock` or by rebuilding and swapping an `Arc<Graph>`.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: FxIndexMap<String, Node>,
    edge_count: usize, // logical undirected edges
}

impl Graph {

    pub fn new() -> Self {
        Self::default()
    }

    /// Add a facility node
    /// Returns `Ok(false)` without touching the existing node when the name is already present
    pub fn add_node(&mut self, name: &str, latitude: f64, longitude: f64) -> RouteResult<bool> {
        if name.is_empty() {
            return Err(RouteError::InvalidFacility {
                name: name.to_string(),
                reason: "name must not be empty".to_string(),
            });
        }
        if self.nodes.contains_key(name) {
            return Ok(false);
        }

        let coordinate = Coordinate::new(latitude, longitude)?;
        self.nodes.insert(name.to_string(), Node {
            name: name.to_string(),
            coordinate,
            edges: Vec::new(),
        });
        Ok(true)
    }

    /// Add an undirected edge between two existing nodes
    /// Everything is validated before the first adjacency entry is written,
    /// so a failed call leaves the graph unchanged
    pub fn add_edge(&mut self, a: &str, b: &str, weight: f64) -> RouteResult<()> {
        let a_index = self.index_of(a).ok_or_else(|| RouteError::unknown_node(a))?;
        let b_index = self.index_of(b).ok_or_else(|| RouteError::unknown_node(b))?;

        if !weight.is_finite() || weight < 0.0 {
            return Err(RouteError::InvalidWeight {
                from: a.to_string(),
                to: b.to_string(),
                weight,
            });
        }

        self.nodes[a_index].edges.push(Edge { target: b_index, weight });
        // an explicit self-loop is stored once
        if a_index != b_index {
            self.nodes[b_index].edges.push(Edge { target: a_index, weight });
        }
        self.edge_count += 1;
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of logical (undirected) edges
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Facility names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Neighbours of `name` with the weight of each connecting edge
    pub fn neighbours(&self, name: &str) -> RouteResult<Vec<(&str, f64)>> {
        let node = self.node(name).ok_or_else(|| RouteError::unknown_node(name))?;
        Ok(node.edges.iter()
            .map(|edge| (self.nodes[edge.target].name.as_str(), edge.weight))
            .collect())
    }

    /// Great-circle distance in kilometers between two facilities
    pub fn heuristic(&self, a: &str, b: &str) -> RouteResult<f64> {
        let a_index = self.index_of(a).ok_or_else(|| RouteError::unknown_node(a))?;
        let b_index = self.index_of(b).ok_or_else(|| RouteError::unknown_node(b))?;
        Ok(self.distance_between(a_index, b_index))
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.nodes.get_index_of(name)
    }

    pub(crate) fn name_at(&self, index: usize) -> &str {
        self.nodes[index].name.as_str()
    }

    pub(crate) fn edges_at(&self, index: usize) -> &[Edge] {
        &self.nodes[index].edges
    }

    pub(crate) fn distance_between(&self, a: usize, b: usize) -> f64 {
        self.nodes[a].coordinate.distance_km(&self.nodes[b].coordinate)
    }
}
