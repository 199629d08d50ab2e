//! Route service: builds the facility graph once and answers route queries.

use std::fmt;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::RouterConfig;
use crate::edges::{CostProvider, EdgeSpec, EdgeTopology, FixedCost, GreatCircleCost};
use crate::errors::RouteResult;
use crate::facility::{Facility, load_facilities_csv};
use crate::graph::Graph;
use crate::graph_algos::{AStar, Dijkstra, Pathfinder, Route};


/// Path finding algorithms
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String")]
pub enum Algorithm {
    /// Uniform cost search
    Dijkstra,
    /// Great-circle guided search
    #[default]
    AStar,
}

impl Algorithm {

    /// Parse a selector such as `"dijkstra"` or `"a_star"`
    /// Anything unrecognized selects A*
    pub fn from_selector(selector: &str) -> Self {
        match selector.trim().to_ascii_lowercase().as_str() {
            "dijkstra" => Algorithm::Dijkstra,
            "a_star" | "astar" | "a*" => Algorithm::AStar,
            other => {
                warn!(selector = other, "unrecognized algorithm, defaulting to a_star");
                Algorithm::AStar
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "a_star",
        }
    }

    pub fn pathfinder(&self) -> &'static dyn Pathfinder {
        match self {
            Algorithm::Dijkstra => &Dijkstra,
            Algorithm::AStar => &AStar,
        }
    }
}

impl From<&str> for Algorithm {
    fn from(selector: &str) -> Self {
        Algorithm::from_selector(selector)
    }
}

impl From<String> for Algorithm {
    fn from(selector: String) -> Self {
        Algorithm::from_selector(&selector)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


/// Facade over a built graph and the two pathfinders
#[derive(Clone, Debug)]
pub struct RouteService {
    graph: Graph,
    default_algorithm: Algorithm,
}

impl RouteService {

    /// Build the graph from facility records: all nodes first, then the edges
    /// produced by `edges`. Any failure aborts construction.
    pub fn build_graph<P: CostProvider>(facilities: &[Facility], edges: &EdgeSpec<P>) -> RouteResult<Self> {
        let mut graph = Graph::new();
        for facility in facilities {
            if !graph.add_node(&facility.name, facility.latitude, facility.longitude)? {
                debug!(name = %facility.name, "duplicate facility ignored");
            }
        }
        let edge_count = edges.connect(&mut graph, facilities)?;

        info!(
            facilities = facilities.len(),
            nodes = graph.node_count(),
            edges = edge_count,
            topology = ?edges.topology,
            "facility graph built"
        );
        Ok(Self::from_graph(graph))
    }

    /// Load facilities from `config.data_path` and connect them per the configured topology
    pub fn from_config(config: &RouterConfig) -> RouteResult<Self> {
        let facilities = load_facilities_csv(&config.data_path)?;
        let service = match config.edge_topology {
            EdgeTopology::Sequential => {
                Self::build_graph(&facilities, &EdgeSpec::new(EdgeTopology::Sequential, FixedCost(config.placeholder_weight)))?
            }
            topology @ EdgeTopology::Nearest { .. } => {
                Self::build_graph(&facilities, &EdgeSpec::new(topology, GreatCircleCost))?
            }
        };
        Ok(service.with_default_algorithm(config.default_algorithm))
    }

    pub fn from_graph(graph: Graph) -> Self {
        Self { graph, default_algorithm: Algorithm::default() }
    }

    pub fn with_default_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.default_algorithm = algorithm;
        self
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn default_algorithm(&self) -> Algorithm {
        self.default_algorithm
    }

    /// Find the lowest cost route between two facilities
    /// `UnknownNode` from the pathfinder is returned unchanged
    pub fn find_route(&self, start: &str, end: &str, algorithm: Algorithm) -> RouteResult<Route> {
        debug!(start, end, %algorithm, "finding route");
        algorithm.pathfinder().shortest_path(&self.graph, start, end)
    }

    /// Same as [`find_route`](Self::find_route) with a textual selector
    pub fn find_route_with(&self, start: &str, end: &str, selector: &str) -> RouteResult<Route> {
        self.find_route(start, end, Algorithm::from_selector(selector))
    }

    pub fn find_default_route(&self, start: &str, end: &str) -> RouteResult<Route> {
        self.find_route(start, end, self.default_algorithm)
    }
}
