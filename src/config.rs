use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::edges::EdgeTopology;
use crate::errors::RouteResult;
use crate::service::Algorithm;


/// Weight between consecutive facilities when no transit data is wired in
pub const DEFAULT_PLACEHOLDER_WEIGHT: f64 = 10.0;


/// Startup configuration, built once and passed by reference to whatever needs it.
///
/// Every field is optional in the JSON form:
///
/// ```json
/// {
///   "data_path": "data/facilities.csv",
///   "default_algorithm": "dijkstra",
///   "edge_topology": { "kind": "nearest", "neighbours": 4 },
///   "placeholder_weight": 10.0
/// }
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RouterConfig {
    /// CSV file with NAME, LATITUDE, LONGITUDE columns
    pub data_path: PathBuf,
    pub default_algorithm: Algorithm,
    pub edge_topology: EdgeTopology,
    /// Only used by the sequential topology
    pub placeholder_weight: f64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/facilities.csv"),
            default_algorithm: Algorithm::AStar,
            edge_topology: EdgeTopology::Sequential,
            placeholder_weight: DEFAULT_PLACEHOLDER_WEIGHT,
        }
    }
}

impl RouterConfig {

    pub fn from_reader<R: Read>(reader: R) -> RouteResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: &Path) -> RouteResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RouteError;
    use std::io::Cursor;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = RouterConfig::from_reader(Cursor::new("{}")).unwrap();
        assert_eq!(config, RouterConfig::default());
        assert_eq!(config.placeholder_weight, 10.0);
    }

    #[test]
    fn test_full_config() {
        let json = r#"{
            "data_path": "/srv/facilities.csv",
            "default_algorithm": "dijkstra",
            "edge_topology": { "kind": "nearest", "neighbours": 4 },
            "placeholder_weight": 2.5
        }"#;

        let config = RouterConfig::from_reader(Cursor::new(json)).unwrap();

        assert_eq!(config.data_path, PathBuf::from("/srv/facilities.csv"));
        assert_eq!(config.default_algorithm, Algorithm::Dijkstra);
        assert_eq!(config.edge_topology, EdgeTopology::Nearest { neighbours: 4 });
        assert_eq!(config.placeholder_weight, 2.5);
    }

    #[test]
    fn test_unknown_algorithm_falls_back_to_a_star() {
        let config = RouterConfig::from_reader(Cursor::new(r#"{"default_algorithm": "bfs"}"#)).unwrap();
        assert_eq!(config.default_algorithm, Algorithm::AStar);
    }

    #[test]
    fn test_malformed_json() {
        let result = RouterConfig::from_reader(Cursor::new("{ not json"));
        assert!(matches!(result, Err(RouteError::Config(_))));
    }
}
