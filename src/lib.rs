//! Shortest routes between named facilities.
//!
//! Facilities are loaded into an undirected weighted [`Graph`], then queried
//! with either uniform cost search ([`Dijkstra`]) or A* guided by great-circle
//! distance ([`AStar`]). [`RouteService`] ties loading, edge construction and
//! algorithm selection together.
//!
//! ```no_run
//! use facility_router::{Algorithm, EdgeSpec, Facility, RouteService};
//!
//! let facilities = vec![
//!     Facility::new("Louisville", 38.17, -85.74),
//!     Facility::new("Chicago", 41.77, -87.86),
//!     Facility::new("Dallas", 32.90, -97.04),
//! ];
//! let service = RouteService::build_graph(&facilities, &EdgeSpec::nearest(2))?;
//! let route = service.find_route("Chicago", "Dallas", Algorithm::AStar)?;
//! println!("{:?} costs {}", route.path, route.cost);
//! # Ok::<(), facility_router::RouteError>(())
//! ```

mod collections;
pub mod config;
pub mod edges;
pub mod errors;
pub mod facility;
pub mod geometry;
pub mod graph;
pub mod graph_algos;
pub mod service;

pub use config::RouterConfig;
pub use edges::{CostProvider, EdgeSpec, EdgeTopology, FixedCost, GreatCircleCost};
pub use errors::{GeometryError, RouteError, RouteResult};
pub use facility::{Facility, load_facilities_csv, load_facilities_reader};
pub use graph::Graph;
pub use graph_algos::{AStar, Dijkstra, Pathfinder, Route, dijkstra};
pub use service::{Algorithm, RouteService};
