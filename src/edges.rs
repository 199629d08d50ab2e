//! Edge construction between loaded facilities.
//!
//! An [`EdgeSpec`] pairs a topology (which facilities get connected) with a
//! [`CostProvider`] (what each connection weighs). The sequential topology with
//! a fixed cost is the placeholder used when no transit data is available: it
//! assumes the load order means something, which real facility lists rarely do.

use kdtree::KdTree;
use kdtree::distance::squared_euclidean;
use serde::Deserialize;

use crate::collections::FxIndexSet;
use crate::errors::{RouteError, RouteResult};
use crate::facility::Facility;
use crate::geometry::{Coordinate, EARTH_RADIUS_KM, haversine};
use crate::graph::Graph;


/// Prices the connection between two facilities
/// Implement this over a real transit-time source; retries and auth belong to the implementation
pub trait CostProvider {
    fn transit_cost(&self, origin: &Facility, destination: &Facility) -> RouteResult<f64>;
}

/// Same cost for every connection
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedCost(pub f64);

impl CostProvider for FixedCost {
    fn transit_cost(&self, _origin: &Facility, _destination: &Facility) -> RouteResult<f64> {
        Ok(self.0)
    }
}

/// Great-circle distance in kilometers
/// Keeps the A* heuristic admissible
#[derive(Clone, Copy, Debug, Default)]
pub struct GreatCircleCost;

impl CostProvider for GreatCircleCost {
    fn transit_cost(&self, origin: &Facility, destination: &Facility) -> RouteResult<f64> {
        Ok(haversine(origin.latitude, origin.longitude, destination.latitude, destination.longitude, EARTH_RADIUS_KM))
    }
}

impl<F> CostProvider for F
where
    F: Fn(&Facility, &Facility) -> f64,
{
    fn transit_cost(&self, origin: &Facility, destination: &Facility) -> RouteResult<f64> {
        Ok(self(origin, destination))
    }
}


/// Which facility pairs are connected
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EdgeTopology {
    /// Each record linked to the next one, in load order
    #[default]
    Sequential,
    /// Each facility linked to its `neighbours` closest facilities
    Nearest { neighbours: usize },
}


/// How edges are produced for a set of facilities
#[derive(Clone, Debug)]
pub struct EdgeSpec<P> {
    pub topology: EdgeTopology,
    pub costs: P,
}

impl EdgeSpec<FixedCost> {
    /// Consecutive records joined by a constant weight
    pub fn sequential(weight: f64) -> Self {
        Self { topology: EdgeTopology::Sequential, costs: FixedCost(weight) }
    }
}

impl EdgeSpec<GreatCircleCost> {
    /// k nearest facilities joined by their great-circle distance
    pub fn nearest(neighbours: usize) -> Self {
        Self { topology: EdgeTopology::Nearest { neighbours }, costs: GreatCircleCost }
    }
}

impl<P: CostProvider> EdgeSpec<P> {

    pub fn new(topology: EdgeTopology, costs: P) -> Self {
        Self { topology, costs }
    }

    /// Index pairs into `facilities` that should be connected
    /// Each undirected pair appears once
    pub fn pairs(&self, facilities: &[Facility]) -> RouteResult<Vec<(usize, usize)>> {
        match self.topology {
            EdgeTopology::Sequential => Ok((1..facilities.len()).map(|i| (i - 1, i)).collect()),
            EdgeTopology::Nearest { neighbours } => nearest_pairs(facilities, neighbours),
        }
    }

    /// Add every edge of this spec to `graph`
    /// Facilities must already be nodes of the graph; stops at the first failure
    pub fn connect(&self, graph: &mut Graph, facilities: &[Facility]) -> RouteResult<usize> {
        let pairs = self.pairs(facilities)?;
        for &(a, b) in &pairs {
            let (origin, destination) = (&facilities[a], &facilities[b]);
            let weight = self.costs.transit_cost(origin, destination)?;
            graph.add_edge(&origin.name, &destination.name, weight)?;
        }
        Ok(pairs.len())
    }
}


/// Pairs each facility with its k nearest others by great-circle distance
fn nearest_pairs(facilities: &[Facility], neighbours: usize) -> RouteResult<Vec<(usize, usize)>> {
    if facilities.len() < 2 || neighbours == 0 {
        return Ok(Vec::new());
    }

    let points = facilities.iter()
        .map(|f| Coordinate::new(f.latitude, f.longitude).map(|c| c.unit_vector()))
        .collect::<Result<Vec<_>, _>>()?;

    // unit sphere positions -> index in facilities
    let mut tree: KdTree<f64, usize, [f64; 3]> = KdTree::new(3);
    for (i, point) in points.iter().enumerate() {
        tree.add(*point, i)?;
    }

    // the facility itself comes back as its own nearest hit
    let wanted = neighbours.min(facilities.len() - 1) + 1;

    let mut pairs: FxIndexSet<(usize, usize)> = FxIndexSet::default();
    for (i, point) in points.iter().enumerate() {
        let found = tree.nearest(point, wanted, &squared_euclidean)?;
        for (_, &j) in found {
            if j == i || facilities[i].name == facilities[j].name {
                continue;
            }
            pairs.insert((i.min(j), i.max(j)));
        }
    }

    Ok(pairs.into_iter().collect())
}
