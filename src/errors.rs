use thiserror::Error;


/// Convenient result alias for routing operations
pub type RouteResult<T> = std::result::Result<T, RouteError>;

/// Errors raised while building a facility graph or querying it
#[derive(Debug, Error)]
pub enum RouteError {
    /// A facility name is not present in the graph
    #[error("unknown facility: {name}")]
    UnknownNode { name: String },

    /// Edge weight was negative, NaN or infinite
    #[error("invalid weight {weight} for edge {from} <-> {to}")]
    InvalidWeight { from: String, to: String, weight: f64 },

    #[error("invalid facility {name:?}: {reason}")]
    InvalidFacility { name: String, reason: String },

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The transit cost collaborator could not price an origin/destination pair
    #[error("cost lookup failed for {origin} -> {destination}: {message}")]
    CostProvider { origin: String, destination: String, message: String },

    #[error("kd-tree error: {0}")]
    KdTree(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("invalid router config: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RouteError {
    pub(crate) fn unknown_node(name: &str) -> Self {
        RouteError::UnknownNode { name: name.to_string() }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("latitude {0} outside [-90, 90]")]
    InvalidLatitude(f64),
    #[error("longitude {0} outside [-180, 180]")]
    InvalidLongitude(f64),
}


impl From<kdtree::ErrorKind> for RouteError {
    fn from(error: kdtree::ErrorKind) -> Self {
        RouteError::KdTree(error.to_string())
    }
}
