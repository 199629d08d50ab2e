//! Facility records and the CSV loader that produces them.
//!
//! Expected columns (extra columns are ignored):
//!
//! ```csv
//! NAME,LATITUDE,LONGITUDE
//! Louisville Worldport,38.1744,-85.7361
//! Chicago Hodgkins,41.7689,-87.8570
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::errors::RouteResult;


/// One facility as supplied by the loader
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Facility {
    #[serde(rename = "NAME", alias = "name")]
    pub name: String,
    #[serde(rename = "LATITUDE", alias = "latitude")]
    pub latitude: f64,
    #[serde(rename = "LONGITUDE", alias = "longitude")]
    pub longitude: f64,
}

impl Facility {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self { name: name.into(), latitude, longitude }
    }
}


/// Load facility records from a CSV file, in file order
pub fn load_facilities_csv(path: &Path) -> RouteResult<Vec<Facility>> {
    debug!(path = %path.display(), "loading facilities");
    let file = std::fs::File::open(path)?;
    load_facilities_reader(file)
}

/// Like [`load_facilities_csv`] but accepts any `Read` source
pub fn load_facilities_reader<R: Read>(reader: R) -> RouteResult<Vec<Facility>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let facilities = csv_reader
        .deserialize::<Facility>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(facilities)
}
