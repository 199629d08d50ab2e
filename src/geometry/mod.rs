use num_traits::Float;
use crate::errors::GeometryError;


/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;


/// Great-circle distance between two (lat, lon) points given in degrees
/// Result is in the same unit as `radius`
/// https://en.wikipedia.org/wiki/Haversine_formula
pub fn haversine<T>(lat1: T, lon1: T, lat2: T, lon2: T, radius: T) -> T
where
    T: Float,
    {
    let two = T::one() + T::one();
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let d_phi = phi2 - phi1;
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / two).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / two).sin().powi(2);
    // clamp guards sqrt(1 - a) against rounding for antipodal points
    let a = a.min(T::one()).max(T::zero());
    let c = two * a.sqrt().atan2((T::one() - a).sqrt());

    radius * c
}


/// Geographic position of a facility, in degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {

    /// Create a coordinate, rejecting values outside the valid geographic ranges
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeometryError> {
        // NaN fails both range checks
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeometryError::InvalidLatitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeometryError::InvalidLongitude(longitude));
        }
        Ok(Self { latitude, longitude })
    }

    /// Great-circle distance to another coordinate in kilometers
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        haversine(self.latitude, self.longitude, other.latitude, other.longitude, EARTH_RADIUS_KM)
    }

    /// Position on the unit sphere
    /// Chord length between these points is monotonic in great-circle distance,
    /// so euclidean nearest-neighbour queries rank coordinates correctly
    pub fn unit_vector(&self) -> [f64; 3] {
        let (phi, lambda) = (self.latitude.to_radians(), self.longitude.to_radians());
        [phi.cos() * lambda.cos(), phi.cos() * lambda.sin(), phi.sin()]
    }
}
