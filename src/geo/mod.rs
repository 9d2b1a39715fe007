//! Distance estimation from a partial address to the reference point.

pub mod coordinates;
mod error;
mod estimator;
mod geocoder;
pub mod regions;

pub use coordinates::{distance_km, haversine_km, Coordinates, EARTH_RADIUS_KM, REFERENCE_POINT};
pub use error::GeoError;
pub use estimator::{estimate_distance, DistanceEstimator, DistanceSettings};
pub use geocoder::{Geocoder, SimulatedGeocoder};
