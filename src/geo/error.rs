use thiserror::Error;

use super::coordinates::Coordinates;

/// Conditions met while estimating a distance.
///
/// None of these reach callers of `estimate_distance`; they are resolved to a fallback
/// value at that boundary.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("address lacks a municipality or region code")]
    Ineligible,

    #[error("no geocoding anchor for region '{0}'")]
    GeocodeMiss(String),

    #[error("jitter of {0} degrees cannot be sampled")]
    InvalidJitter(f64),

    #[error("unusable coordinates {0}")]
    InvalidCoordinates(Coordinates),

    #[error("random source unavailable")]
    RandomSource,
}
