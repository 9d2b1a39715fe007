use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::distr::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use super::coordinates::Coordinates;
use super::error::GeoError;
use super::regions::anchor_for;
use crate::models::AddressFragment;

/// Resolves an address to coordinates.
///
/// Implementations report an unknown region as [`GeoError::GeocodeMiss`] so the
/// estimator can fall back to its range table.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &AddressFragment) -> Result<Coordinates, GeoError>;

    fn name(&self) -> &'static str;
}

/// Geocoder that places an address somewhere around its region's capital
pub struct SimulatedGeocoder {
    jitter_degrees: f64,
    latency: Duration,
    rng: Mutex<StdRng>,
}

impl SimulatedGeocoder {
    pub fn new(jitter_degrees: f64, latency: Duration, rng: StdRng) -> Self {
        Self {
            jitter_degrees,
            latency,
            rng: Mutex::new(rng),
        }
    }

    pub fn seeded(jitter_degrees: f64, seed: u64) -> Self {
        Self::new(jitter_degrees, Duration::ZERO, StdRng::seed_from_u64(seed))
    }

    /// Offset distribution for each axis, `None` when jitter is disabled
    fn jitter(&self) -> Result<Option<Uniform<f64>>, GeoError> {
        if self.jitter_degrees == 0.0 {
            return Ok(None);
        }
        Uniform::new_inclusive(-self.jitter_degrees, self.jitter_degrees)
            .map(Some)
            .map_err(|_| GeoError::InvalidJitter(self.jitter_degrees))
    }
}

#[async_trait]
impl Geocoder for SimulatedGeocoder {
    async fn geocode(&self, address: &AddressFragment) -> Result<Coordinates, GeoError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let region = address.region().ok_or(GeoError::Ineligible)?;
        let anchor = anchor_for(region).ok_or_else(|| GeoError::GeocodeMiss(region.to_string()))?;

        let (lat_offset, lon_offset) = match self.jitter()? {
            Some(offset) => {
                let mut rng = self.rng.lock().map_err(|_| GeoError::RandomSource)?;
                let lat = offset.sample(&mut *rng);
                (lat, offset.sample(&mut *rng))
            }
            None => (0.0, 0.0),
        };

        let coordinates = Coordinates::new(
            anchor.coordinates.latitude + lat_offset,
            anchor.coordinates.longitude + lon_offset,
        );
        debug!(region, anchor = anchor.city, %coordinates, "simulated geocode");

        Ok(coordinates)
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}
