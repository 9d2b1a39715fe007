use std::ops::Range;
use std::sync::Mutex;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use super::coordinates::{distance_km, Coordinates, REFERENCE_POINT};
use super::error::GeoError;
use super::geocoder::{Geocoder, SimulatedGeocoder};
use super::regions::{fallback_range, DEFAULT_FALLBACK_KM};
use crate::models::{format_address, is_eligible_for_distance, AddressFragment, PropertyRecord};

/// Tunable parameters of the distance estimator
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceSettings {
    pub reference: Coordinates,
    /// Maximum offset, in degrees, applied to each axis of a geocoded point
    pub jitter_degrees: f64,
    /// Band used when a region code has no entry in the fallback table
    pub default_fallback_km: Range<u32>,
    pub geocode_latency: Duration,
}

impl Default for DistanceSettings {
    fn default() -> Self {
        Self {
            reference: REFERENCE_POINT,
            jitter_degrees: 0.25,
            default_fallback_km: DEFAULT_FALLBACK_KM,
            geocode_latency: Duration::ZERO,
        }
    }
}

/// Estimates the distance from an address to the reference point.
///
/// Eligible addresses are geocoded and measured with the haversine formula. When the
/// geocoder does not know the region, a random distance is drawn from that region's
/// fallback band. Every other failure yields `0`.
///
/// Concurrent calls on one estimator draw from the same RNG stream.
pub struct DistanceEstimator<G: Geocoder = SimulatedGeocoder> {
    geocoder: G,
    reference: Coordinates,
    default_fallback_km: Range<u32>,
    rng: Mutex<StdRng>,
}

impl DistanceEstimator<SimulatedGeocoder> {
    pub fn new(settings: &DistanceSettings) -> Self {
        let geocoder = SimulatedGeocoder::new(
            settings.jitter_degrees,
            settings.geocode_latency,
            StdRng::from_os_rng(),
        );
        Self::with_geocoder(geocoder, settings, StdRng::from_os_rng())
    }

    /// Deterministic estimator for reproducible runs
    pub fn seeded(settings: &DistanceSettings, seed: u64) -> Self {
        let geocoder = SimulatedGeocoder::new(
            settings.jitter_degrees,
            settings.geocode_latency,
            StdRng::seed_from_u64(seed),
        );
        Self::with_geocoder(geocoder, settings, StdRng::seed_from_u64(seed.wrapping_add(1)))
    }
}

impl<G: Geocoder> DistanceEstimator<G> {
    pub fn with_geocoder(geocoder: G, settings: &DistanceSettings, rng: StdRng) -> Self {
        Self {
            geocoder,
            reference: settings.reference,
            default_fallback_km: settings.default_fallback_km.clone(),
            rng: Mutex::new(rng),
        }
    }

    /// Distance in whole kilometers, `0` for ineligible addresses or internal faults
    pub async fn estimate_distance(&self, address: &AddressFragment) -> u32 {
        match self.try_estimate(address).await {
            Ok(km) => km,
            Err(GeoError::Ineligible) => 0,
            Err(err) => {
                warn!(
                    address = %format_address(address),
                    geocoder = self.geocoder.name(),
                    error = %err,
                    "distance estimation failed"
                );
                0
            }
        }
    }

    /// Copy of `property` with its distance recomputed when its address is eligible
    pub async fn refresh_property(&self, property: &PropertyRecord) -> PropertyRecord {
        let mut updated = property.clone();
        let address = property.address();
        if is_eligible_for_distance(&address) {
            updated.distance_km = self.estimate_distance(&address).await;
        }
        updated
    }

    async fn try_estimate(&self, address: &AddressFragment) -> Result<u32, GeoError> {
        if !is_eligible_for_distance(address) {
            return Err(GeoError::Ineligible);
        }

        match self.geocoder.geocode(address).await {
            Ok(point) => self.measure(point),
            Err(GeoError::GeocodeMiss(region)) => {
                let km = self.fallback_distance(&region)?;
                debug!(region = %region, km, "geocode miss, using regional fallback");
                Ok(km)
            }
            Err(err) => Err(err),
        }
    }

    fn measure(&self, point: Coordinates) -> Result<u32, GeoError> {
        if !point.is_valid() {
            return Err(GeoError::InvalidCoordinates(point));
        }
        if !self.reference.is_valid() {
            return Err(GeoError::InvalidCoordinates(self.reference));
        }
        Ok(distance_km(point, self.reference) as u32)
    }

    fn fallback_distance(&self, region: &str) -> Result<u32, GeoError> {
        let range = fallback_range(region).unwrap_or_else(|| self.default_fallback_km.clone());
        if range.is_empty() {
            return Ok(range.start);
        }

        let mut rng = self.rng.lock().map_err(|_| GeoError::RandomSource)?;
        Ok(rng.random_range(range))
    }
}

/// One-off estimate with default settings and an OS-seeded random source
pub async fn estimate_distance(address: &AddressFragment) -> u32 {
    DistanceEstimator::new(&DistanceSettings::default())
        .estimate_distance(address)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClientRecord, PersonType};
    use async_trait::async_trait;
    use chrono::NaiveDate;

    fn address(municipality: &str, region: &str) -> AddressFragment {
        AddressFragment {
            municipality: Some(municipality.to_string()),
            region_code: Some(region.to_string()),
            ..Default::default()
        }
    }

    fn exact() -> DistanceSettings {
        DistanceSettings {
            jitter_degrees: 0.0,
            ..Default::default()
        }
    }

    struct BrokenGeocoder;

    #[async_trait]
    impl Geocoder for BrokenGeocoder {
        async fn geocode(&self, _address: &AddressFragment) -> Result<Coordinates, GeoError> {
            Ok(Coordinates::new(f64::NAN, 0.0))
        }

        fn name(&self) -> &'static str {
            "broken"
        }
    }

    struct MissingGeocoder;

    #[async_trait]
    impl Geocoder for MissingGeocoder {
        async fn geocode(&self, address: &AddressFragment) -> Result<Coordinates, GeoError> {
            Err(GeoError::GeocodeMiss(
                address.region().unwrap_or_default().to_string(),
            ))
        }

        fn name(&self) -> &'static str {
            "missing"
        }
    }

    #[tokio::test]
    async fn ineligible_address_is_zero() {
        let estimator = DistanceEstimator::seeded(&DistanceSettings::default(), 1);
        assert_eq!(estimator.estimate_distance(&AddressFragment::default()).await, 0);

        let no_region = AddressFragment {
            municipality: Some("X".to_string()),
            ..Default::default()
        };
        assert_eq!(estimator.estimate_distance(&no_region).await, 0);
    }

    #[tokio::test]
    async fn exact_anchor_distance() {
        let estimator = DistanceEstimator::seeded(&exact(), 1);
        let km = estimator.estimate_distance(&address("Goiânia", "GO")).await;
        assert!((300..=360).contains(&km), "got {km}");
    }

    #[tokio::test]
    async fn jittered_distance_stays_near_region() {
        let estimator = DistanceEstimator::seeded(&DistanceSettings::default(), 2024);
        for _ in 0..100 {
            let km = estimator.estimate_distance(&address("Barra do Garças", "MT")).await;
            assert!(km < 600, "got {km}");
        }
    }

    #[tokio::test]
    async fn unknown_region_uses_default_band() {
        let estimator = DistanceEstimator::seeded(&DistanceSettings::default(), 3);
        for _ in 0..100 {
            let km = estimator.estimate_distance(&address("X", "ZZ")).await;
            assert!(DEFAULT_FALLBACK_KM.contains(&km), "got {km}");
        }
    }

    #[tokio::test]
    async fn known_region_miss_uses_its_band() {
        let estimator = DistanceEstimator::with_geocoder(
            MissingGeocoder,
            &DistanceSettings::default(),
            StdRng::seed_from_u64(5),
        );
        for _ in 0..50 {
            let km = estimator.estimate_distance(&address("Boa Vista", "RR")).await;
            assert!((2000..3000).contains(&km), "got {km}");
        }
    }

    #[tokio::test]
    async fn configured_default_band() {
        let settings = DistanceSettings {
            default_fallback_km: 10..11,
            ..Default::default()
        };
        let estimator = DistanceEstimator::seeded(&settings, 9);
        assert_eq!(estimator.estimate_distance(&address("X", "ZZ")).await, 10);
    }

    #[tokio::test]
    async fn empty_default_band_returns_its_start() {
        let settings = DistanceSettings {
            default_fallback_km: 75..75,
            ..Default::default()
        };
        let estimator = DistanceEstimator::seeded(&settings, 9);
        assert_eq!(estimator.estimate_distance(&address("X", "ZZ")).await, 75);
    }

    #[tokio::test]
    async fn faults_become_zero() {
        let estimator = DistanceEstimator::with_geocoder(
            BrokenGeocoder,
            &DistanceSettings::default(),
            StdRng::seed_from_u64(1),
        );
        assert_eq!(estimator.estimate_distance(&address("X", "MT")).await, 0);
    }

    #[tokio::test]
    async fn oversized_jitter_becomes_zero() {
        for jitter_degrees in [1e308, f64::INFINITY] {
            let settings = DistanceSettings {
                jitter_degrees,
                ..Default::default()
            };
            let estimator = DistanceEstimator::seeded(&settings, 1);
            assert_eq!(estimator.estimate_distance(&address("Cuiabá", "MT")).await, 0);
        }
    }

    #[tokio::test]
    async fn reference_point_measures_zero() {
        let settings = DistanceSettings {
            reference: Coordinates::new(-15.6014, -56.0979),
            ..exact()
        };
        let estimator = DistanceEstimator::seeded(&settings, 1);
        assert_eq!(estimator.estimate_distance(&address("Cuiabá", "MT")).await, 0);
    }

    #[tokio::test]
    async fn refresh_only_touches_eligible_properties() {
        let date = NaiveDate::from_ymd_opt(2020, 2, 2).unwrap();
        let mut owner = ClientRecord::new("Agro Norte", "1", date, PersonType::Organization);
        owner.id = Some(3);

        let estimator = DistanceEstimator::seeded(&exact(), 11);

        let mut property = PropertyRecord::for_client(&owner).unwrap();
        property.distance_km = 17;
        let untouched = estimator.refresh_property(&property).await;
        assert_eq!(untouched, property);

        property.municipality = Some("Goiânia".to_string());
        property.region_code = Some("GO".to_string());
        let refreshed = estimator.refresh_property(&property).await;
        assert!((300..=360).contains(&refreshed.distance_km));
        assert_eq!(property.distance_km, 17);
    }

    #[tokio::test]
    async fn free_function_handles_empty_address() {
        assert_eq!(estimate_distance(&AddressFragment::default()).await, 0);
    }
}
