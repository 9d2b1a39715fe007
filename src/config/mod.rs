use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Result};
use dotenvy::dotenv;
use serde::Deserialize;

use crate::directory::DEFAULT_PAGE_SIZE;
use crate::geo::{Coordinates, DistanceSettings, REFERENCE_POINT};

const ENV_PREFIX: &str = "DIRECTORY_";
const MAX_JITTER_DEGREES: f64 = 90.0;

/// Configuration for the application
#[derive(Debug, Deserialize)]
pub struct Config {
    /// JSON snapshot of clients and properties
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_reference_latitude")]
    pub reference_latitude: f64,
    #[serde(default = "default_reference_longitude")]
    pub reference_longitude: f64,
    #[serde(default = "default_jitter_degrees")]
    pub jitter_degrees: f64,
    #[serde(default = "default_fallback_min_km")]
    pub fallback_min_km: u32,
    #[serde(default = "default_fallback_max_km")]
    pub fallback_max_km: u32,
    #[serde(default)]
    pub geocode_latency_ms: u64,
    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log")]
    pub log: String,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("directory.json")
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_reference_latitude() -> f64 {
    REFERENCE_POINT.latitude
}

fn default_reference_longitude() -> f64 {
    REFERENCE_POINT.longitude
}

fn default_jitter_degrees() -> f64 {
    0.25
}

fn default_fallback_min_km() -> u32 {
    50
}

fn default_fallback_max_km() -> u32 {
    500
}

fn default_log() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from `DIRECTORY_*` environment variables
    pub fn load() -> Result<Self> {
        let config = envy::prefixed(ENV_PREFIX).from_env::<Config>()?;
        config.validate()?;

        Ok(config)
    }

    /// Build a configuration from explicit key/value pairs, as if read from the environment
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::prefixed(ENV_PREFIX).from_iter::<_, Config>(pairs)?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        ensure!(self.page_size > 0, "page size must be positive");
        ensure!(
            (0.0..=MAX_JITTER_DEGREES).contains(&self.jitter_degrees),
            "jitter must be between 0 and {MAX_JITTER_DEGREES} degrees, got {}",
            self.jitter_degrees
        );
        ensure!(
            self.fallback_min_km < self.fallback_max_km,
            "fallback range {}..{} is empty",
            self.fallback_min_km,
            self.fallback_max_km
        );
        ensure!(
            self.reference().is_valid(),
            "reference point {} is not a valid coordinate",
            self.reference()
        );

        Ok(())
    }

    pub fn reference(&self) -> Coordinates {
        Coordinates::new(self.reference_latitude, self.reference_longitude)
    }

    pub fn distance_settings(&self) -> DistanceSettings {
        DistanceSettings {
            reference: self.reference(),
            jitter_degrees: self.jitter_degrees,
            default_fallback_km: self.fallback_min_km..self.fallback_max_km,
            geocode_latency: Duration::from_millis(self.geocode_latency_ms),
        }
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    // Ensure .env file is loaded
    dotenv().ok();

    Config::load()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(values: &[(&str, &str)]) -> Vec<(String, String)> {
        values
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_without_variables() {
        let config = Config::from_pairs(pairs(&[])).unwrap();

        assert_eq!(config.data_file, PathBuf::from("directory.json"));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.log, "info");
        assert_eq!(config.distance_settings(), DistanceSettings::default());
    }

    #[test]
    fn reads_prefixed_variables() {
        let config = Config::from_pairs(pairs(&[
            ("DIRECTORY_DATA_FILE", "/tmp/clients.json"),
            ("DIRECTORY_PAGE_SIZE", "25"),
            ("DIRECTORY_JITTER_DEGREES", "0.1"),
            ("DIRECTORY_FALLBACK_MIN_KM", "10"),
            ("DIRECTORY_FALLBACK_MAX_KM", "20"),
            ("DIRECTORY_GEOCODE_LATENCY_MS", "150"),
            ("OTHER_PAGE_SIZE", "99"),
        ]))
        .unwrap();

        assert_eq!(config.data_file, PathBuf::from("/tmp/clients.json"));
        assert_eq!(config.page_size, 25);

        let settings = config.distance_settings();
        assert_eq!(settings.jitter_degrees, 0.1);
        assert_eq!(settings.default_fallback_km, 10..20);
        assert_eq!(settings.geocode_latency, Duration::from_millis(150));
    }

    #[test]
    fn rejects_empty_fallback_range() {
        let result = Config::from_pairs(pairs(&[
            ("DIRECTORY_FALLBACK_MIN_KM", "500"),
            ("DIRECTORY_FALLBACK_MAX_KM", "500"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_negative_jitter() {
        let result = Config::from_pairs(pairs(&[("DIRECTORY_JITTER_DEGREES", "-1")]));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_oversized_jitter() {
        for value in ["1e308", "90.5", "inf", "NaN"] {
            let result = Config::from_pairs(pairs(&[("DIRECTORY_JITTER_DEGREES", value)]));
            assert!(result.is_err(), "accepted jitter {value}");
        }
        assert!(Config::from_pairs(pairs(&[("DIRECTORY_JITTER_DEGREES", "90")])).is_ok());
    }

    #[test]
    fn rejects_zero_page_size() {
        let result = Config::from_pairs(pairs(&[("DIRECTORY_PAGE_SIZE", "0")]));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_reference_off_the_globe() {
        let result = Config::from_pairs(pairs(&[("DIRECTORY_REFERENCE_LATITUDE", "120")]));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_unparseable_number() {
        let result = Config::from_pairs(pairs(&[("DIRECTORY_PAGE_SIZE", "many")]));
        assert!(result.is_err());
    }
}
