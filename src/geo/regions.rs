//! Static lookup tables keyed by region (state) code.
//!
//! Anchors stand in for a real geocoding provider: each supported region resolves to
//! its capital. Fallback ranges give a plausible distance band for every region, ordered
//! from the nearest to the farthest from the reference point.

use std::ops::Range;

use super::coordinates::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionAnchor {
    pub code: &'static str,
    pub city: &'static str,
    pub coordinates: Coordinates,
}

const fn anchor(code: &'static str, city: &'static str, lat: f64, lon: f64) -> RegionAnchor {
    RegionAnchor {
        code,
        city,
        coordinates: Coordinates::new(lat, lon),
    }
}

pub const REGION_ANCHORS: [RegionAnchor; 10] = [
    anchor("MT", "Cuiabá", -15.6014, -56.0979),
    anchor("GO", "Goiânia", -16.6869, -49.2648),
    anchor("DF", "Brasília", -15.7939, -47.8828),
    anchor("MS", "Campo Grande", -20.4697, -54.6201),
    anchor("TO", "Palmas", -10.1840, -48.3336),
    anchor("MG", "Belo Horizonte", -19.9167, -43.9345),
    anchor("SP", "São Paulo", -23.5505, -46.6333),
    anchor("RJ", "Rio de Janeiro", -22.9068, -43.1729),
    anchor("PA", "Belém", -1.4558, -48.4902),
    anchor("BA", "Salvador", -12.9777, -38.5016),
];

/// Distance band `[min_km, max_km)` for one region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackRange {
    pub code: &'static str,
    pub min_km: u32,
    pub max_km: u32,
}

impl FallbackRange {
    pub fn range(&self) -> Range<u32> {
        self.min_km..self.max_km
    }
}

const fn band(code: &'static str, min_km: u32, max_km: u32) -> FallbackRange {
    FallbackRange {
        code,
        min_km,
        max_km,
    }
}

pub const FALLBACK_RANGES: [FallbackRange; 27] = [
    band("MT", 50, 500),
    band("GO", 150, 600),
    band("DF", 300, 700),
    band("MS", 300, 800),
    band("TO", 500, 1000),
    band("MG", 600, 1300),
    band("SP", 800, 1300),
    band("PR", 900, 1400),
    band("RJ", 1000, 1500),
    band("SC", 1100, 1600),
    band("ES", 1100, 1600),
    band("BA", 1100, 1800),
    band("RO", 1200, 1800),
    band("PI", 1300, 1900),
    band("RS", 1300, 1900),
    band("AM", 1300, 2000),
    band("PA", 1400, 2000),
    band("SE", 1500, 2100),
    band("MA", 1500, 2100),
    band("AC", 1500, 2200),
    band("AP", 1500, 2200),
    band("AL", 1600, 2300),
    band("CE", 1700, 2500),
    band("PE", 1800, 2600),
    band("PB", 1900, 2700),
    band("RN", 1900, 2800),
    band("RR", 2000, 3000),
];

/// Band of the nearest region, used for codes missing from [`FALLBACK_RANGES`]
pub const DEFAULT_FALLBACK_KM: Range<u32> = 50..500;

pub fn anchor_for(code: &str) -> Option<&'static RegionAnchor> {
    let code = code.trim();
    REGION_ANCHORS
        .iter()
        .find(|anchor| anchor.code.eq_ignore_ascii_case(code))
}

pub fn fallback_range(code: &str) -> Option<Range<u32>> {
    let code = code.trim();
    FALLBACK_RANGES
        .iter()
        .find(|band| band.code.eq_ignore_ascii_case(code))
        .map(FallbackRange::range)
}
