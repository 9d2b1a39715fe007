use std::fmt;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Point every distance is measured against (Barra do Garças, MT).
pub const REFERENCE_POINT: Coordinates = Coordinates {
    latitude: -15.8901,
    longitude: -52.2569,
};

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

/// Great-circle distance in kilometers between two points.
///
/// # Example
///
/// ```
/// use client_directory::geo::{haversine_km, Coordinates};
///
/// // One degree of latitude is roughly 111 km
/// let km = haversine_km(Coordinates::new(0.0, 0.0), Coordinates::new(1.0, 0.0));
/// assert!((km - 111.19).abs() < 0.1);
/// ```
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Haversine distance rounded to the nearest kilometer
pub fn distance_km(from: Coordinates, to: Coordinates) -> f64 {
    haversine_km(from, to).round()
}
