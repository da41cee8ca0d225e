use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the map plus a radius in kilometres.
///
/// The radius means "acceptance radius" when attached to a match and "search
/// radius" when attached to a query or a player's home.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub radius_km: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius_km: 0.0,
        }
    }

    pub fn with_radius(latitude: f64, longitude: f64, radius_km: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius_km,
        }
    }

    /// Great-circle distance to `other` in kilometres.
    pub fn distance_km(&self, other: &Location) -> f64 {
        calculate_distance_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }

    /// Whether `other` lies inside this location's radius (edge inclusive).
    pub fn contains(&self, other: &Location) -> bool {
        self.distance_km(other) <= self.radius_km
    }

    /// Radius if one is set (positive), otherwise `None`.
    pub fn radius(&self) -> Option<f64> {
        (self.radius_km > 0.0).then_some(self.radius_km)
    }
}

/// Haversine distance between two coordinates in kilometres.
pub fn calculate_distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlng = (lng2 - lng1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlng / 2.0).sin().powi(2);

    // Rounding can push `a` a hair past 1.0 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
