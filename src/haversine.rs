//! Haversine route provider (offline fallback when OSRM is unavailable).
//!
//! Uses great-circle distance to estimate leg length and travel time.
//! Less accurate than OSRM (ignores roads) but always available.

use crate::traits::{Coordinates, Leg, RouteProvider};

/// Average driving speed assumption for time estimation.
const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine-based route provider.
#[derive(Debug, Clone)]
pub struct HaversineRoutes {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
}

impl Default for HaversineRoutes {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl HaversineRoutes {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Great-circle distance between two points in kilometers.
    pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
        let lat1_rad = from.lat.to_radians();
        let lat2_rad = to.lat.to_radians();
        let delta_lat = (to.lat - from.lat).to_radians();
        let delta_lon = (to.lon - from.lon).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }

    fn km_to_minutes(&self, km: f64) -> f64 {
        km / self.speed_kmh * 60.0
    }
}

impl RouteProvider for HaversineRoutes {
    fn route(&self, from: Coordinates, to: Coordinates) -> Option<Leg> {
        if self.speed_kmh <= 0.0 {
            return None;
        }
        let km = Self::haversine_km(from, to);
        Some(Leg {
            distance_km: km,
            duration_min: self.km_to_minutes(km),
        })
    }
}
