//! Collaborator traits for the commute planner.
//!
//! Geocoding and routing are external services. The planner only needs the
//! two narrow interfaces below; concrete clients live in `nominatim`, `osrm`
//! and `haversine`.

/// A resolved WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

/// Travel cost of a single directed leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    pub distance_km: f64,
    pub duration_min: f64,
}

/// Resolves an address to coordinates.
///
/// `None` means the address could not be resolved (no match or a transport
/// error). Callers treat it as "unresolved" and never retry.
pub trait Geocoder {
    fn geocode(&self, address: &str) -> Option<Coordinates>;
}

/// Provides the travel cost between two coordinates.
///
/// Lookups are directed: `route(a, b)` and `route(b, a)` may differ.
pub trait RouteProvider {
    fn route(&self, from: Coordinates, to: Coordinates) -> Option<Leg>;
}

impl<T: Geocoder + ?Sized> Geocoder for &T {
    fn geocode(&self, address: &str) -> Option<Coordinates> {
        (**self).geocode(address)
    }
}

impl<T: RouteProvider + ?Sized> RouteProvider for &T {
    fn route(&self, from: Coordinates, to: Coordinates) -> Option<Leg> {
        (**self).route(from, to)
    }
}

impl<T: RouteProvider + ?Sized> RouteProvider for Box<T> {
    fn route(&self, from: Coordinates, to: Coordinates) -> Option<Leg> {
        (**self).route(from, to)
    }
}
