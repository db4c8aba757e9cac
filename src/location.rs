//! Addresses and their resolved coordinates.

use crate::traits::Coordinates;

/// An address plus the coordinates it resolved to, if any.
///
/// A location without coordinates is never given a distance; it is dropped
/// before a matrix is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub address: String,
    pub coordinates: Option<Coordinates>,
}

impl Location {
    pub fn new(address: impl Into<String>, coordinates: Option<Coordinates>) -> Self {
        Self {
            address: address.into(),
            coordinates,
        }
    }

    pub fn resolved(address: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self::new(address, Some(Coordinates::new(lat, lon)))
    }

    pub fn unresolved(address: impl Into<String>) -> Self {
        Self::new(address, None)
    }

    pub fn is_resolved(&self) -> bool {
        self.coordinates.is_some()
    }
}

/// Key used to decide whether two addresses name the same place.
///
/// Trims, collapses internal whitespace and lowercases.
pub fn normalize_address(address: &str) -> String {
    address
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Stable key for a coordinate pair (micro-degree precision).
pub fn coordinate_key(coordinates: Coordinates) -> String {
    format!("{:.6},{:.6}", coordinates.lat, coordinates.lon)
}
