//! Test fixtures for commute-planner.
//!
//! Provides:
//! - Real Milan-area locations (approximate, from OpenStreetMap)
//! - Table-driven geocoder and route provider with call counters

#![allow(dead_code)]

pub mod milan_locations;

pub use milan_locations::*;

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use commute_planner::location::coordinate_key;
use commute_planner::{Coordinates, Geocoder, Leg, RouteProvider};

// ============================================================================
// Geocoder
// ============================================================================

/// Resolves only the addresses it was given; counts every call.
#[derive(Default)]
pub struct TableGeocoder {
    entries: HashMap<String, Coordinates>,
    pub calls: Cell<usize>,
}

impl TableGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, address: &str, lat: f64, lon: f64) -> Self {
        self.entries.insert(address.to_string(), Coordinates::new(lat, lon));
        self
    }

    pub fn with_places(mut self, places: &[Place]) -> Self {
        for place in places {
            self.entries.insert(place.name.to_string(), place.coords());
        }
        self
    }
}

impl Geocoder for TableGeocoder {
    fn geocode(&self, address: &str) -> Option<Coordinates> {
        self.calls.set(self.calls.get() + 1);
        self.entries.get(address).copied()
    }
}

// ============================================================================
// Route provider
// ============================================================================

/// Manhattan distance in degrees (as km), with directed overrides and
/// pairs that have no route. Records every lookup.
#[derive(Default)]
pub struct TableRoutes {
    overrides: HashMap<(String, String), f64>,
    blocked: HashSet<(String, String)>,
    pub calls: RefCell<Vec<(Coordinates, Coordinates)>>,
}

impl TableRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directed cost `from → to`.
    pub fn cost(mut self, from: Coordinates, to: Coordinates, km: f64) -> Self {
        self.overrides.insert((coordinate_key(from), coordinate_key(to)), km);
        self
    }

    /// Sets both directions to `km`.
    pub fn both(self, a: Coordinates, b: Coordinates, km: f64) -> Self {
        self.cost(a, b, km).cost(b, a, km)
    }

    /// Makes `from → to` unroutable.
    pub fn block(mut self, from: Coordinates, to: Coordinates) -> Self {
        self.blocked.insert((coordinate_key(from), coordinate_key(to)));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl RouteProvider for TableRoutes {
    fn route(&self, from: Coordinates, to: Coordinates) -> Option<Leg> {
        self.calls.borrow_mut().push((from, to));
        let key = (coordinate_key(from), coordinate_key(to));
        if self.blocked.contains(&key) {
            return None;
        }
        let distance_km = self
            .overrides
            .get(&key)
            .copied()
            .unwrap_or_else(|| (from.lat - to.lat).abs() + (from.lon - to.lon).abs());
        Some(Leg {
            distance_km,
            duration_min: distance_km,
        })
    }
}
