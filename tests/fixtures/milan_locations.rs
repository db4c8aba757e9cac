//! Real Milan-area places for realistic test fixtures.
//!
//! Coordinates are approximate (OpenStreetMap, rounded to 4 decimals).

use commute_planner::Coordinates;

/// A named place with coordinates.
#[derive(Debug, Clone)]
pub struct Place {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl Place {
    pub const fn new(name: &'static str, lat: f64, lon: f64) -> Self {
        Self { name, lat, lon }
    }

    pub fn coords(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}

// ============================================================================
// Homes (good for origins)
// ============================================================================

pub const HOMES: &[Place] = &[
    Place::new("Piazza del Duomo, Milano", 45.4642, 9.1916),
    Place::new("Villa Reale, Monza", 45.5911, 9.2747),
];

// ============================================================================
// Work sites
// ============================================================================

pub const WORK_SITES: &[Place] = &[
    Place::new("Stazione Centrale, Milano", 45.4860, 9.2047),
    Place::new("Politecnico di Milano", 45.4781, 9.2271),
    Place::new("Castello Sforzesco, Milano", 45.4705, 9.1793),
    Place::new("Darsena, Milano", 45.4521, 9.1757),
    Place::new("Stadio San Siro, Milano", 45.4781, 9.1240),
    Place::new("Universita Bocconi, Milano", 45.4504, 9.1893),
    Place::new("Aeroporto di Linate", 45.4493, 9.2766),
    Place::new("Sesto San Giovanni FS", 45.5357, 9.2335),
];
