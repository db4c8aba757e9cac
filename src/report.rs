//! Human- and table-friendly views of a planned day.

use std::fmt;
use std::io::Write;

use serde::Serialize;

use crate::matrix::MatrixBuild;
use crate::optimizer::{SearchMode, Tour};

/// How the visiting order of a report was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMode {
    /// Provably shortest round trip.
    Optimal,
    /// Heuristic round trip, possibly longer than the optimum.
    Approximate,
    /// Stops visited in input order, no optimization.
    InOrder,
}

impl RouteMode {
    pub fn label(&self) -> &'static str {
        match self {
            RouteMode::Optimal => "optimal",
            RouteMode::Approximate => "approximate",
            RouteMode::InOrder => "in_order",
        }
    }
}

impl From<SearchMode> for RouteMode {
    fn from(mode: SearchMode) -> Self {
        match mode {
            SearchMode::Trivial | SearchMode::Exact => RouteMode::Optimal,
            SearchMode::NearestNeighbor => RouteMode::Approximate,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegReport {
    pub from: String,
    pub to: String,
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteReport {
    /// Addresses in visiting order, the origin first (and last when the
    /// route returns to it).
    pub waypoints: Vec<String>,
    pub legs: Vec<LegReport>,
    /// Sum of all legs, rounded to two decimals.
    pub total_km: f64,
    pub mode: RouteMode,
    /// Stops left out because they could not be geocoded.
    pub dropped: Vec<String>,
}

impl RouteReport {
    /// Builds a report from an optimized tour over `build`'s matrix.
    pub fn from_tour(tour: &Tour, build: &MatrixBuild) -> Self {
        let waypoints = tour
            .order
            .iter()
            .map(|&index| build.locations[index].address.clone())
            .collect();

        let legs = tour
            .order
            .windows(2)
            .map(|pair| LegReport {
                from: build.locations[pair[0]].address.clone(),
                to: build.locations[pair[1]].address.clone(),
                distance_km: build.matrix.get(pair[0], pair[1]),
            })
            .collect();

        Self {
            waypoints,
            legs,
            total_km: round_km(tour.cost),
            mode: tour.mode.into(),
            dropped: build.dropped.clone(),
        }
    }

    pub fn returns_home(&self) -> bool {
        self.waypoints.len() > 1 && self.waypoints.first() == self.waypoints.last()
    }
}

impl fmt::Display for RouteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.waypoints.len().saturating_sub(1);
        for (i, address) in self.waypoints.iter().enumerate() {
            let label = if i == 0 {
                "Start at home"
            } else if i == last && self.returns_home() {
                "Return home"
            } else {
                "Visit"
            };
            write!(f, "{}. {}: {}", i + 1, label, address)?;
            if i > 0 {
                write!(f, " (+{:.2} km)", self.legs[i - 1].distance_km)?;
            }
            writeln!(f)?;
        }
        write!(f, "Total distance: {:.2} km", self.total_km)?;
        if self.mode != RouteMode::Optimal {
            write!(f, " ({})", self.mode.label().replace('_', " "))?;
        }
        for address in &self.dropped {
            write!(f, "\nSkipped (not found): {}", address)?;
        }
        Ok(())
    }
}

/// Rounds kilometers to two decimals.
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

/// One row of the per-day summary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub day: String,
    /// Empty when the day could not be computed.
    pub distance_km: Option<f64>,
    pub status: String,
}

/// Writes `day,distance_km,status` rows with a header.
pub fn write_summary_csv<W: Write>(writer: W, summaries: &[DaySummary]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for summary in summaries {
        writer.serialize(summary)?;
    }
    writer.flush()?;
    Ok(())
}
