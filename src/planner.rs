//! Per-day pipeline: geocode → distance matrix → optimize → report.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{info, warn};

use crate::deadline::Deadline;
use crate::error::PlanError;
use crate::input::DayGroup;
use crate::location::{Location, normalize_address};
use crate::matrix::build_matrix;
use crate::optimizer::{SearchOptions, optimize};
use crate::report::{DaySummary, RouteReport};
use crate::sequential::route_in_order;
use crate::traits::{Coordinates, Geocoder, RouteProvider};

/// Which entry point turns a day's stops into a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Shortest round trip (exact search, or the configured fallback).
    #[default]
    Optimize,
    /// Visit stops in input order without optimizing.
    InOrder,
}

#[derive(Debug, Clone, Default)]
pub struct PlannerConfig {
    pub search: SearchOptions,
    pub strategy: Strategy,
    /// Budget for one day's whole computation; `None` means unlimited.
    pub day_timeout: Option<Duration>,
}

/// The result of planning one day.
#[derive(Debug, Clone)]
pub struct DayOutcome {
    pub day: String,
    pub result: Result<RouteReport, PlanError>,
}

impl DayOutcome {
    pub fn summary(&self) -> DaySummary {
        match &self.result {
            Ok(report) => DaySummary {
                day: self.day.clone(),
                distance_km: Some(report.total_km),
                status: report.mode.label().to_string(),
            },
            Err(err) => DaySummary {
                day: self.day.clone(),
                distance_km: None,
                status: err.status().to_string(),
            },
        }
    }
}

/// Plans days against borrowed collaborators.
///
/// The planner holds no state of its own between days; wrap the collaborators
/// in [`crate::cache`] types to reuse lookups across days.
pub struct Planner<'a, G, R> {
    geocoder: &'a G,
    routes: &'a R,
    config: PlannerConfig,
}

impl<'a, G, R> Planner<'a, G, R>
where
    G: Geocoder,
    R: RouteProvider,
{
    pub fn new(geocoder: &'a G, routes: &'a R, config: PlannerConfig) -> Self {
        Self {
            geocoder,
            routes,
            config,
        }
    }

    /// Plans every day independently; a failing day does not stop the rest.
    pub fn plan_days(&self, groups: &[DayGroup]) -> Vec<DayOutcome> {
        groups
            .iter()
            .map(|group| {
                let result = self.plan_day(group);
                match &result {
                    Ok(report) => info!(
                        day = %group.day,
                        total_km = report.total_km,
                        mode = report.mode.label(),
                        "day planned"
                    ),
                    Err(err) => warn!(day = %group.day, error = %err, "day not computable"),
                }
                DayOutcome {
                    day: group.day.clone(),
                    result,
                }
            })
            .collect()
    }

    /// Plans a single day.
    pub fn plan_day(&self, group: &DayGroup) -> Result<RouteReport, PlanError> {
        let deadline = Deadline::after(self.config.day_timeout);

        let home = group
            .home
            .as_deref()
            .ok_or_else(|| PlanError::UnresolvedAddress("(no home address)".to_string()))?;
        if group.stops.is_empty() {
            return Err(PlanError::InsufficientData);
        }

        let mut resolved: HashMap<String, Option<Coordinates>> = HashMap::new();
        let mut locate = |address: &str| -> Result<Location, PlanError> {
            let key = normalize_address(address);
            let coordinates = match resolved.get(&key) {
                Some(coordinates) => *coordinates,
                None => {
                    deadline.check()?;
                    let coordinates = self.geocoder.geocode(address);
                    resolved.insert(key, coordinates);
                    coordinates
                }
            };
            Ok(Location::new(address, coordinates))
        };

        let origin = locate(home)?;
        if !origin.is_resolved() {
            return Err(PlanError::UnresolvedAddress(home.to_string()));
        }
        let stops = group
            .stops
            .iter()
            .map(|stop| locate(stop.as_str()))
            .collect::<Result<Vec<_>, _>>()?;

        let report = match self.config.strategy {
            Strategy::InOrder => route_in_order(&origin, &stops, self.routes, deadline)?,
            Strategy::Optimize => {
                let build = build_matrix(&origin, &stops, self.routes, deadline)?;
                let tour = optimize(&build.matrix, &self.config.search)?;
                RouteReport::from_tour(&tour, &build)
            }
        };

        // A result finished past the budget is discarded, never reported partially.
        deadline.check()?;
        Ok(report)
    }
}
