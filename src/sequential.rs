//! Non-optimizing itinerary: visit stops exactly in input order.
//!
//! This is a separate entry point from [`crate::optimizer::optimize`] and is
//! never substituted for it.

use tracing::{debug, warn};

use crate::deadline::Deadline;
use crate::error::PlanError;
use crate::location::{Location, coordinate_key};
use crate::report::{LegReport, RouteMode, RouteReport, round_km};
use crate::traits::{Coordinates, RouteProvider};

/// Routes origin → stops (in order) → origin.
///
/// Unresolved stops are skipped, consecutive stops at the same coordinates are
/// visited once, and the return leg is only added when the last stop is not
/// at the origin's coordinates.
pub fn route_in_order<R: RouteProvider>(
    origin: &Location,
    stops: &[Location],
    provider: &R,
    deadline: Deadline,
) -> Result<RouteReport, PlanError> {
    let origin_coords = origin
        .coordinates
        .ok_or_else(|| PlanError::UnresolvedAddress(origin.address.clone()))?;

    let mut dropped = Vec::new();
    let mut visits: Vec<(&str, Coordinates)> = Vec::new();
    for stop in stops {
        let Some(coords) = stop.coordinates else {
            warn!(address = %stop.address, "skipping unresolved stop");
            dropped.push(stop.address.clone());
            continue;
        };
        let repeat = visits
            .last()
            .is_some_and(|(_, prev)| coordinate_key(*prev) == coordinate_key(coords));
        if !repeat {
            visits.push((stop.address.as_str(), coords));
        }
    }

    if visits.is_empty() {
        return Err(PlanError::InsufficientData);
    }

    let mut waypoints = vec![(origin.address.as_str(), origin_coords)];
    waypoints.extend(visits);
    let (_, last) = waypoints[waypoints.len() - 1];
    if coordinate_key(last) != coordinate_key(origin_coords) {
        waypoints.push((origin.address.as_str(), origin_coords));
    }

    let mut legs = Vec::with_capacity(waypoints.len() - 1);
    for pair in waypoints.windows(2) {
        deadline.check()?;
        let (from, from_coords) = pair[0];
        let (to, to_coords) = pair[1];
        let distance_km = provider
            .route(from_coords, to_coords)
            .map(|leg| leg.distance_km)
            .filter(|km| km.is_finite() && *km >= 0.0)
            .ok_or_else(|| PlanError::RouteUnavailable {
                from: from.to_string(),
                to: to.to_string(),
            })?;
        legs.push(LegReport {
            from: from.to_string(),
            to: to.to_string(),
            distance_km,
        });
    }

    let total: f64 = legs.iter().map(|leg| leg.distance_km).sum();
    debug!(legs = legs.len(), total_km = total, "in-order route");

    Ok(RouteReport {
        waypoints: waypoints.iter().map(|(address, _)| address.to_string()).collect(),
        legs,
        total_km: round_km(total),
        mode: RouteMode::InOrder,
        dropped,
    })
}
