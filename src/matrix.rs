//! Pairwise distance matrix for one origin and a day's stops.
//!
//! Index 0 is always the origin. Every off-diagonal entry is looked up on its
//! own, so `get(i, j)` and `get(j, i)` may differ.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::deadline::Deadline;
use crate::error::PlanError;
use crate::location::{Location, normalize_address};
use crate::traits::{Coordinates, RouteProvider};

/// A dense n×n matrix of travel distances in kilometers, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a matrix from explicit rows.
    ///
    /// Returns `None` unless the rows are square with finite, non-negative
    /// entries. The diagonal is forced to zero.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let size = rows.len();
        let mut matrix = Self::new(size);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return None;
            }
            for (j, &value) in row.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return None;
                }
                if i != j {
                    matrix.set(i, j, value);
                }
            }
        }
        Some(matrix)
    }

    /// Distance from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of nodes, origin included.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of stops (nodes other than the origin).
    pub fn stop_count(&self) -> usize {
        self.size.saturating_sub(1)
    }
}

/// Result of [`build_matrix`].
#[derive(Debug, Clone)]
pub struct MatrixBuild {
    pub matrix: DistanceMatrix,
    /// `locations[i]` is the node at matrix index `i`; `locations[0]` is the origin.
    pub locations: Vec<Location>,
    /// Addresses excluded because they had no coordinates.
    pub dropped: Vec<String>,
}

/// Builds the distance matrix for `origin` and the unique resolved stops.
///
/// Stops are deduplicated by normalized address in first-seen order and
/// unresolved ones are dropped. The first leg the provider cannot route aborts
/// the whole build; a partial matrix is never returned.
pub fn build_matrix<R: RouteProvider>(
    origin: &Location,
    candidates: &[Location],
    provider: &R,
    deadline: Deadline,
) -> Result<MatrixBuild, PlanError> {
    let origin_coords = origin
        .coordinates
        .ok_or_else(|| PlanError::UnresolvedAddress(origin.address.clone()))?;

    let (stops, dropped) = unique_resolved_stops(candidates);
    if stops.is_empty() {
        return Err(PlanError::InsufficientData);
    }

    let mut locations = Vec::with_capacity(stops.len() + 1);
    locations.push(origin.clone());
    locations.extend(stops);

    let coords: Vec<Coordinates> = std::iter::once(origin_coords)
        .chain(locations[1..].iter().filter_map(|stop| stop.coordinates))
        .collect();

    let n = coords.len();
    let mut matrix = DistanceMatrix::new(n);

    // origin -> stop, stop -> origin, then stop -> stop in both directions.
    let pairs = (1..n)
        .map(|j| (0, j))
        .chain((1..n).map(|i| (i, 0)))
        .chain((1..n).flat_map(|i| (1..n).filter(move |&j| j != i).map(move |j| (i, j))));

    let mut lookups = 0usize;
    for (i, j) in pairs {
        deadline.check()?;
        let distance = provider
            .route(coords[i], coords[j])
            .map(|leg| leg.distance_km)
            .filter(|km| km.is_finite() && *km >= 0.0)
            .ok_or_else(|| PlanError::RouteUnavailable {
                from: locations[i].address.clone(),
                to: locations[j].address.clone(),
            })?;
        matrix.set(i, j, distance);
        lookups += 1;
    }

    debug!(stops = n - 1, lookups, "distance matrix built");

    Ok(MatrixBuild {
        matrix,
        locations,
        dropped,
    })
}

fn unique_resolved_stops(candidates: &[Location]) -> (Vec<Location>, Vec<String>) {
    let mut seen = HashSet::new();
    let mut stops = Vec::new();
    let mut dropped = Vec::new();

    for candidate in candidates {
        let key = normalize_address(&candidate.address);
        if !seen.insert(key) {
            continue;
        }
        if candidate.is_resolved() {
            stops.push(candidate.clone());
        } else {
            warn!(address = %candidate.address, "dropping unresolved stop");
            dropped.push(candidate.address.clone());
        }
    }

    (stops, dropped)
}
