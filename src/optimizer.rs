//! Round-trip route optimizer (baseline implementation).
//!
//! Given a [`DistanceMatrix`] with the origin at index 0, finds the order in
//! which to visit stops `1..=N` so the closed tour origin → stops → origin is
//! as short as possible.
//!
//! Up to `exact_search_limit` stops every permutation is evaluated. Beyond
//! it the configured [`FallbackPolicy`] applies: either a nearest-neighbor
//! construction (optionally polished with 2-opt) or an explicit rejection.

use std::cmp::Ordering;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::PlanError;
use crate::matrix::DistanceMatrix;

/// Default number of stops up to which every permutation is evaluated.
pub const DEFAULT_EXACT_SEARCH_LIMIT: usize = 6;

/// What to do when a day has more stops than exact search allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Build an approximate tour greedily.
    #[default]
    NearestNeighbor,
    /// Refuse with [`PlanError::SearchThresholdExceeded`].
    Reject,
}

#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Largest stop count solved by full permutation search.
    pub exact_search_limit: usize,
    pub fallback: FallbackPolicy,
    /// Maximum 2-opt passes applied to a nearest-neighbor tour (0 disables).
    pub local_search_iterations: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            exact_search_limit: DEFAULT_EXACT_SEARCH_LIMIT,
            fallback: FallbackPolicy::NearestNeighbor,
            local_search_iterations: 0,
        }
    }
}

/// How a tour was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Zero or one stop: there is only one possible tour.
    Trivial,
    /// Every permutation was evaluated; the tour is optimal.
    Exact,
    /// Greedy heuristic; the tour is not guaranteed optimal.
    NearestNeighbor,
}

/// A closed tour over matrix indices, starting and ending at 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    pub order: Vec<usize>,
    pub cost: f64,
    pub mode: SearchMode,
}

impl Tour {
    pub fn is_approximate(&self) -> bool {
        self.mode == SearchMode::NearestNeighbor
    }

    /// Stop indices in visiting order, without the origin at either end.
    pub fn stops(&self) -> &[usize] {
        let len = self.order.len();
        if len < 2 { &[] } else { &self.order[1..len - 1] }
    }
}

/// Finds the cheapest closed tour from the origin through every stop.
pub fn optimize(matrix: &DistanceMatrix, options: &SearchOptions) -> Result<Tour, PlanError> {
    let n = matrix.stop_count();

    match n {
        0 => Ok(Tour {
            order: vec![0, 0],
            cost: 0.0,
            mode: SearchMode::Trivial,
        }),
        1 => Ok(Tour {
            order: vec![0, 1, 0],
            cost: matrix.get(0, 1) + matrix.get(1, 0),
            mode: SearchMode::Trivial,
        }),
        _ if n <= options.exact_search_limit => {
            debug!(stops = n, "exact permutation search");
            exact_search(matrix).ok_or(PlanError::InsufficientData)
        }
        _ => match options.fallback {
            FallbackPolicy::Reject => Err(PlanError::SearchThresholdExceeded {
                stops: n,
                limit: options.exact_search_limit,
            }),
            FallbackPolicy::NearestNeighbor => {
                warn!(
                    stops = n,
                    limit = options.exact_search_limit,
                    "too many stops for exact search; tour is approximate"
                );
                let mut tour = nearest_neighbor(matrix);
                local_search(matrix, &mut tour, options.local_search_iterations);
                Ok(tour)
            }
        },
    }
}

/// Cost of a closed tour given as matrix indices (origin included at both ends).
pub fn tour_cost(matrix: &DistanceMatrix, order: &[usize]) -> f64 {
    order.windows(2).map(|pair| matrix.get(pair[0], pair[1])).sum()
}

/// Cost of origin → `first` → `rest...` → origin.
fn closed_cost(matrix: &DistanceMatrix, first: usize, rest: &[usize]) -> f64 {
    let mut cost = matrix.get(0, first);
    let mut prev = first;
    for &stop in rest {
        cost += matrix.get(prev, stop);
        prev = stop;
    }
    cost + matrix.get(prev, 0)
}

/// Best permutation found within one first-stop branch.
struct Candidate {
    cost: f64,
    /// Position of the permutation in global lexicographic order is
    /// `(first, rank)`; lower wins ties.
    first: usize,
    rank: usize,
    rest: Vec<usize>,
}

impl Candidate {
    fn better_than(&self, other: &Candidate) -> bool {
        match self.cost.total_cmp(&other.cost) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => (self.first, self.rank) < (other.first, other.rank),
        }
    }
}

/// Evaluates every permutation of `1..=N` in lexicographic order.
///
/// Branches (one per first stop) run in parallel; the reduction compares
/// `(cost, lexicographic position)` so ties always resolve to the
/// permutation enumerated first, e.g. for stops {1, 2} the order 1, 2 wins
/// over 2, 1 at equal cost.
fn exact_search(matrix: &DistanceMatrix) -> Option<Tour> {
    let n = matrix.stop_count();

    let best = (1..=n)
        .into_par_iter()
        .map(|first| {
            let mut rest: Vec<usize> = (1..=n).filter(|&stop| stop != first).collect();
            let mut best = Candidate {
                cost: closed_cost(matrix, first, &rest),
                first,
                rank: 0,
                rest: rest.clone(),
            };
            let mut rank = 0;
            while next_permutation(&mut rest) {
                rank += 1;
                let cost = closed_cost(matrix, first, &rest);
                if cost < best.cost {
                    best = Candidate {
                        cost,
                        first,
                        rank,
                        rest: rest.clone(),
                    };
                }
            }
            best
        })
        .reduce_with(|a, b| if b.better_than(&a) { b } else { a })?;

    let mut order = Vec::with_capacity(n + 2);
    order.push(0);
    order.push(best.first);
    order.extend(best.rest);
    order.push(0);
    Some(Tour {
        order,
        cost: best.cost,
        mode: SearchMode::Exact,
    })
}

/// Rearranges `items` into the next lexicographic permutation.
///
/// Returns `false` (leaving `items` untouched) once the last permutation
/// has been reached.
fn next_permutation(items: &mut [usize]) -> bool {
    if items.len() < 2 {
        return false;
    }
    let mut i = items.len() - 1;
    while i > 0 && items[i - 1] >= items[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = items.len() - 1;
    while items[j] <= items[i - 1] {
        j -= 1;
    }
    items.swap(i - 1, j);
    items[i..].reverse();
    true
}

/// Greedy tour: always move to the closest unvisited stop.
///
/// Ties go to the lowest index, i.e. the stop seen first in the input.
fn nearest_neighbor(matrix: &DistanceMatrix) -> Tour {
    let n = matrix.stop_count();
    let mut visited = vec![false; n + 1];
    visited[0] = true;

    let mut order = Vec::with_capacity(n + 2);
    order.push(0);
    let mut current = 0;

    loop {
        let mut best: Option<(usize, f64)> = None;
        for candidate in 1..=n {
            if visited[candidate] {
                continue;
            }
            let d = matrix.get(current, candidate);
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((candidate, d));
            }
        }

        match best {
            Some((next, _)) => {
                visited[next] = true;
                order.push(next);
                current = next;
            }
            None => break,
        }
    }

    order.push(0);
    let cost = tour_cost(matrix, &order);
    Tour {
        order,
        cost,
        mode: SearchMode::NearestNeighbor,
    }
}

/// 2-opt: reverse a segment of stops if that shortens the tour.
/// Returns true if an improvement was made.
fn two_opt_improve(matrix: &DistanceMatrix, tour: &mut Tour) -> bool {
    // Positions 1..=n hold stops; the origin is fixed at both ends.
    let n = tour.order.len().saturating_sub(2);
    if n < 2 {
        return false;
    }

    for i in 1..n {
        for j in i + 1..=n {
            let mut candidate = tour.order.clone();
            candidate[i..=j].reverse();

            // Full re-evaluation: reversing changes every inner leg's direction.
            let cost = tour_cost(matrix, &candidate);
            if cost < tour.cost {
                tour.order = candidate;
                tour.cost = cost;
                return true;
            }
        }
    }

    false
}

/// Run 2-opt until no more improvements or max iterations reached.
fn local_search(matrix: &DistanceMatrix, tour: &mut Tour, iterations: usize) {
    for _ in 0..iterations {
        if !two_opt_improve(matrix, tour) {
            break;
        }
    }
}
