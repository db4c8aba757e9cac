//! Error types for planning and input loading.

use thiserror::Error;

/// Why a day's route could not be computed.
///
/// Every variant is local to one day; other days keep being planned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// The geocoder returned nothing for an address the route cannot do without.
    #[error("address could not be resolved: {0}")]
    UnresolvedAddress(String),

    /// A required leg had no route.
    #[error("no route from {from} to {to}")]
    RouteUnavailable { from: String, to: String },

    /// No resolved stops remained after filtering.
    #[error("no resolvable stops for this day")]
    InsufficientData,

    /// Exact search was requested beyond its limit and fallback is disabled.
    #[error("{stops} stops exceed the exact search limit of {limit}")]
    SearchThresholdExceeded { stops: usize, limit: usize },

    /// The per-day time budget ran out.
    #[error("planning timed out")]
    Timeout,
}

impl PlanError {
    /// Short machine-friendly label used in summary tables.
    pub fn status(&self) -> &'static str {
        match self {
            PlanError::UnresolvedAddress(_) => "unresolved_address",
            PlanError::RouteUnavailable { .. } => "route_unavailable",
            PlanError::InsufficientData => "insufficient_data",
            PlanError::SearchThresholdExceeded { .. } => "search_threshold_exceeded",
            PlanError::Timeout => "timeout",
        }
    }
}

/// Errors from reading the day-grouped CSV input.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
}
