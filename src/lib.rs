//! commute-planner core
//!
//! Plans daily round trips from a home address through a set of work
//! addresses: geocode, build a pairwise distance matrix, find the shortest
//! visiting order and report per-day totals.

pub mod traits;
pub mod location;
pub mod error;
pub mod deadline;
pub mod matrix;
pub mod optimizer;
pub mod sequential;
pub mod report;
pub mod input;
pub mod planner;
pub mod cache;
pub mod rate_limit;
pub mod osrm;
pub mod nominatim;
pub mod haversine;

pub use error::{InputError, PlanError};
pub use planner::{DayOutcome, Planner, PlannerConfig, Strategy};
pub use traits::{Coordinates, Geocoder, Leg, RouteProvider};
