//! Per-day time budget.

use std::time::{Duration, Instant};

use crate::error::PlanError;

/// An optional point in time after which planning gives up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn at(instant: Instant) -> Self {
        Self(Some(instant))
    }

    /// A budget too large to represent as an instant means no deadline.
    pub fn after(budget: Option<Duration>) -> Self {
        Self(budget.and_then(|budget| Instant::now().checked_add(budget)))
    }

    pub fn is_expired(&self) -> bool {
        self.0.is_some_and(|instant| Instant::now() >= instant)
    }

    pub fn check(&self) -> Result<(), PlanError> {
        if self.is_expired() {
            Err(PlanError::Timeout)
        } else {
            Ok(())
        }
    }
}
