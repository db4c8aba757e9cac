//! Process-wide minimum delay between calls to external services.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::trace;

use crate::traits::{Coordinates, Geocoder, Leg, RouteProvider};

/// Grants at most one call per `min_interval`.
///
/// Share one limiter (via `Arc`) between every collaborator that talks to a
/// rate-limited service so the limit holds across all of them.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    pub fn shared(min_interval: Duration) -> Arc<Self> {
        Arc::new(Self::new(min_interval))
    }

    /// Blocks until a call is allowed, then records it.
    pub fn acquire(&self) {
        // The lock is held while sleeping so concurrent callers queue up.
        let mut last_call = self.last_call.lock();
        if let Some(previous) = *last_call {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                trace!(?wait, "rate limiting");
                std::thread::sleep(wait);
            }
        }
        *last_call = Some(Instant::now());
    }
}

/// A collaborator that waits on a shared [`RateLimiter`] before every call.
#[derive(Debug, Clone)]
pub struct Throttled<P> {
    inner: P,
    limiter: Arc<RateLimiter>,
}

impl<P> Throttled<P> {
    pub fn new(inner: P, limiter: Arc<RateLimiter>) -> Self {
        Self { inner, limiter }
    }
}

impl<G: Geocoder> Geocoder for Throttled<G> {
    fn geocode(&self, address: &str) -> Option<Coordinates> {
        self.limiter.acquire();
        self.inner.geocode(address)
    }
}

impl<R: RouteProvider> RouteProvider for Throttled<R> {
    fn route(&self, from: Coordinates, to: Coordinates) -> Option<Leg> {
        self.limiter.acquire();
        self.inner.route(from, to)
    }
}
