//! Memoizing wrappers for the geocoding and routing collaborators.
//!
//! Misses are cached too, so an address that failed once is not retried
//! for the lifetime of the cache. The caller owns the cache and decides how
//! long it lives (typically one process run, shared across days).

use std::collections::HashMap;
use parking_lot::Mutex;
use tracing::trace;

use crate::location::{coordinate_key, normalize_address};
use crate::traits::{Coordinates, Geocoder, Leg, RouteProvider};

/// Caches geocoding results by normalized address.
#[derive(Debug)]
pub struct CachedGeocoder<G> {
    inner: G,
    entries: Mutex<HashMap<String, Option<Coordinates>>>,
}

impl<G> CachedGeocoder<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<G: Geocoder> Geocoder for CachedGeocoder<G> {
    fn geocode(&self, address: &str) -> Option<Coordinates> {
        let key = normalize_address(address);
        if key.is_empty() {
            return None;
        }

        if let Some(hit) = self.entries.lock().get(&key) {
            trace!(address, "geocode cache hit");
            return *hit;
        }

        // Lock is released before the inner call.
        let result = self.inner.geocode(address);
        self.entries.lock().insert(key, result);
        result
    }
}

/// Caches directed route lookups by ordered coordinate pair.
#[derive(Debug)]
pub struct CachedRoutes<R> {
    inner: R,
    entries: Mutex<HashMap<(String, String), Option<Leg>>>,
}

impl<R> CachedRoutes<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R: RouteProvider> RouteProvider for CachedRoutes<R> {
    fn route(&self, from: Coordinates, to: Coordinates) -> Option<Leg> {
        let key = (coordinate_key(from), coordinate_key(to));

        if let Some(hit) = self.entries.lock().get(&key) {
            trace!(from = %key.0, to = %key.1, "route cache hit");
            return *hit;
        }

        let result = self.inner.route(from, to);
        self.entries.lock().insert(key, result);
        result
    }
}
