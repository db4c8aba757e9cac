//! OSRM HTTP adapter for single-leg routes.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::traits::{Coordinates, Leg, RouteProvider};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn route_url(&self, from: Coordinates, to: Coordinates) -> String {
        // OSRM wants lon,lat.
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=false",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            from.lon,
            from.lat,
            to.lon,
            to.lat
        )
    }
}

impl RouteProvider for OsrmClient {
    fn route(&self, from: Coordinates, to: Coordinates) -> Option<Leg> {
        let url = self.route_url(from, to);
        debug!(%url, "requesting OSRM route");

        let response = self
            .client
            .get(&url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmRouteResponse>());

        match response {
            Ok(body) => {
                let leg = body.first_leg();
                if leg.is_none() {
                    warn!(code = %body.code, "OSRM returned no usable route");
                }
                leg
            }
            Err(err) => {
                warn!(error = %err, "OSRM request failed");
                None
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Meters.
    distance: f64,
    /// Seconds.
    duration: f64,
}

impl OsrmRouteResponse {
    fn first_leg(&self) -> Option<Leg> {
        if self.code != "Ok" {
            return None;
        }
        let route = self.routes.first()?;
        if !route.distance.is_finite() || route.distance < 0.0 {
            return None;
        }
        Some(Leg {
            distance_km: route.distance / 1000.0,
            duration_min: route.duration / 60.0,
        })
    }
}
