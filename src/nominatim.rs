//! Nominatim HTTP adapter for address geocoding.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::traits::{Coordinates, Geocoder};

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying user agent.
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: format!("commute-planner/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    config: NominatimConfig,
    client: reqwest::blocking::Client,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.config.base_url.trim_end_matches('/'))
    }
}

impl Geocoder for NominatimClient {
    fn geocode(&self, address: &str) -> Option<Coordinates> {
        let address = address.trim();
        if address.is_empty() {
            return None;
        }

        debug!(address, "geocoding");
        let response = self
            .client
            .get(self.search_url())
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<Vec<NominatimPlace>>());

        match response {
            Ok(places) => {
                let found = first_match(&places);
                if found.is_none() {
                    warn!(address, "no geocoding match");
                }
                found
            }
            Err(err) => {
                warn!(address, error = %err, "geocoding request failed");
                None
            }
        }
    }
}

/// Nominatim encodes coordinates as strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

fn first_match(places: &[NominatimPlace]) -> Option<Coordinates> {
    let place = places.first()?;
    let lat = place.lat.parse::<f64>().ok()?;
    let lon = place.lon.parse::<f64>().ok()?;
    Some(Coordinates::new(lat, lon))
}
