use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::location::location_constants::{
    DEFAULT_MIN_LOOKUP_INTERVAL_MS, DEFAULT_USER_AGENT,
};

/// A latitude/longitude pair, constructed once per lookup.
///
/// Range validation is the caller's responsibility; out-of-range values
/// produce a low-quality label rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Coordinate { lat, lon }
    }

    /// Key used by the rate gate: both axes rounded to 4 decimal places.
    pub fn rate_key(&self) -> String {
        format!("{:.4},{:.4}", self.lat, self.lon)
    }

    /// Coarse quadrant of the globe, decided by the sign of each axis.
    pub fn quadrant(&self) -> Quadrant {
        if self.lat > 0.0 {
            if self.lon > 0.0 {
                Quadrant::Northeast
            } else {
                Quadrant::Northwest
            }
        } else if self.lon > 0.0 {
            Quadrant::Southeast
        } else {
            Quadrant::Southwest
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quadrant {
    Northeast,
    Northwest,
    Southeast,
    Southwest,
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_string = match self {
            Quadrant::Northeast => "Northeast",
            Quadrant::Northwest => "Northwest",
            Quadrant::Southeast => "Southeast",
            Quadrant::Southwest => "Southwest",
        };
        write!(f, "{}", display_string)
    }
}

/// Semantic fields extracted from a single provider response.
///
/// Created fresh per response and discarded after composition. Not all fields
/// are present for every provider; the composer decides whether the candidate
/// qualifies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressCandidate {
    pub city: Option<String>,
    pub area: Option<String>,
    pub water_body: Option<String>,
    pub highway: Option<String>,
    pub road: Option<String>,
}

/// Final output of a lookup.
///
/// `sequence` increases monotonically per service instance so that a caller
/// receiving out-of-order resolutions can discard stale ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLocation {
    pub label: String,
    pub coordinate: Coordinate,
    pub sequence: u64,
    pub source: String,
    pub resolved_at: DateTime<Utc>,
}

/// Resolver configuration. Base URLs are overridable so tests and self-hosted
/// deployments can point at their own endpoints.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub user_agent: String,
    pub nominatim_url: String,
    pub overpass_url: String,
    pub big_data_cloud_url: String,
    pub open_cage_url: String,
    /// OpenCage is only added to the fallback race when a key is configured.
    pub open_cage_api_key: Option<String>,
    pub min_lookup_interval: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            nominatim_url: "https://nominatim.openstreetmap.org".to_string(),
            overpass_url: "https://overpass-api.de/api/interpreter".to_string(),
            big_data_cloud_url: "https://api.bigdatacloud.net".to_string(),
            open_cage_url: "https://api.opencagedata.com".to_string(),
            open_cage_api_key: None,
            min_lookup_interval: Duration::from_millis(DEFAULT_MIN_LOOKUP_INTERVAL_MS),
        }
    }
}
