use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;

use crate::location::location_composer::{pick, AREA_FIELDS, CITY_FIELDS};
use crate::location::location_constants::{LOCAL_AREA_PLACEHOLDER, PROVIDER_OPEN_CAGE};
use crate::location::location_errors::LocationError;
use crate::location::location_model::{AddressCandidate, Coordinate, ResolverConfig};
use crate::location::providers::geocode_provider::GeocodeProvider;
use crate::location::providers::models::OpenCageResponse;

/// Keyed reverse geocoder raced in the fallback stage; only constructed when
/// an API key is configured.
pub struct OpenCageProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenCageProvider {
    pub fn new(config: &ResolverConfig, api_key: String) -> Result<Self, LocationError> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(OpenCageProvider {
            client,
            base_url: config.open_cage_url.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl GeocodeProvider for OpenCageProvider {
    fn name(&self) -> &'static str {
        PROVIDER_OPEN_CAGE
    }

    async fn reverse_geocode(
        &self,
        coordinate: &Coordinate,
    ) -> Result<AddressCandidate, LocationError> {
        let url = format!("{}/geocode/v1/json", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", format!("{},{}", coordinate.lat, coordinate.lon)),
                ("key", self.api_key.clone()),
                ("language", "en".to_string()),
                ("no_annotations", "1".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LocationError::ProviderError(format!(
                "OpenCage returned status {}",
                response.status()
            )));
        }

        let body: OpenCageResponse = response.json().await?;
        candidate_from_response(body)
    }
}

fn candidate_from_response(response: OpenCageResponse) -> Result<AddressCandidate, LocationError> {
    let result = response
        .results
        .into_iter()
        .next()
        .ok_or_else(|| LocationError::NoCandidate("response has no results".to_string()))?;

    let components = string_components(result.components);
    let city = pick(&components, CITY_FIELDS)
        .ok_or_else(|| LocationError::NoCandidate("result has no usable locality".to_string()))?;

    Ok(AddressCandidate {
        area: pick(&components, AREA_FIELDS),
        city: Some(city),
        road: Some(LOCAL_AREA_PLACEHOLDER.to_string()),
        ..Default::default()
    })
}

/// Component values may be numbers or arrays (ISO codes); only strings are
/// usable by the field tables.
fn string_components(components: HashMap<String, serde_json::Value>) -> HashMap<String, String> {
    components
        .into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::String(value) => Some((key, value)),
            _ => None,
        })
        .collect()
}
