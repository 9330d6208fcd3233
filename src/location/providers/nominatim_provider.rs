use async_trait::async_trait;
use reqwest::Client;

use crate::location::location_composer::{
    pick, AREA_FIELDS, CITY_FIELDS, HIGHWAY_FIELDS, ROAD_FIELDS, WATER_FIELDS,
};
use crate::location::location_constants::PROVIDER_NOMINATIM;
use crate::location::location_errors::LocationError;
use crate::location::location_model::{AddressCandidate, Coordinate, ResolverConfig};
use crate::location::providers::geocode_provider::GeocodeProvider;
use crate::location::providers::models::NominatimResponse;

/// Extratag keys consulted when the address object lacks a slot.
const EXTRA_WATER_FIELDS: &[&str] = &["waterway", "water"];
const EXTRA_HIGHWAY_FIELDS: &[&str] = &["highway", "route"];

/// Detailed tag-rich reverse geocoder; first stage of the chain.
pub struct NominatimProvider {
    client: Client,
    base_url: String,
}

impl NominatimProvider {
    pub fn new(config: &ResolverConfig) -> Result<Self, LocationError> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(NominatimProvider {
            client,
            base_url: config.nominatim_url.clone(),
        })
    }
}

#[async_trait]
impl GeocodeProvider for NominatimProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NOMINATIM
    }

    async fn reverse_geocode(
        &self,
        coordinate: &Coordinate,
    ) -> Result<AddressCandidate, LocationError> {
        let url = format!("{}/reverse", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "json".to_string()),
                ("lat", coordinate.lat.to_string()),
                ("lon", coordinate.lon.to_string()),
                ("zoom", "18".to_string()),
                ("addressdetails", "1".to_string()),
                ("extratags", "1".to_string()),
                ("namedetails", "1".to_string()),
                ("accept-language", "en".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LocationError::ProviderError(format!(
                "Nominatim returned status {}",
                response.status()
            )));
        }

        let body: NominatimResponse = response.json().await?;
        candidate_from_response(body)
    }
}

/// Maps the `address` and `extratags` sub-objects onto a candidate using the
/// shared field-priority tables. Address fields win over extratags.
fn candidate_from_response(response: NominatimResponse) -> Result<AddressCandidate, LocationError> {
    let address = response
        .address
        .ok_or_else(|| LocationError::NoCandidate("response has no address object".to_string()))?;
    let extratags = response.extratags.unwrap_or_default();

    Ok(AddressCandidate {
        city: pick(&address, CITY_FIELDS),
        area: pick(&address, AREA_FIELDS),
        water_body: pick(&address, WATER_FIELDS)
            .or_else(|| pick(&extratags, EXTRA_WATER_FIELDS)),
        highway: pick(&address, HIGHWAY_FIELDS)
            .or_else(|| pick(&extratags, EXTRA_HIGHWAY_FIELDS)),
        road: pick(&address, ROAD_FIELDS),
    })
}
