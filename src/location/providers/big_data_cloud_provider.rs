use async_trait::async_trait;
use reqwest::Client;

use crate::location::location_constants::{LOCAL_AREA_PLACEHOLDER, PROVIDER_BIG_DATA_CLOUD};
use crate::location::location_errors::LocationError;
use crate::location::location_model::{AddressCandidate, Coordinate, ResolverConfig};
use crate::location::providers::geocode_provider::GeocodeProvider;
use crate::location::providers::models::BigDataCloudResponse;

/// Administrative levels probed for the area slot, in preference order.
const AREA_LEVELS: &[usize] = &[3, 4, 2];

/// Low-detail reverse geocoder raced in the fallback stage. Knows nothing
/// about water or roads, so accepted candidates carry the "Local Area"
/// placeholder as their infrastructure component.
pub struct BigDataCloudProvider {
    client: Client,
    base_url: String,
}

impl BigDataCloudProvider {
    pub fn new(config: &ResolverConfig) -> Result<Self, LocationError> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(BigDataCloudProvider {
            client,
            base_url: config.big_data_cloud_url.clone(),
        })
    }
}

#[async_trait]
impl GeocodeProvider for BigDataCloudProvider {
    fn name(&self) -> &'static str {
        PROVIDER_BIG_DATA_CLOUD
    }

    async fn reverse_geocode(
        &self,
        coordinate: &Coordinate,
    ) -> Result<AddressCandidate, LocationError> {
        let url = format!("{}/data/reverse-geocode-client", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", coordinate.lat.to_string()),
                ("longitude", coordinate.lon.to_string()),
                ("localityLanguage", "en".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LocationError::ProviderError(format!(
                "BigDataCloud returned status {}",
                response.status()
            )));
        }

        let body: BigDataCloudResponse = response.json().await?;
        candidate_from_response(body)
    }
}

fn candidate_from_response(
    response: BigDataCloudResponse,
) -> Result<AddressCandidate, LocationError> {
    let city = [
        response.city,
        response.locality,
        response.principal_subdivision,
        response.country_name,
    ]
    .into_iter()
    .flatten()
    .find(|value| !value.trim().is_empty())
    .ok_or_else(|| LocationError::NoCandidate("response has no usable locality".to_string()))?;

    let area = response.locality_info.as_ref().and_then(|info| {
        AREA_LEVELS.iter().find_map(|&index| {
            info.administrative
                .get(index)
                .and_then(|area| area.name.clone())
                .filter(|name| !name.trim().is_empty())
        })
    });

    Ok(AddressCandidate {
        city: Some(city),
        area,
        road: Some(LOCAL_AREA_PLACEHOLDER.to_string()),
        ..Default::default()
    })
}
