use futures::future::select_ok;
use log::{info, warn};
use std::sync::Arc;

use crate::location::location_composer::{compose, coordinate_label};
use crate::location::location_constants::PROVIDER_COORDINATE;
use crate::location::location_errors::LocationError;
use crate::location::location_model::{AddressCandidate, Coordinate, ResolverConfig};
use crate::location::providers::big_data_cloud_provider::BigDataCloudProvider;
use crate::location::providers::geocode_provider::GeocodeProvider;
use crate::location::providers::nominatim_provider::NominatimProvider;
use crate::location::providers::open_cage_provider::OpenCageProvider;
use crate::location::providers::overpass_provider::OverpassProvider;

/// The ordered provider chain.
///
/// Primary providers are tried strictly in sequence and short-circuit on the
/// first candidate that satisfies the mandatory fields. The simple fallback
/// providers are raced in parallel, first success with a city wins. The
/// coordinate-literal label closes the chain and always succeeds, so a lookup
/// takes at most four stages and `resolve` cannot fail.
pub struct ProviderRegistry {
    primary_providers: Vec<Arc<dyn GeocodeProvider>>,
    fallback_providers: Vec<Arc<dyn GeocodeProvider>>,
}

impl ProviderRegistry {
    pub fn new(config: &ResolverConfig) -> Result<Self, LocationError> {
        let primary_providers: Vec<Arc<dyn GeocodeProvider>> = vec![
            Arc::new(NominatimProvider::new(config)?),
            Arc::new(OverpassProvider::new(config)?),
        ];

        let mut fallback_providers: Vec<Arc<dyn GeocodeProvider>> =
            vec![Arc::new(BigDataCloudProvider::new(config)?)];
        if let Some(api_key) = config.open_cage_api_key.as_ref().filter(|key| !key.is_empty()) {
            fallback_providers.push(Arc::new(OpenCageProvider::new(config, api_key.clone())?));
            info!("OpenCage fallback provider configured.");
        }

        Ok(ProviderRegistry {
            primary_providers,
            fallback_providers,
        })
    }

    /// Builds a registry from explicit provider lists. Intended for tests and
    /// embedders with their own backends.
    pub fn with_providers(
        primary_providers: Vec<Arc<dyn GeocodeProvider>>,
        fallback_providers: Vec<Arc<dyn GeocodeProvider>>,
    ) -> Self {
        ProviderRegistry {
            primary_providers,
            fallback_providers,
        }
    }

    /// Resolves a coordinate to a display label and the name of the stage that
    /// produced it. Every stage failure degrades to the next stage.
    pub async fn resolve(&self, coordinate: &Coordinate) -> (String, &'static str) {
        for provider in &self.primary_providers {
            match provider.reverse_geocode(coordinate).await {
                Ok(candidate) => match compose(&candidate) {
                    Some(label) => {
                        info!(
                            "Provider '{}' resolved ({}) to '{}'.",
                            provider.name(),
                            coordinate,
                            label
                        );
                        return (label, provider.name());
                    }
                    None => info!(
                        "Provider '{}' returned an incomplete candidate for ({}). Trying next.",
                        provider.name(),
                        coordinate
                    ),
                },
                Err(e) => warn!(
                    "Provider '{}' failed reverse geocode for ({}): {}. Trying next.",
                    provider.name(),
                    coordinate,
                    e
                ),
            }
        }

        match first_with_city(&self.fallback_providers, coordinate).await {
            Ok((candidate, name)) => {
                if let Some(label) = compose(&candidate) {
                    info!(
                        "Fallback provider '{}' resolved ({}) to '{}'.",
                        name, coordinate, label
                    );
                    return (label, name);
                }
            }
            Err(e) => warn!("Fallback providers yielded nothing for ({}): {}.", coordinate, e),
        }

        info!("Using coordinate label for ({}).", coordinate);
        (coordinate_label(coordinate), PROVIDER_COORDINATE)
    }
}

/// First-successful-of-N race with per-branch error isolation: a branch that
/// fails or returns a city-less candidate is treated as rejected, and the race
/// continues until one branch qualifies or all are exhausted.
async fn first_with_city(
    providers: &[Arc<dyn GeocodeProvider>],
    coordinate: &Coordinate,
) -> Result<(AddressCandidate, &'static str), LocationError> {
    if providers.is_empty() {
        return Err(LocationError::NoCandidate(
            "no fallback providers configured".to_string(),
        ));
    }

    let attempts: Vec<_> = providers
        .iter()
        .map(|provider| {
            let provider = Arc::clone(provider);
            let coordinate = *coordinate;
            Box::pin(async move {
                let candidate = provider.reverse_geocode(&coordinate).await?;
                match candidate.city.as_deref() {
                    Some(city) if !city.trim().is_empty() => Ok((candidate, provider.name())),
                    _ => Err(LocationError::NoCandidate(format!(
                        "provider '{}' returned no city",
                        provider.name()
                    ))),
                }
            })
        })
        .collect();

    let ((candidate, name), _remaining) = select_ok(attempts).await?;
    Ok((candidate, name))
}
