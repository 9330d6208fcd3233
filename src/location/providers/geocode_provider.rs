use async_trait::async_trait;

use crate::location::location_errors::LocationError;
use crate::location::location_model::{AddressCandidate, Coordinate};

/// A reverse-geocoding backend queried by the provider chain.
///
/// An error is not fatal to a lookup; the chain logs it and degrades to the
/// next stage.
#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn reverse_geocode(
        &self,
        coordinate: &Coordinate,
    ) -> Result<AddressCandidate, LocationError>;
}
