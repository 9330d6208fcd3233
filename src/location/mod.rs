pub(crate) mod location_composer;
pub(crate) mod location_constants;
pub(crate) mod location_errors;
pub(crate) mod location_model;
pub(crate) mod location_service;
pub(crate) mod location_traits;
pub(crate) mod providers;
pub(crate) mod rate_gate;

// Re-export the public interface
pub use location_constants::*;
pub use location_model::{
    AddressCandidate, Coordinate, Quadrant, ResolvedLocation, ResolverConfig,
};
pub use location_service::LocationService;
pub use location_traits::LocationServiceTrait;
pub use rate_gate::RateGate;

// Re-export provider types
pub use providers::geocode_provider::GeocodeProvider;
pub use providers::models::{HighwayFeature, WaterFeature};
pub use providers::ProviderRegistry;

// Re-export error types for convenience
pub use location_errors::LocationError;
