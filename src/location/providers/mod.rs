pub mod big_data_cloud_provider;
pub mod geocode_provider;
pub mod models;
pub mod nominatim_provider;
pub mod open_cage_provider;
pub mod overpass_provider;
pub mod provider_registry;

pub use provider_registry::ProviderRegistry;
