use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::location::location_model::{Coordinate, ResolvedLocation, ResolverConfig};
use crate::location::location_traits::LocationServiceTrait;
use crate::location::providers::ProviderRegistry;
use crate::location::rate_gate::RateGate;

/// Resolves coordinates to display labels: rate gate, then the provider
/// chain, then composition.
///
/// Each accepted lookup carries a monotonically increasing sequence number so
/// callers receiving out-of-order resolutions (rapid coordinate changes, no
/// cancellation of in-flight lookups) can apply last-write-wins by sequence
/// instead of arrival order.
pub struct LocationService {
    registry: ProviderRegistry,
    rate_gate: RateGate,
    sequence: AtomicU64,
}

impl LocationService {
    pub fn new(config: ResolverConfig) -> Result<Self, crate::location::LocationError> {
        let registry = ProviderRegistry::new(&config)?;
        Ok(Self::with_registry(registry, config.min_lookup_interval))
    }

    /// Builds a service over an explicit registry. Intended for tests and
    /// embedders with their own providers.
    pub fn with_registry(registry: ProviderRegistry, min_lookup_interval: Duration) -> Self {
        LocationService {
            registry,
            rate_gate: RateGate::new(min_lookup_interval),
            sequence: AtomicU64::new(0),
        }
    }

    /// Inbound contract for playback time-sync and marker placement.
    /// Returns `None` when the rate gate suppressed the lookup.
    pub async fn on_location_update(&self, lat: f64, lon: f64) -> Option<ResolvedLocation> {
        let coordinate = Coordinate::new(lat, lon);
        if !self.rate_gate.should_lookup(&coordinate, Instant::now()) {
            debug!("Lookup for ({}) suppressed by rate gate.", coordinate);
            return None;
        }
        Some(self.resolve(coordinate).await)
    }

    /// Runs the provider chain for a coordinate, bypassing the rate gate.
    /// Never fails: the terminal coordinate-literal stage always succeeds.
    pub async fn resolve(&self, coordinate: Coordinate) -> ResolvedLocation {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let (label, source) = self.registry.resolve(&coordinate).await;
        ResolvedLocation {
            label,
            coordinate,
            sequence,
            source: source.to_string(),
            resolved_at: Utc::now(),
        }
    }
}

#[async_trait]
impl LocationServiceTrait for LocationService {
    async fn on_location_update(&self, lat: f64, lon: f64) -> Option<ResolvedLocation> {
        LocationService::on_location_update(self, lat, lon).await
    }

    async fn resolve(&self, coordinate: Coordinate) -> ResolvedLocation {
        LocationService::resolve(self, coordinate).await
    }
}
