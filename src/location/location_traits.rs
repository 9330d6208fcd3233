use async_trait::async_trait;

use crate::location::location_model::{Coordinate, ResolvedLocation};

/// Service seam for consumers of the resolver (map/video-sync UI backends).
#[async_trait]
pub trait LocationServiceTrait: Send + Sync {
    /// Handles a playback location update. `None` means the rate gate dropped
    /// the lookup; no error is ever surfaced.
    async fn on_location_update(&self, lat: f64, lon: f64) -> Option<ResolvedLocation>;

    /// Resolves a coordinate unconditionally.
    async fn resolve(&self, coordinate: Coordinate) -> ResolvedLocation;
}
