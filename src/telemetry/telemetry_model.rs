use std::time::Duration;

use crate::location::location_model::Coordinate;

/// One subtitle-embedded telemetry record: a playback time span and the
/// coordinate the camera reported for it.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryPoint {
    pub start: Duration,
    pub end: Duration,
    pub coordinate: Coordinate,
}
