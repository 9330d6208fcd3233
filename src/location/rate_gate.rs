use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::location::location_model::Coordinate;

struct LastLookup {
    key: String,
    at: Instant,
}

/// Throttle in front of the provider chain.
///
/// Video playback fires a location update on every time-update event; without
/// gating this floods rate-limited public geocoding APIs. The gate keeps a
/// single record, not a per-key cache: a rapid sequence of *different*
/// coordinates inside the interval is also suppressed.
pub struct RateGate {
    min_interval: Duration,
    last: Mutex<Option<LastLookup>>,
}

impl RateGate {
    pub fn new(min_interval: Duration) -> Self {
        RateGate {
            min_interval,
            last: Mutex::new(None),
        }
    }

    /// Returns whether a lookup for `coord` should proceed.
    ///
    /// Suppresses when the rounded coordinate key equals the recorded key, or
    /// when less than the minimum interval has elapsed since the last recorded
    /// lookup regardless of coordinate. The record is overwritten only on an
    /// affirmative answer.
    pub fn should_lookup(&self, coord: &Coordinate, now: Instant) -> bool {
        let key = coord.rate_key();
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(previous) = last.as_ref() {
            if previous.key == key || now.duration_since(previous.at) < self.min_interval {
                return false;
            }
        }

        *last = Some(LastLookup { key, at: now });
        true
    }
}
