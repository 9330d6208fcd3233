use lazy_static::lazy_static;
use log::warn;
use regex::{Captures, Regex};
use std::time::Duration;

use crate::location::location_model::Coordinate;
use crate::telemetry::telemetry_model::TelemetryPoint;

lazy_static! {
    static ref BLOCK_SEPARATOR: Regex = Regex::new(r"\n\s*\n").unwrap();
    static ref TIME_RANGE: Regex = Regex::new(
        r"(\d{2}):(\d{2}):(\d{2}),(\d{3})\s*-->\s*(\d{2}):(\d{2}):(\d{2}),(\d{3})"
    )
    .unwrap();
    // Tolerates "lat"/"latitude" and the common "longtitude" typo, with
    // optional ':' or '=' separators.
    static ref LATITUDE: Regex =
        Regex::new(r"(?i)lat(?:itude)?\s*[:=]?\s*(-?\d+(?:\.\d+)?)").unwrap();
    static ref LONGITUDE: Regex =
        Regex::new(r"(?i)lon(?:g?titude|gitude)?\s*[:=]?\s*(-?\d+(?:\.\d+)?)").unwrap();
}

/// Parses subtitle text into telemetry points.
///
/// Blocks without a time range or coordinates are skipped; coordinates
/// outside the valid latitude/longitude ranges are discarded with a warning.
pub fn parse_srt(text: &str) -> Vec<TelemetryPoint> {
    let mut points = Vec::new();

    for block in BLOCK_SEPARATOR.split(text) {
        let lines: Vec<&str> = block
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() < 2 {
            continue;
        }

        let Some(times) = TIME_RANGE.captures(lines[1]) else {
            continue;
        };
        let content = lines[2..].join(" ");

        let (Some(lat), Some(lon)) = (
            capture_f64(&LATITUDE, &content),
            capture_f64(&LONGITUDE, &content),
        ) else {
            continue;
        };

        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            warn!("Discarding out-of-range telemetry coordinates ({}, {}).", lat, lon);
            continue;
        }

        points.push(TelemetryPoint {
            start: timestamp(&times, 1),
            end: timestamp(&times, 5),
            coordinate: Coordinate::new(lat, lon),
        });
    }

    points
}

fn timestamp(captures: &Captures<'_>, first_group: usize) -> Duration {
    let number = |offset: usize| -> u64 { captures[first_group + offset].parse().unwrap_or(0) };
    Duration::from_millis(((number(0) * 60 + number(1)) * 60 + number(2)) * 1000 + number(3))
}

fn capture_f64(pattern: &Regex, content: &str) -> Option<f64> {
    pattern
        .captures(content)
        .and_then(|captures| captures[1].parse().ok())
}
