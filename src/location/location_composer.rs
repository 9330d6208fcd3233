use std::collections::HashMap;

use crate::location::location_constants::LABEL_SEPARATOR;
use crate::location::location_model::{AddressCandidate, Coordinate};

/// Field priority tables, most specific first. Providers map their response
/// shapes onto these tables instead of branching per field, so adding a
/// provider means adding a table row.
pub const CITY_FIELDS: &[&str] = &[
    "city",
    "town",
    "village",
    "municipality",
    "county",
    "state_district",
    "suburb",
];

pub const AREA_FIELDS: &[&str] = &[
    "suburb",
    "neighbourhood",
    "residential",
    "quarter",
    "hamlet",
    "city_district",
    "borough",
    "ward",
    "district",
    "locality",
    "sublocality",
];

pub const WATER_FIELDS: &[&str] = &[
    "water",
    "river",
    "stream",
    "canal",
    "lake",
    "reservoir",
    "pond",
];

pub const HIGHWAY_FIELDS: &[&str] = &["trunk", "primary", "secondary", "motorway", "highway"];

pub const ROAD_FIELDS: &[&str] = &["road", "pedestrian", "footway", "path", "cycleway"];

const WATER_KEYWORDS: &[&str] = &["river", "stream", "canal", "lake"];
const HIGHWAY_KEYWORDS: &[&str] = &["highway", "expressway", "national"];

/// First non-empty value among `keys`, in table order.
pub fn pick(fields: &HashMap<String, String>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find(|value| !value.trim().is_empty())
        .cloned()
}

/// Water names that do not already carry a water-type keyword are labelled as
/// rivers, e.g. "Vrishabhavathi" becomes "Vrishabhavathi River".
pub fn format_water_name(name: &str) -> String {
    let lower = name.to_lowercase();
    if WATER_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
        name.to_string()
    } else {
        format!("{} River", name)
    }
}

pub fn format_highway_name(name: &str) -> String {
    let lower = name.to_lowercase();
    if HIGHWAY_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
        name.to_string()
    } else {
        format!("{} Highway", name)
    }
}

/// Composes the display label for a candidate, or `None` when the candidate
/// does not satisfy the mandatory fields and the chain should proceed.
///
/// A candidate qualifies only with a city and at least one infrastructure
/// component. The infrastructure slot uses strict preference order: named
/// water, then highway, then plain road as a last resort (used verbatim, no
/// suffix). The area is dropped when identical to the city.
pub fn compose(candidate: &AddressCandidate) -> Option<String> {
    let city = candidate
        .city
        .as_deref()
        .filter(|city| !city.trim().is_empty())?;

    let mut parts = vec![city.to_string()];

    if let Some(area) = candidate.area.as_deref() {
        if !area.trim().is_empty() && area != city {
            parts.push(area.to_string());
        }
    }

    let infrastructure = if let Some(water) = non_empty(candidate.water_body.as_deref()) {
        format_water_name(water)
    } else if let Some(highway) = non_empty(candidate.highway.as_deref()) {
        format_highway_name(highway)
    } else if let Some(road) = non_empty(candidate.road.as_deref()) {
        road.to_string()
    } else {
        return None;
    };
    parts.push(infrastructure);

    if parts.len() >= 2 {
        Some(parts.join(LABEL_SEPARATOR))
    } else {
        None
    }
}

/// Terminal stage of the chain; always succeeds.
pub fn coordinate_label(coordinate: &Coordinate) -> String {
    format!(
        "{} Region{sep}Coordinate Area{sep}Local Route ({:.4}, {:.4})",
        coordinate.quadrant(),
        coordinate.lat,
        coordinate.lon,
        sep = LABEL_SEPARATOR,
    )
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}
