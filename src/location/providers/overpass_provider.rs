use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::location::location_constants::PROVIDER_OVERPASS;
use crate::location::location_errors::LocationError;
use crate::location::location_model::{AddressCandidate, Coordinate, ResolverConfig};
use crate::location::providers::geocode_provider::GeocodeProvider;
use crate::location::providers::models::{
    HighwayFeature, OverpassElement, OverpassResponse, WaterFeature,
};

const MAJOR_HIGHWAY_CLASSES: &[&str] = &["trunk", "primary", "secondary", "motorway"];
const NATIONAL_REF_PREFIXES: &[&str] = &["NH", "SH", "AH"];

/// Geospatial feature query over the map database; second stage of the chain.
///
/// Issues a single Overpass QL query with per-class bounding radii (wider for
/// higher-priority feature classes), then ranks the returned features.
pub struct OverpassProvider {
    client: Client,
    base_url: String,
}

impl OverpassProvider {
    pub fn new(config: &ResolverConfig) -> Result<Self, LocationError> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(OverpassProvider {
            client,
            base_url: config.overpass_url.clone(),
        })
    }
}

#[async_trait]
impl GeocodeProvider for OverpassProvider {
    fn name(&self) -> &'static str {
        PROVIDER_OVERPASS
    }

    async fn reverse_geocode(
        &self,
        coordinate: &Coordinate,
    ) -> Result<AddressCandidate, LocationError> {
        let response = self
            .client
            .post(&self.base_url)
            .header(CONTENT_TYPE, "text/plain")
            .body(build_query(coordinate))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LocationError::ProviderError(format!(
                "Overpass returned status {}",
                response.status()
            )));
        }

        let body: OverpassResponse = response.json().await?;
        Ok(candidate_from_elements(&body.elements))
    }
}

fn build_query(coordinate: &Coordinate) -> String {
    let lat = coordinate.lat;
    let lon = coordinate.lon;
    format!(
        r#"[out:json][timeout:30];
(
  way["waterway"~"^(river|stream|canal|drain)$"]["name"](around:500,{lat},{lon});
  way["natural"="water"]["name"](around:1000,{lat},{lon});
  relation["waterway"~"^(river|stream)$"]["name"](around:2000,{lat},{lon});
  way["highway"~"^(trunk|primary|secondary|motorway)$"]["name"](around:300,{lat},{lon});
  way["ref"~"^(NH|SH|AH)"]["name"](around:1000,{lat},{lon});
  relation["route"="road"]["network"~"^(NH|SH|AH)"]["ref"](around:1500,{lat},{lon});
  relation["boundary"="administrative"]["admin_level"~"^[4-9]$"]["name"](around:3000,{lat},{lon});
  way["place"~"^(city|town|village|suburb|neighbourhood|hamlet)$"]["name"](around:2000,{lat},{lon});
);
out tags;"#
    )
}

/// Aggregates the element tags into a candidate: administrative boundaries and
/// places feed the city/area slots, named water and highway features are
/// collected, ranked, and the top of each class wins.
fn candidate_from_elements(elements: &[OverpassElement]) -> AddressCandidate {
    let mut city: Option<String> = None;
    let mut area: Option<String> = None;
    let mut water_features: Vec<WaterFeature> = Vec::new();
    let mut highway_features: Vec<HighwayFeature> = Vec::new();

    for element in elements {
        let tags = &element.tags;
        let name = tags.get("name");
        let place = tags.get("place").map(String::as_str);
        let admin_level = tags.get("admin_level").map(String::as_str);

        if tags.get("boundary").map(String::as_str) == Some("administrative") || place.is_some() {
            if matches!(admin_level, Some("8") | Some("9"))
                || matches!(place, Some("suburb") | Some("neighbourhood"))
            {
                if area.is_none() {
                    area = name.cloned();
                }
            }
            if matches!(admin_level, Some("4") | Some("5") | Some("6"))
                || matches!(place, Some("city") | Some("town") | Some("village"))
            {
                if city.is_none() {
                    city = name.cloned();
                }
            }
        }

        let waterway = tags.get("waterway").map(String::as_str);
        let is_natural_water = tags.get("natural").map(String::as_str) == Some("water");
        if waterway.is_some() || is_natural_water {
            if let Some(name) = name {
                let priority = match waterway {
                    Some("river") => 1,
                    Some("stream") => 2,
                    _ if is_natural_water => 3,
                    _ => 4,
                };
                water_features.push(WaterFeature {
                    name: name.clone(),
                    priority,
                    kind: waterway.unwrap_or("water").to_string(),
                });
            }
        }

        let reference = tags.get("ref");
        let is_national_ref = reference.map_or(false, |reference| {
            NATIONAL_REF_PREFIXES
                .iter()
                .any(|prefix| reference.starts_with(prefix))
        });
        let highway_class = tags.get("highway").map(String::as_str);
        let is_road_route = tags.get("route").map(String::as_str) == Some("road");

        if highway_class.is_some() || is_road_route || reference.is_some() {
            if is_national_ref {
                // Display name falls back to the ref itself for unnamed ways.
                if let Some(display) = name.or(reference) {
                    highway_features.push(HighwayFeature {
                        name: display.clone(),
                        reference: reference.cloned(),
                        priority: 1,
                        kind: "national".to_string(),
                    });
                }
            } else if let (Some(name), Some(class)) = (name, highway_class) {
                if MAJOR_HIGHWAY_CLASSES.contains(&class) {
                    highway_features.push(HighwayFeature {
                        name: name.clone(),
                        reference: reference.cloned(),
                        priority: 2,
                        kind: class.to_string(),
                    });
                }
            }
        }
    }

    water_features.sort_by_key(|feature| feature.priority);
    highway_features.sort_by_key(|feature| feature.priority);

    AddressCandidate {
        city,
        area,
        water_body: water_features.first().map(|feature| feature.name.clone()),
        highway: highway_features.first().map(highway_display_name),
        road: None,
    }
}

/// National highways are rendered as "<ref> <name>" unless the ref already
/// covers the name (unnamed ways use the ref as their name).
fn highway_display_name(feature: &HighwayFeature) -> String {
    match (&feature.reference, feature.kind.as_str()) {
        (Some(reference), "national") if !reference.contains(&feature.name) => {
            format!("{} {}", reference, feature.name)
        }
        _ => feature.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elements(json: &str) -> Vec<OverpassElement> {
        let response: OverpassResponse = serde_json::from_str(json).unwrap();
        response.elements
    }

    #[test]
    fn query_uses_tiered_radii() {
        let query = build_query(&Coordinate::new(12.9361, 77.6107));
        assert!(query.contains("around:500,12.9361,77.6107"));
        assert!(query.contains("around:300,12.9361,77.6107"));
        assert!(query.contains("around:3000,12.9361,77.6107"));
        assert!(query.starts_with("[out:json][timeout:30];"));
        assert!(query.ends_with("out tags;"));
    }

    #[test]
    fn river_outranks_natural_water() {
        let elements = elements(
            r#"{"elements": [
                {"id": 1, "tags": {"natural": "water", "name": "Madiwala Lake"}},
                {"id": 2, "tags": {"waterway": "river", "name": "Vrishabhavathi"}}
            ]}"#,
        );
        let candidate = candidate_from_elements(&elements);
        assert_eq!(candidate.water_body.as_deref(), Some("Vrishabhavathi"));
    }

    #[test]
    fn national_ref_outranks_named_trunk() {
        let elements = elements(
            r#"{"elements": [
                {"id": 1, "tags": {"highway": "trunk", "name": "Hosur Road"}},
                {"id": 2, "tags": {"ref": "NH 44", "name": "Bengaluru-Hosur Highway"}}
            ]}"#,
        );
        let candidate = candidate_from_elements(&elements);
        assert_eq!(
            candidate.highway.as_deref(),
            Some("NH 44 Bengaluru-Hosur Highway")
        );
    }

    #[test]
    fn unnamed_national_way_uses_its_ref() {
        let elements = elements(r#"{"elements": [{"id": 1, "tags": {"ref": "NH 44"}}]}"#);
        let candidate = candidate_from_elements(&elements);
        assert_eq!(candidate.highway.as_deref(), Some("NH 44"));
    }

    #[test]
    fn admin_levels_feed_city_and_area() {
        let elements = elements(
            r#"{"elements": [
                {"id": 1, "tags": {"boundary": "administrative", "admin_level": "8", "name": "Koramangala"}},
                {"id": 2, "tags": {"boundary": "administrative", "admin_level": "5", "name": "Bengaluru"}}
            ]}"#,
        );
        let candidate = candidate_from_elements(&elements);
        assert_eq!(candidate.city.as_deref(), Some("Bengaluru"));
        assert_eq!(candidate.area.as_deref(), Some("Koramangala"));
    }

    #[test]
    fn place_tags_feed_city_and_area() {
        let elements = elements(
            r#"{"elements": [
                {"id": 1, "tags": {"place": "suburb", "name": "Jayanagar"}},
                {"id": 2, "tags": {"place": "city", "name": "Bengaluru"}}
            ]}"#,
        );
        let candidate = candidate_from_elements(&elements);
        assert_eq!(candidate.city.as_deref(), Some("Bengaluru"));
        assert_eq!(candidate.area.as_deref(), Some("Jayanagar"));
    }

    #[test]
    fn unnamed_water_features_are_ignored() {
        let elements = elements(r#"{"elements": [{"id": 1, "tags": {"waterway": "stream"}}]}"#);
        let candidate = candidate_from_elements(&elements);
        assert_eq!(candidate.water_body, None);
    }
}
