use serde::Deserialize;
use std::collections::HashMap;

/// Reverse-geocode response from the detailed (Nominatim-style) provider.
/// Only the sub-objects the extractor reads are deserialized.
#[derive(Debug, Deserialize)]
pub struct NominatimResponse {
    pub address: Option<HashMap<String, String>>,
    pub extratags: Option<HashMap<String, String>>,
}

/// Overpass interpreter response: a flat list of elements with tag mappings.
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
pub struct OverpassElement {
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// A named water feature gathered from a geospatial query, ranked ascending:
/// 1 river, 2 stream, 3 natural water, 4 anything else named.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterFeature {
    pub name: String,
    pub priority: u8,
    pub kind: String,
}

/// A named highway gathered from a geospatial query, ranked ascending:
/// 1 ref-tagged national/state highway, 2 named trunk/primary/secondary/motorway.
#[derive(Debug, Clone, PartialEq)]
pub struct HighwayFeature {
    pub name: String,
    pub reference: Option<String>,
    pub priority: u8,
    pub kind: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BigDataCloudResponse {
    pub city: Option<String>,
    pub locality: Option<String>,
    pub principal_subdivision: Option<String>,
    pub country_name: Option<String>,
    pub locality_info: Option<LocalityInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalityInfo {
    #[serde(default)]
    pub administrative: Vec<AdministrativeArea>,
}

#[derive(Debug, Deserialize)]
pub struct AdministrativeArea {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OpenCageResponse {
    #[serde(default)]
    pub results: Vec<OpenCageResult>,
}

#[derive(Debug, Deserialize)]
pub struct OpenCageResult {
    /// Component values are usually strings but may be numbers or arrays;
    /// non-string values are ignored during extraction.
    #[serde(default)]
    pub components: HashMap<String, serde_json::Value>,
}
