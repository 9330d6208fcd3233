/// Provider stage identifiers
pub const PROVIDER_NOMINATIM: &str = "NOMINATIM";
pub const PROVIDER_OVERPASS: &str = "OVERPASS";
pub const PROVIDER_BIG_DATA_CLOUD: &str = "BIG_DATA_CLOUD";
pub const PROVIDER_OPEN_CAGE: &str = "OPEN_CAGE";
pub const PROVIDER_COORDINATE: &str = "COORDINATE";

/// Default values
pub const DEFAULT_USER_AGENT: &str = "GeoVideo-LocationApp/1.0 (contact@geovideo.app)";
pub const DEFAULT_MIN_LOOKUP_INTERVAL_MS: u64 = 2000;

/// Rounding applied to coordinates when building rate keys and display labels,
/// roughly 11m of precision.
pub const COORDINATE_DISPLAY_DECIMALS: usize = 4;

/// Separator between the parts of a resolved label.
pub const LABEL_SEPARATOR: &str = " : ";

/// Placeholder infrastructure component used by the simple fallback providers,
/// which only know about administrative areas.
pub const LOCAL_AREA_PLACEHOLDER: &str = "Local Area";
