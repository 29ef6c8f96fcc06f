use std::path::PathBuf;

/// Primary public Overpass instance
pub const OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Endpoints tried in order when no override is given
pub const DEFAULT_OVERPASS_URLS: [&str; 3] = [
    OVERPASS_URL,
    "https://overpass.kumi.systems/api/interpreter",
    "https://lz4.overpass-api.de/api/interpreter",
];

pub const USER_AGENT: &str = "github.com/ionprf-osm-building-fetcher";

/// Server-side Overpass timeout, in seconds
pub const OVERPASS_QUERY_TIMEOUT_S: u64 = 120;

/// Client-side request timeout, a margin above the server-side one
pub const REQUEST_TIMEOUT_S: u64 = 180;

/// Assumed floor height used to turn `building:levels` into meters
pub const DEFAULT_STOREY_HEIGHT: f64 = 3.0;

pub const CZML_PATH: &str = "czml_output";

pub const CZML_MANIFEST_NAME: &str = "czml_manifest.json";

pub fn get_czml_path() -> PathBuf {
    PathBuf::from(CZML_PATH)
}
