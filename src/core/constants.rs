//! Core constants derived from Leaflet defaults and common web-map conventions.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// World size in pixels at zoom 0 for the EPSG:3857 projection.
pub const WORLD_SIZE_AT_ZOOM_0: f64 = 256.0;

/// Default zoom range of a tile layer.
pub const DEFAULT_MIN_ZOOM: u8 = 0;
pub const DEFAULT_MAX_ZOOM: u8 = 18;

/// Deepest zoom whose tile grid fits `u32` tile coordinates (2^31 per axis).
pub const MAX_TILE_ZOOM: u8 = 31;

/// Subdomains cycled through by `{s}` in a URL template.
pub const DEFAULT_SUBDOMAINS: [&str; 3] = ["a", "b", "c"];

/// Public OpenStreetMap tile server template.
pub const OSM_URL_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Buffer that gives a smooth single-step zoom out on a 1280x1024 viewport.
/// Roughly 4 tiles per zoom level; larger values trade bandwidth for coverage.
pub const RECOMMENDED_BUFFER: u32 = 8;
