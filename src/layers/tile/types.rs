//! Core data types for tile layer functionality

use crate::{
    core::{
        bounds::{TileBounds, TileIndex},
        config,
        constants::{
            DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_SUBDOMAINS, MAX_TILE_ZOOM, TILE_SIZE,
        },
        geo::{LatLngBounds, TileCoord},
    },
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileLayerOptions {
    pub tile_size: u32,
    pub min_zoom: u8,
    /// Capped at [`MAX_TILE_ZOOM`]; deeper zooms are skipped on update
    pub max_zoom: u8,
    /// Extra tiles loaded beyond every edge of the viewport
    #[serde(deserialize_with = "config::deserialize_buffer")]
    pub buffer: Option<u32>,
    pub subdomains: Vec<String>,
    pub zoom_offset: i32,
    pub zoom_reverse: bool,
    pub tms: bool,
    /// Treat the tile grid as unbounded: no wrapping, no range check
    pub continuous_world: bool,
    /// Do not wrap x around the antimeridian
    pub no_wrap: bool,
    pub unload_invisible_tiles: bool,
    pub reuse_tiles: bool,
    pub bounds: Option<LatLngBounds>,
    pub attribution: Option<String>,
}

impl Default for TileLayerOptions {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            buffer: None,
            subdomains: DEFAULT_SUBDOMAINS.iter().map(|s| s.to_string()).collect(),
            zoom_offset: 0,
            zoom_reverse: false,
            tms: false,
            continuous_world: false,
            no_wrap: false,
            unload_invisible_tiles: false,
            reuse_tiles: false,
            bounds: None,
            attribution: None,
        }
    }
}

impl TileLayerOptions {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = config::from_json_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let options: Self = config::from_path(path)?;
        options.validate()?;
        Ok(options)
    }

    /// Rejects zoom ranges the tile grid cannot represent
    pub fn validate(&self) -> Result<()> {
        if self.max_zoom > MAX_TILE_ZOOM {
            return Err(MapError::Config(format!(
                "max_zoom {} is deeper than the tile grid allows ({})",
                self.max_zoom, MAX_TILE_ZOOM
            )));
        }
        if self.min_zoom > self.max_zoom {
            return Err(MapError::Config(format!(
                "min_zoom {} is above max_zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.tile_size == 0 {
            return Err(MapError::Config("tile_size must be positive".to_string()));
        }
        Ok(())
    }

    /// Whether tiles outside the working rectangle are dropped on update
    pub fn prunes_tiles(&self) -> bool {
        self.unload_invisible_tiles || self.reuse_tiles
    }
}

/// A tile the layer currently holds, loaded or in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileState {
    pub coord: TileCoord,
    /// Grid position before wrapping; pruning compares against this
    pub index: TileIndex,
    pub url: String,
    pub loaded: bool,
}

impl TileState {
    pub fn new(coord: TileCoord, index: TileIndex, url: String) -> Self {
        Self {
            coord,
            index,
            url,
            loaded: false,
        }
    }

    pub fn mark_loaded(&mut self) {
        self.loaded = true;
    }
}

/// What a single [`TileLayer::update`](super::TileLayer::update) did
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TileUpdate {
    /// Tile zoom the update ran at, `None` when it was skipped
    pub zoom: Option<u8>,
    /// Rectangle covering the viewport
    pub visible: Option<TileBounds>,
    /// Rectangle after the bounds policy; drives both add and remove
    pub working: Option<TileBounds>,
    /// Whether the policy widened the rectangle
    pub buffered: bool,
    /// Newly requested tiles, nearest to the center first
    pub added: Vec<TileCoord>,
    /// Tiles dropped because they left the working rectangle
    pub removed: Vec<TileCoord>,
}

impl TileUpdate {
    /// An update that returned before computing any bounds
    pub fn skipped() -> Self {
        Self::default()
    }

    pub fn is_skipped(&self) -> bool {
        self.zoom.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_unbuffered() {
        let options = TileLayerOptions::default();
        assert_eq!(options.tile_size, 256);
        assert_eq!(options.buffer, None);
        assert!(!options.prunes_tiles());
    }

    #[test]
    fn test_options_from_json() {
        let options = TileLayerOptions::from_json_str(
            r#"{ "subdomains": ["a", "b", "c"], "buffer": 8, "reuse_tiles": true }"#,
        )
        .unwrap();
        assert_eq!(options.buffer, Some(8));
        assert!(options.prunes_tiles());
        assert_eq!(options.max_zoom, 18);
    }

    #[test]
    fn test_malformed_buffer_is_ignored() {
        for raw in [r#""lots""#, "0", "-3", "null", "false"] {
            let json = format!(r#"{{ "buffer": {} }}"#, raw);
            let options = TileLayerOptions::from_json_str(&json).unwrap();
            assert_eq!(options.buffer, None, "buffer {}", raw);
        }
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(TileLayerOptions::from_json_str("{ buffer: 8 }").is_err());
    }

    #[test]
    fn test_zoom_range_is_validated() {
        let err = TileLayerOptions::from_json_str(r#"{ "max_zoom": 40 }"#).unwrap_err();
        assert!(matches!(err, MapError::Config(_)));

        let err = TileLayerOptions::from_json_str(r#"{ "min_zoom": 5, "max_zoom": 3 }"#)
            .unwrap_err();
        assert!(matches!(err, MapError::Config(_)));

        let options = TileLayerOptions::from_json_str(r#"{ "max_zoom": 31 }"#).unwrap();
        assert_eq!(options.max_zoom, MAX_TILE_ZOOM);
    }

    #[test]
    fn test_skipped_update() {
        let update = TileUpdate::skipped();
        assert!(update.is_skipped());
        assert!(update.working.is_none());
        assert!(!update.buffered);
    }
}
