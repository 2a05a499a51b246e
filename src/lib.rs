//! # tilebuffer
//!
//! Buffered tile bounds for Leaflet-style tile layers.
//!
//! A tile layer works out which tile indices cover the viewport on every
//! update, then loads the missing ones and unloads the rest. This crate lets
//! that rectangle be widened by a configurable `buffer` so that tiles just
//! outside the viewport are fetched ahead of a pan or zoom-out.
//!
//! The widening is a [`BoundsPolicy`] injected into the [`TileLayer`] at
//! construction time; nothing global is patched.
//!
//! ```
//! use tilebuffer::{LatLng, Point, TemplateSource, TileLayer, TileLayerOptions, TileLoader, Viewport};
//!
//! let options = TileLayerOptions {
//!     buffer: Some(2),
//!     ..Default::default()
//! };
//! let (loader, requests) = TileLoader::channel();
//! let mut layer = TileLayer::new("osm", Box::new(TemplateSource::openstreetmap()), options, loader);
//! let viewport = Viewport::new(LatLng::new(51.5074, -0.1278), 10.0, Point::new(800.0, 600.0));
//!
//! let update = layer.update(&viewport).unwrap();
//! assert!(update.buffered);
//! assert_eq!(requests.len(), update.added.len());
//! ```

pub mod core;
pub mod layers;
pub mod prelude;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::{Bounds, TileBounds, TileIndex},
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    viewport::Viewport,
};

pub use layers::tile::{
    BoundsPolicy, Buffered, Clamped, TemplateSource, TileLayer, TileLayerOptions, TileLoader,
    TileRequest, TileSource, TileUpdate, Unbuffered,
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Loader error: {0}")]
    Loader(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;
