//! Prelude module for common tilebuffer types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use tilebuffer::prelude::*;`

pub use crate::core::{
    bounds::{Bounds, TileBounds, TileIndex},
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    viewport::Viewport,
};

pub use crate::layers::tile::{
    BoundsPolicy, Buffered, Clamped, TemplateSource, TileLayer, TileLayerOptions, TileLoader,
    TileRequest, TileSource, TileUpdate, Unbuffered,
};

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
