//! Raster tile layer with a pluggable bounds policy
//!
//! This module provides:
//! - [`BoundsPolicy`] and the stock policies (unbuffered, buffered, clamped)
//! - [`TileLayer`], whose update hook applies the policy once per update
//! - URL templating and the request queue feeding an external fetcher

pub mod layer;
pub mod loader;
pub mod policy;
pub mod source;
pub mod types;

pub use layer::TileLayer;
pub use loader::{TileLoader, TileRequest};
pub use policy::{expand, BoundsPolicy, Buffered, Clamped, Unbuffered};
pub use source::{TemplateSource, TileSource};
pub use types::{TileLayerOptions, TileState, TileUpdate};
