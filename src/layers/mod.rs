//! Map layers. Only raster tile layers are provided.

pub mod tile;
