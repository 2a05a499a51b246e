use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Represents a bounding box in screen/pixel coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Creates new bounds from two points
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(Point::new(min_x, min_y), Point::new(max_x, max_y))
    }

    /// Creates bounds from a center point and size
    pub fn from_center_and_size(center: Point, width: f64, height: f64) -> Self {
        let half = Point::new(width / 2.0, height / 2.0);
        Self::new(center.subtract(&half), center.add(&half))
    }

    /// Gets the width of the bounds
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Gets the height of the bounds
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Checks if the bounds are valid (min <= max)
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    /// Converts pixel bounds to the tile indices covering them.
    ///
    /// Both corners are divided by `tile_size` and floored toward negative
    /// infinity, so a viewport edge that lands exactly on a tile boundary
    /// still includes the tile starting there.
    pub fn to_tile_bounds(&self, tile_size: u32) -> TileBounds {
        let size = tile_size.max(1) as f64;
        TileBounds::new(
            TileIndex::from_point(&self.min.divide_by(size).floor()),
            TileIndex::from_point(&self.max.divide_by(size).floor()),
        )
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(Point::new(0.0, 0.0), Point::new(0.0, 0.0))
    }
}

/// A point in tile-index space.
///
/// Indices are signed and unbounded: buffered bounds routinely reach past
/// the edges of the world, and it is up to the tile layer to wrap or
/// discard them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileIndex {
    pub x: i64,
    pub y: i64,
}

impl TileIndex {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Converts an already-floored point; saturates on overflow
    pub fn from_point(point: &Point) -> Self {
        Self::new(point.x as i64, point.y as i64)
    }
}

/// A rectangle of tile indices, inclusive on both corners.
///
/// Built fresh on every layer update and consumed by the same update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileBounds {
    pub min: TileIndex,
    pub max: TileIndex,
}

impl TileBounds {
    pub fn new(min: TileIndex, max: TileIndex) -> Self {
        Self { min, max }
    }

    pub fn from_coords(min_x: i64, min_y: i64, max_x: i64, max_y: i64) -> Self {
        Self::new(TileIndex::new(min_x, min_y), TileIndex::new(max_x, max_y))
    }

    /// Widens the rectangle by `margin` tiles on every edge
    pub fn expand(&mut self, margin: i64) {
        self.min.x = self.min.x.saturating_sub(margin);
        self.min.y = self.min.y.saturating_sub(margin);
        self.max.x = self.max.x.saturating_add(margin);
        self.max.y = self.max.y.saturating_add(margin);
    }

    /// Returns a copy widened by `margin` tiles on every edge
    pub fn expanded(&self, margin: i64) -> TileBounds {
        let mut expanded = *self;
        expanded.expand(margin);
        expanded
    }

    /// Intersects with the `[0, tiles_per_axis)` square
    pub fn clamped(&self, tiles_per_axis: u32) -> TileBounds {
        let last = tiles_per_axis.max(1) as i64 - 1;
        TileBounds::from_coords(
            self.min.x.clamp(0, last),
            self.min.y.clamp(0, last),
            self.max.x.clamp(0, last),
            self.max.y.clamp(0, last),
        )
    }

    pub fn contains(&self, index: &TileIndex) -> bool {
        index.x >= self.min.x
            && index.x <= self.max.x
            && index.y >= self.min.y
            && index.y <= self.max.y
    }

    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    /// Number of tile indices covered, zero for invalid rectangles
    pub fn tile_count(&self) -> u64 {
        if !self.is_valid() {
            return 0;
        }
        let w = (self.max.x - self.min.x + 1) as u64;
        let h = (self.max.y - self.min.y + 1) as u64;
        w.saturating_mul(h)
    }

    /// Center of the rectangle in tile-index space
    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) as f64 / 2.0,
            (self.min.y + self.max.y) as f64 / 2.0,
        )
    }

    /// Iterates every index row by row
    pub fn indices(&self) -> impl Iterator<Item = TileIndex> {
        let (min, max) = (self.min, self.max);
        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| TileIndex::new(x, y)))
    }
}

impl std::fmt::Display for TileBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[({}, {}) .. ({}, {})]",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}
