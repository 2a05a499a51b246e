//! Bounds policies: how a tile layer turns the tile rectangle covering the
//! viewport into the rectangle it actually loads and keeps.
//!
//! A policy runs once per layer update, after the unbuffered rectangle has
//! been computed and before tiles are added or removed. Both of those steps
//! see the policy's output, so tiles fetched because of a buffer are not
//! pruned by the same update.

use crate::core::bounds::TileBounds;
use crate::core::geo::TileCoord;

#[cfg(feature = "debug")]
use log;

/// Decides the tile rectangle a layer works with for one update
pub trait BoundsPolicy: Send + Sync {
    /// Maps the rectangle covering the viewport at `zoom` to the rectangle
    /// the layer should load and retain.
    fn apply(&self, bounds: TileBounds, zoom: u8) -> TileBounds;

    /// Whether `apply` can return something other than its input
    fn is_buffering(&self) -> bool {
        true
    }
}

impl dyn BoundsPolicy {
    /// Builds the policy for an optional buffer margin: [`Buffered`] for a
    /// positive margin, [`Unbuffered`] otherwise.
    pub fn from_buffer(buffer: Option<u32>) -> Box<dyn BoundsPolicy> {
        match buffer {
            Some(margin) if margin > 0 => Box::new(Buffered::new(margin)),
            _ => Box::new(Unbuffered),
        }
    }
}

/// Leaves the rectangle untouched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unbuffered;

impl BoundsPolicy for Unbuffered {
    fn apply(&self, bounds: TileBounds, _zoom: u8) -> TileBounds {
        bounds
    }

    fn is_buffering(&self) -> bool {
        false
    }
}

/// Widens the rectangle by a fixed number of tiles on every edge.
///
/// The result is not clamped to the world; the layer's tile validity check
/// drops indices that do not exist at the current zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Buffered {
    margin: u32,
}

impl Buffered {
    pub fn new(margin: u32) -> Self {
        Self { margin }
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }
}

impl BoundsPolicy for Buffered {
    fn apply(&self, bounds: TileBounds, _zoom: u8) -> TileBounds {
        expand(bounds, Some(self.margin))
    }

    fn is_buffering(&self) -> bool {
        self.margin > 0
    }
}

/// Clamps another policy's output to the tiles that exist at the zoom.
///
/// For hosts that do not filter out-of-range indices themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clamped<P> {
    inner: P,
}

impl<P: BoundsPolicy> Clamped<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: BoundsPolicy> BoundsPolicy for Clamped<P> {
    fn apply(&self, bounds: TileBounds, zoom: u8) -> TileBounds {
        self.inner
            .apply(bounds, zoom)
            .clamped(TileCoord::tiles_per_axis(zoom))
    }

    fn is_buffering(&self) -> bool {
        self.inner.is_buffering()
    }
}

impl<F> BoundsPolicy for F
where
    F: Fn(TileBounds, u8) -> TileBounds + Send + Sync,
{
    fn apply(&self, bounds: TileBounds, zoom: u8) -> TileBounds {
        self(bounds, zoom)
    }
}

/// Widens `bounds` by `margin` tiles on every edge.
///
/// A missing or zero margin returns `bounds` as-is. Not idempotent: feeding
/// the result back in widens it again.
pub fn expand(mut bounds: TileBounds, margin: Option<u32>) -> TileBounds {
    let margin = match margin {
        Some(m) if m > 0 => m,
        _ => return bounds,
    };

    #[cfg(feature = "debug")]
    log::debug!("buffering tile bounds {} by {}", bounds, margin);

    bounds.expand(margin as i64);
    bounds
}
