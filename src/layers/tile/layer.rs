//! Core TileLayer implementation

use super::{BoundsPolicy, TileLayerOptions, TileLoader, TileSource, TileState, TileUpdate};
use crate::{
    core::{
        bounds::{TileBounds, TileIndex},
        constants::MAX_TILE_ZOOM,
        geo::TileCoord,
        viewport::{zoom_in_range, Viewport},
    },
    prelude::HashMap,
    Result,
};

#[cfg(feature = "debug")]
use log;

/// A raster tile layer that keeps the tiles covering the viewport, plus
/// whatever margin its [`BoundsPolicy`] adds, requested from a [`TileLoader`].
pub struct TileLayer {
    pub(crate) id: String,
    pub(crate) visible: bool,
    pub(crate) options: TileLayerOptions,
    pub(crate) tile_source: Box<dyn TileSource>,
    pub(crate) tile_loader: TileLoader,
    pub(crate) policy: Box<dyn BoundsPolicy>,
    /// Keyed by unwrapped grid position, so copies of a tile across the
    /// antimeridian are tracked separately
    pub(crate) tiles: HashMap<TileIndex, TileState>,
    pub(crate) tile_zoom: Option<u8>,
}

impl TileLayer {
    /// Create a tile layer whose bounds policy follows `options.buffer`
    pub fn new(
        id: impl Into<String>,
        tile_source: Box<dyn TileSource>,
        options: TileLayerOptions,
        tile_loader: TileLoader,
    ) -> Self {
        let policy = <dyn BoundsPolicy>::from_buffer(options.buffer);
        Self {
            id: id.into(),
            visible: true,
            options,
            tile_source,
            tile_loader,
            policy,
            tiles: HashMap::default(),
            tile_zoom: None,
        }
    }

    /// Replace the bounds policy derived from the options
    pub fn with_policy(mut self, policy: impl BoundsPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn options(&self) -> &TileLayerOptions {
        &self.options
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Hidden layers skip updates entirely
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Change the buffer margin; takes effect on the next update
    pub fn set_buffer(&mut self, buffer: Option<u32>) {
        self.options.buffer = buffer;
        self.policy = <dyn BoundsPolicy>::from_buffer(buffer);
    }

    pub fn tile_zoom(&self) -> Option<u8> {
        self.tile_zoom
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn tiles(&self) -> impl Iterator<Item = &TileState> {
        self.tiles.values()
    }

    pub fn has_tile(&self, index: &TileIndex) -> bool {
        self.tiles.contains_key(index)
    }

    /// Whether any held tile is still waiting for its data
    pub fn is_loading(&self) -> bool {
        self.tiles.values().any(|tile| !tile.loaded)
    }

    /// Record that the fetcher finished `coord`. Returns false if the layer
    /// no longer holds it.
    pub fn tile_loaded(&mut self, coord: TileCoord) -> bool {
        let mut found = false;
        for tile in self.tiles.values_mut().filter(|t| t.coord == coord) {
            tile.mark_loaded();
            found = true;
        }
        found
    }

    /// Runs one update cycle for `viewport`.
    ///
    /// The bounds policy is applied exactly once, and the rectangle it
    /// returns is used for both adding and removing tiles.
    pub fn update(&mut self, viewport: &Viewport) -> Result<TileUpdate> {
        if !self.visible {
            #[cfg(feature = "debug")]
            log::trace!("layer {}: hidden, skipping update", self.id);
            return Ok(TileUpdate::skipped());
        }

        let zoom = viewport.zoom.floor();
        let max_zoom = self.options.max_zoom.min(MAX_TILE_ZOOM);
        if !zoom_in_range(zoom, self.options.min_zoom, max_zoom) {
            #[cfg(feature = "debug")]
            log::trace!(
                "layer {}: zoom {} outside [{}, {}], skipping update",
                self.id,
                viewport.zoom,
                self.options.min_zoom,
                max_zoom
            );
            return Ok(TileUpdate::skipped());
        }
        let zoom = zoom as u8;

        let mut removed = Vec::new();
        if self.tile_zoom != Some(zoom) {
            removed.extend(self.clear_tiles()?);
            self.tile_zoom = Some(zoom);
        }

        let visible = viewport
            .pixel_bounds_at(zoom as f64)
            .to_tile_bounds(self.options.tile_size);
        let working = self.policy.apply(visible, zoom);

        let added = self.add_tiles_from_center_out(&working, zoom)?;

        if self.options.prunes_tiles() {
            removed.extend(self.remove_other_tiles(&working)?);
        }

        #[cfg(feature = "debug")]
        log::debug!(
            "layer {}: zoom {} visible {} working {} (+{} -{}, holding {})",
            self.id,
            zoom,
            visible,
            working,
            added.len(),
            removed.len(),
            self.tiles.len()
        );

        Ok(TileUpdate {
            zoom: Some(zoom),
            visible: Some(visible),
            working: Some(working),
            buffered: self.policy.is_buffering(),
            added,
            removed,
        })
    }

    /// Drops every held tile, e.g. after the source changed. The next
    /// update requests the current view again.
    pub fn redraw(&mut self) -> Result<Vec<TileCoord>> {
        self.tile_zoom = None;
        self.clear_tiles()
    }

    fn clear_tiles(&mut self) -> Result<Vec<TileCoord>> {
        let held: Vec<TileIndex> = self.tiles.keys().copied().collect();
        self.unload_tiles(held)
    }

    /// Queues an unload for each index, dropping a tile only once its
    /// request is sent. On error the rest stay held.
    fn unload_tiles(&mut self, indices: Vec<TileIndex>) -> Result<Vec<TileCoord>> {
        let mut removed = Vec::with_capacity(indices.len());
        for index in indices {
            let Some(coord) = self.tiles.get(&index).map(|tile| tile.coord) else {
                continue;
            };
            self.tile_loader.queue_unload(coord, index)?;
            self.tiles.remove(&index);
            removed.push(coord);
        }
        Ok(removed)
    }

    /// Request every missing, valid tile in `bounds`, nearest to the
    /// center of `bounds` first.
    fn add_tiles_from_center_out(
        &mut self,
        bounds: &TileBounds,
        zoom: u8,
    ) -> Result<Vec<TileCoord>> {
        let center = bounds.center();
        let candidates = self.candidate_bounds(bounds, zoom);

        let mut queue: Vec<(f64, TileIndex, TileCoord)> = candidates
            .indices()
            .filter_map(|index| {
                self.tile_should_be_loaded(&index, zoom).map(|coord| {
                    let dx = index.x as f64 - center.x;
                    let dy = index.y as f64 - center.y;
                    (dx * dx + dy * dy, index, coord)
                })
            })
            .collect();

        queue.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut added = Vec::with_capacity(queue.len());
        for (_, index, coord) in queue {
            let url = self.tile_source.url(coord);
            self.tile_loader.queue_load(coord, index, url.clone())?;
            self.tiles.insert(index, TileState::new(coord, index, url));
            added.push(coord);
        }
        Ok(added)
    }

    /// Unload held tiles that fall outside `bounds`
    fn remove_other_tiles(&mut self, bounds: &TileBounds) -> Result<Vec<TileCoord>> {
        let outside: Vec<TileIndex> = self
            .tiles
            .keys()
            .filter(|index| !bounds.contains(index))
            .copied()
            .collect();
        self.unload_tiles(outside)
    }

    /// Narrows `bounds` to the rows (and, without wrapping, columns) that
    /// can hold a valid tile. Purely an iteration shortcut: every index it
    /// cuts would fail [`Self::tile_should_be_loaded`] anyway.
    fn candidate_bounds(&self, bounds: &TileBounds, zoom: u8) -> TileBounds {
        if self.options.continuous_world {
            let mut narrowed = *bounds;
            narrowed.min.x = narrowed.min.x.max(0);
            narrowed.min.y = narrowed.min.y.max(0);
            return narrowed;
        }

        let last = TileCoord::tiles_per_axis(zoom) as i64 - 1;
        let mut narrowed = *bounds;
        narrowed.min.y = narrowed.min.y.max(0);
        narrowed.max.y = narrowed.max.y.min(last);
        if self.options.no_wrap {
            narrowed.min.x = narrowed.min.x.max(0);
            narrowed.max.x = narrowed.max.x.min(last);
        }
        narrowed
    }

    /// The tile to request for grid position `index`, or `None` if it is
    /// already held or does not exist under the layer's options.
    fn tile_should_be_loaded(&self, index: &TileIndex, zoom: u8) -> Option<TileCoord> {
        if self.tiles.contains_key(index) {
            return None;
        }

        let coord = if self.options.continuous_world {
            let x = u32::try_from(index.x).ok()?;
            let y = u32::try_from(index.y).ok()?;
            TileCoord::new(x, y, zoom)
        } else {
            let limit = TileCoord::tiles_per_axis(zoom) as i64;
            if index.y < 0 || index.y >= limit {
                return None;
            }
            if self.options.no_wrap && (index.x < 0 || index.x >= limit) {
                return None;
            }
            TileCoord::new(index.x.rem_euclid(limit) as u32, index.y as u32, zoom)
        };

        if let Some(ref bounds) = self.options.bounds {
            if !bounds.intersects(&coord.bounds()) {
                return None;
            }
        }

        Some(coord)
    }
}

impl std::fmt::Debug for TileLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileLayer")
            .field("id", &self.id)
            .field("visible", &self.visible)
            .field("options", &self.options)
            .field("buffering", &self.policy.is_buffering())
            .field("tiles", &self.tiles.len())
            .field("tile_zoom", &self.tile_zoom)
            .finish()
    }
}
