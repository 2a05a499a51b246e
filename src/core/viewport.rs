use crate::core::bounds::Bounds;
use crate::core::constants::{DEFAULT_MIN_ZOOM, WORLD_SIZE_AT_ZOOM_0};
use crate::core::geo::{LatLng, Point};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// The current view of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
}

impl Viewport {
    /// Creates a new viewport. The zoom is not clamped; tile layers decide
    /// for themselves whether a zoom is in range.
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self { center, zoom, size }
    }

    /// Sets the center of the viewport
    pub fn set_center(&mut self, center: LatLng) {
        self.center = center;
    }

    /// Sets the zoom level
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    /// Sets the viewport size
    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    /// Pans by a screen-pixel offset at the current zoom
    pub fn pan_by(&mut self, offset: Point) {
        let center_px = self.project(&self.center, None).add(&offset);
        self.center = self.unproject(&center_px, None);
    }

    /// Projects a LatLng to world pixel coordinates (EPSG:3857)
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let scale = WORLD_SIZE_AT_ZOOM_0 * 2_f64.powf(zoom.unwrap_or(self.zoom));
        let lat_rad = LatLng::clamp_lat(lat_lng.lat).to_radians();

        let x = (lat_lng.lng + 180.0) / 360.0 * scale;
        let y = (1.0 - (PI / 4.0 + lat_rad / 2.0).tan().ln() / PI) / 2.0 * scale;

        Point::new(x, y)
    }

    /// Unprojects world pixel coordinates back to LatLng
    pub fn unproject(&self, pixel: &Point, zoom: Option<f64>) -> LatLng {
        let scale = WORLD_SIZE_AT_ZOOM_0 * 2_f64.powf(zoom.unwrap_or(self.zoom));

        let lng = pixel.x / scale * 360.0 - 180.0;
        let n = PI * (1.0 - 2.0 * pixel.y / scale);
        let lat = n.sinh().atan().to_degrees();

        LatLng::new(lat, lng)
    }

    /// World-pixel rectangle visible at the current zoom
    pub fn pixel_bounds(&self) -> Bounds {
        self.pixel_bounds_at(self.zoom)
    }

    /// World-pixel rectangle covering the viewport, measured at `zoom`.
    ///
    /// When `zoom` differs from the map zoom the screen size is rescaled,
    /// so a layer drawing integer-zoom tiles under a fractional map zoom
    /// still covers exactly what is on screen.
    pub fn pixel_bounds_at(&self, zoom: f64) -> Bounds {
        let scale = 2_f64.powf(self.zoom - zoom);
        let center = self.project(&self.center, Some(zoom));
        Bounds::from_center_and_size(center, self.size.x / scale, self.size.y / scale)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(
            LatLng::default(),
            DEFAULT_MIN_ZOOM as f64,
            Point::new(WORLD_SIZE_AT_ZOOM_0, WORLD_SIZE_AT_ZOOM_0),
        )
    }
}

/// Returns true when a tile zoom lies within a layer's `[min_zoom, max_zoom]`
pub fn zoom_in_range(zoom: f64, min_zoom: u8, max_zoom: u8) -> bool {
    zoom.is_finite() && zoom >= min_zoom as f64 && zoom <= max_zoom as f64
}
