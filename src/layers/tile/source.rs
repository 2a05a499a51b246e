use super::TileLayerOptions;
use crate::core::constants::{DEFAULT_SUBDOMAINS, OSM_URL_TEMPLATE};
use crate::core::geo::TileCoord;

/// Trait representing anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;
}

/// Fills a `{s}/{z}/{x}/{y}` URL template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    template: String,
    subdomains: Vec<String>,
    zoom_offset: i32,
    zoom_reverse: bool,
    max_zoom: u8,
    tms: bool,
}

impl TemplateSource {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            subdomains: DEFAULT_SUBDOMAINS.iter().map(|s| s.to_string()).collect(),
            zoom_offset: 0,
            zoom_reverse: false,
            max_zoom: 18,
            tms: false,
        }
    }

    /// Public OpenStreetMap tiles
    pub fn openstreetmap() -> Self {
        Self::new(OSM_URL_TEMPLATE)
    }

    /// Takes subdomains, zoom adjustments and TMS flag from layer options
    pub fn with_options(mut self, options: &TileLayerOptions) -> Self {
        self.subdomains = options.subdomains.clone();
        self.zoom_offset = options.zoom_offset;
        self.zoom_reverse = options.zoom_reverse;
        self.max_zoom = options.max_zoom;
        self.tms = options.tms;
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    fn subdomain(&self, coord: TileCoord) -> &str {
        if self.subdomains.is_empty() {
            return "";
        }
        let idx = ((coord.x as u64 + coord.y as u64) % self.subdomains.len() as u64) as usize;
        &self.subdomains[idx]
    }

    fn zoom_for_url(&self, coord: TileCoord) -> i64 {
        let z = if self.zoom_reverse {
            self.max_zoom as i64 - coord.z as i64
        } else {
            coord.z as i64
        };
        z + self.zoom_offset as i64
    }

    /// Signed: with an unbounded grid a TMS row can sit above the world
    fn y_for_url(&self, coord: TileCoord) -> i64 {
        if self.tms {
            TileCoord::tiles_per_axis(coord.z) as i64 - 1 - coord.y as i64
        } else {
            coord.y as i64
        }
    }
}

impl Default for TemplateSource {
    fn default() -> Self {
        Self::openstreetmap()
    }
}

impl TileSource for TemplateSource {
    fn url(&self, coord: TileCoord) -> String {
        self.template
            .replace("{s}", self.subdomain(coord))
            .replace("{z}", &self.zoom_for_url(coord).to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &self.y_for_url(coord).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openstreetmap_url() {
        let source = TemplateSource::openstreetmap();
        // (1 + 2) % 3 = 0 -> "a"
        assert_eq!(
            source.url(TileCoord::new(1, 2, 3)),
            "https://a.tile.openstreetmap.org/3/1/2.png"
        );
        assert_eq!(
            source.url(TileCoord::new(2, 2, 3)),
            "https://b.tile.openstreetmap.org/3/2/2.png"
        );
    }

    #[test]
    fn test_tms_and_zoom_offset() {
        let options = TileLayerOptions {
            tms: true,
            zoom_offset: 1,
            ..Default::default()
        };
        let source = TemplateSource::new("{z}/{x}/{y}").with_options(&options);
        // 2^3 - 1 - 2 = 5
        assert_eq!(source.url(TileCoord::new(1, 2, 3)), "4/1/5");
    }

    #[test]
    fn test_tms_row_beyond_world() {
        let options = TileLayerOptions {
            tms: true,
            ..Default::default()
        };
        let source = TemplateSource::new("{z}/{x}/{y}").with_options(&options);
        // 2^2 - 1 - 9 = -6
        assert_eq!(source.url(TileCoord::new(0, 9, 2)), "2/0/-6");
    }

    #[test]
    fn test_zoom_reverse() {
        let options = TileLayerOptions {
            zoom_reverse: true,
            max_zoom: 10,
            ..Default::default()
        };
        let source = TemplateSource::new("{z}").with_options(&options);
        assert_eq!(source.url(TileCoord::new(0, 0, 3)), "7");
    }

    #[test]
    fn test_empty_subdomains() {
        let options = TileLayerOptions {
            subdomains: Vec::new(),
            ..Default::default()
        };
        let source = TemplateSource::new("https://{s}tiles.test/{z}/{x}/{y}").with_options(&options);
        assert_eq!(source.url(TileCoord::new(0, 0, 0)), "https://tiles.test/0/0/0");
    }
}
