//! Raster map tiles in the XYZ ("slippy map") scheme.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::model::Coordinate;

pub const OSM_URL_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";
pub const MAX_ZOOM: u8 = 19;

/// Limit of the Web Mercator projection.
const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_78;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileSource {
    /// Template with `{s}`, `{z}`, `{x}` and `{y}` placeholders.
    pub url_template: String,
    pub subdomains: Vec<String>,
    /// Must be shown wherever tiles from this source are.
    pub attribution: String,
}

impl Default for TileSource {
    fn default() -> Self {
        Self {
            url_template: OSM_URL_TEMPLATE.to_string(),
            subdomains: vec!["a".into(), "b".into(), "c".into()],
            attribution: OSM_ATTRIBUTION.to_string(),
        }
    }
}

impl TileSource {
    pub fn tile_url(&self, tile: TileId) -> String {
        let subdomain = if self.subdomains.is_empty() {
            ""
        } else {
            let idx = (tile.x as usize + tile.y as usize) % self.subdomains.len();
            self.subdomains[idx].as_str()
        };

        self.url_template
            .replace("{s}", subdomain)
            .replace("{z}", &tile.zoom.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TileId {
    pub zoom: u8,
    pub x: u32,
    pub y: u32,
}

impl TileId {
    /// Tile containing `coordinate` at `zoom` (clamped to [`MAX_ZOOM`]).
    pub fn containing(coordinate: &Coordinate, zoom: u8) -> Self {
        let zoom = zoom.min(MAX_ZOOM);
        let n = f64::from(1u32 << zoom);

        let lat = coordinate
            .latitude
            .clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE)
            .to_radians();

        let x = ((coordinate.longitude + 180.0) / 360.0 * n).floor();
        let y = ((1.0 - lat.tan().asinh() / PI) / 2.0 * n).floor();

        let max = n - 1.0;
        Self {
            zoom,
            x: x.clamp(0.0, max) as u32,
            y: y.clamp(0.0, max) as u32,
        }
    }
}
