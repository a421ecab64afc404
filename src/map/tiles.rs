//! Basemap tile layers and Web Mercator tile math.

use std::f64::consts::PI;

use crate::config::{
    MAX_ZOOM, TILE_ATTRIBUTION, TILE_STYLE_DARK, TILE_STYLE_LIGHT, TILE_URL_TEMPLATE,
};
use crate::storage::ThemePreference;

use super::Coordinate;

/// Web Mercator stops being square past this latitude.
const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_78;

/// Imagery source for one theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    pub style: &'static str,
    /// URL template with `{s}`, `{z}`, `{x}`, `{y}` and `{r}` placeholders.
    pub url_template: String,
    pub attribution: &'static str,
}

impl TileLayer {
    pub fn for_theme(theme: ThemePreference) -> Self {
        let style = if theme.is_dark() {
            TILE_STYLE_DARK
        } else {
            TILE_STYLE_LIGHT
        };
        Self {
            style,
            url_template: TILE_URL_TEMPLATE.replace("{style}", style),
            attribution: TILE_ATTRIBUTION,
        }
    }

    /// Concrete URL of one tile (standard resolution).
    pub fn tile_url(&self, tile: TileCoord, subdomain: char) -> String {
        self.url_template
            .replace("{s}", &subdomain.to_string())
            .replace("{z}", &tile.z.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string())
            .replace("{r}", "")
    }
}

/// Slippy-map tile address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

/// The tile containing `coord` at `zoom`.
pub fn tile_for(coord: Coordinate, zoom: u8) -> TileCoord {
    let zoom = zoom.min(MAX_ZOOM);
    let n = f64::from(1u32 << zoom);
    let max_index = (1u32 << zoom) - 1;

    let lat = coord
        .latitude
        .clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE)
        .to_radians();
    let x = ((coord.longitude + 180.0) / 360.0 * n).floor();
    let y = ((1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * n).floor();

    TileCoord {
        x: (x.max(0.0) as u32).min(max_index),
        y: (y.max(0.0) as u32).min(max_index),
        z: zoom,
    }
}
