//! Map view.
//!
//! Receives the coordinates and metadata on every render and describes what a
//! map surface should show: one marker with a popup, the basemap layer for the
//! current theme, and an animated re-center whenever the coordinates changed
//! since the last render. Zoom is preserved across re-centers.
//!
//! Nothing is rendered while the coordinates hold the zero sentinel.

mod tiles;

pub use tiles::{tile_for, TileCoord, TileLayer};

use crate::config::{DEFAULT_ZOOM, MAX_ZOOM};
use crate::controller::ControllerSnapshot;
use crate::geolocation::LocationRecord;
use crate::storage::ThemePreference;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Inputs of one render.
#[derive(Debug, Clone, PartialEq)]
pub struct MapProps {
    pub latitude: f64,
    pub longitude: f64,
    pub ip: String,
    pub city: String,
    pub country: String,
    pub theme: ThemePreference,
}

impl MapProps {
    pub fn from_record(record: &LocationRecord, theme: ThemePreference) -> Self {
        Self {
            latitude: record.latitude,
            longitude: record.longitude,
            ip: record.ip.clone(),
            city: record.city.clone(),
            country: record.country.clone(),
            theme,
        }
    }

    pub fn from_snapshot(snapshot: &ControllerSnapshot) -> Self {
        Self::from_record(&snapshot.record, snapshot.theme)
    }

    fn coordinate(&self) -> Option<Coordinate> {
        (self.latitude != 0.0 && self.longitude != 0.0).then_some(Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coordinate,
    /// `"{ip} / {city}, {country}"`
    pub popup: String,
}

/// Instruction to move the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recenter {
    pub to: Coordinate,
    pub zoom: u8,
    pub animate: bool,
}

/// Everything a map surface needs for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct MapFrame {
    pub center: Coordinate,
    pub zoom: u8,
    pub tile_layer: TileLayer,
    pub marker: Marker,
    /// Present only when the coordinates changed since the previous render.
    pub recenter: Option<Recenter>,
    pub center_tile: TileCoord,
    pub center_tile_url: String,
}

#[derive(Debug, Clone)]
pub struct MapView {
    last_centered: Option<Coordinate>,
    zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self::new()
    }
}

impl MapView {
    pub fn new() -> Self {
        Self {
            last_centered: None,
            zoom: DEFAULT_ZOOM,
        }
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Sets the zoom, clamped to what the basemap serves.
    pub fn set_zoom(&mut self, zoom: u8) {
        self.zoom = zoom.min(MAX_ZOOM);
    }

    pub fn last_centered(&self) -> Option<Coordinate> {
        self.last_centered
    }

    /// Renders `props`, or returns `None` for the zero-coordinate sentinel.
    ///
    /// A theme change alone swaps the tile layer without a re-center.
    pub fn render(&mut self, props: &MapProps) -> Option<MapFrame> {
        let center = props.coordinate()?;

        let recenter = (self.last_centered != Some(center)).then_some(Recenter {
            to: center,
            zoom: self.zoom,
            animate: true,
        });
        if recenter.is_some() {
            log::debug!(
                "Re-centering map on {:.4}, {:.4} at zoom {}",
                center.latitude,
                center.longitude,
                self.zoom
            );
        }
        self.last_centered = Some(center);

        let tile_layer = TileLayer::for_theme(props.theme);
        let center_tile = tile_for(center, self.zoom);
        let center_tile_url = tile_layer.tile_url(center_tile, 'a');

        Some(MapFrame {
            center,
            zoom: self.zoom,
            tile_layer,
            marker: Marker {
                position: center,
                popup: format!("{} / {}, {}", props.ip, props.city, props.country),
            },
            recenter,
            center_tile,
            center_tile_url,
        })
    }
}
