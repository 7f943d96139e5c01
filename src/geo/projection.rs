//! Map projection and coordinate transformation.
//!
//! Handles converting between geographic coordinates (lat/lon) and
//! screen coordinates for rendering on the canvas.

use crate::layers::Viewport;
use eframe::egui::{Pos2, Rect, Vec2};
use geo_types::Coord;

/// Longitude span shown across the shorter canvas side at zoom 0.
const WORLD_SPAN_DEG: f64 = 360.0;

/// Map projection for converting geographic to screen coordinates.
#[derive(Debug, Clone)]
pub struct MapProjection {
    /// Center latitude of the view
    pub center_lat: f64,
    /// Center longitude of the view
    pub center_lon: f64,
    /// Map zoom level; each level halves the visible span
    pub zoom: f32,
    /// Screen rectangle for the canvas
    pub screen_rect: Rect,
}

impl Default for MapProjection {
    fn default() -> Self {
        Self {
            center_lat: 0.0,
            center_lon: 0.0,
            zoom: 1.0,
            screen_rect: Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0)),
        }
    }
}

impl MapProjection {
    /// Creates a projection for a viewport drawn into `screen_rect`.
    pub fn new(viewport: &Viewport, screen_rect: Rect) -> Self {
        Self {
            center_lat: viewport.center.y,
            center_lon: viewport.center.x,
            zoom: viewport.zoom,
            screen_rect,
        }
    }

    /// Visible span in degrees across the shorter canvas side.
    pub fn range_deg(&self) -> f64 {
        WORLD_SPAN_DEG / 2f64.powf(self.zoom as f64)
    }

    /// Screen pixels per degree of latitude.
    pub fn pixels_per_degree(&self) -> f64 {
        self.screen_rect.size().min_elem() as f64 / self.range_deg()
    }

    fn lat_correction(&self) -> f64 {
        self.center_lat.to_radians().cos().max(1e-6)
    }

    /// Converts geographic coordinates (lon, lat) to screen position.
    ///
    /// Equirectangular with a cosine correction at the center latitude,
    /// adequate for city-scale views.
    pub fn geo_to_screen(&self, coord: Coord<f64>) -> Pos2 {
        let scale = self.pixels_per_degree();
        let dx = (coord.x - self.center_lon) * self.lat_correction() * scale;
        // Flip Y since screen Y increases downward
        let dy = -(coord.y - self.center_lat) * scale;

        let center = self.screen_rect.center();
        Pos2::new(center.x + dx as f32, center.y + dy as f32)
    }

    /// Converts screen position to geographic coordinates (lon, lat).
    pub fn screen_to_geo(&self, pos: Pos2) -> Coord<f64> {
        let scale = self.pixels_per_degree();
        let center = self.screen_rect.center();
        let dx = (pos.x - center.x) as f64;
        let dy = (pos.y - center.y) as f64;

        Coord {
            x: self.center_lon + dx / scale / self.lat_correction(),
            y: self.center_lat - dy / scale,
        }
    }

    /// Geographic offset covered by a screen-space drag of `delta` pixels.
    pub fn screen_delta_to_geo(&self, delta: Vec2) -> Coord<f64> {
        let scale = self.pixels_per_degree();
        Coord {
            x: delta.x as f64 / scale / self.lat_correction(),
            y: -(delta.y as f64) / scale,
        }
    }

    /// Returns the visible geographic bounds as (min_lon, min_lat, max_lon, max_lat).
    pub fn visible_bounds(&self) -> (f64, f64, f64, f64) {
        let top_left = self.screen_to_geo(self.screen_rect.left_top());
        let bottom_right = self.screen_to_geo(self.screen_rect.right_bottom());

        (
            top_left.x.min(bottom_right.x),
            top_left.y.min(bottom_right.y),
            top_left.x.max(bottom_right.x),
            top_left.y.max(bottom_right.y),
        )
    }

    /// Checks if a coordinate is within the visible bounds (with margin).
    pub fn is_visible(&self, coord: Coord<f64>, margin_deg: f64) -> bool {
        let (min_lon, min_lat, max_lon, max_lat) = self.visible_bounds();
        coord.x >= min_lon - margin_deg
            && coord.x <= max_lon + margin_deg
            && coord.y >= min_lat - margin_deg
            && coord.y <= max_lat + margin_deg
    }
}
