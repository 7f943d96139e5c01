//! Visualization state (map camera and hover).

use crate::layers::PickInfo;
use crate::model::MapCenter;
use geo_types::Coord;

/// Zoom limits for the map camera.
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 20.0;

/// Scroll pixels per zoom level.
const SCROLL_PIXELS_PER_LEVEL: f32 = 120.0;

/// Visualization state including view controls.
pub struct VizState {
    /// Current map zoom level
    pub zoom: f32,

    /// Current map center
    pub center: MapCenter,

    /// Camera restored on double-click
    pub home_zoom: f32,
    pub home_center: MapCenter,

    /// Object under the pointer during the last frame
    pub hovered: Option<PickInfo>,
}

impl Default for VizState {
    fn default() -> Self {
        Self::new(crate::model::DEFAULT_CENTER, 11.0)
    }
}

impl VizState {
    pub fn new(center: MapCenter, zoom: f32) -> Self {
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        Self {
            zoom,
            center,
            home_zoom: zoom,
            home_center: center,
            hovered: None,
        }
    }

    /// Moves the center by a geographic offset (the drag direction is
    /// handled by the caller).
    pub fn pan_by(&mut self, delta: Coord<f64>) {
        self.center.lng -= delta.x;
        self.center.lat = (self.center.lat - delta.y).clamp(-85.0, 85.0);
    }

    /// Zooms by scroll delta, keeping `anchor` at the same screen position.
    pub fn zoom_by_scroll(&mut self, scroll_y: f32, anchor: Option<Coord<f64>>) {
        let old_zoom = self.zoom;
        let new_zoom = (old_zoom + scroll_y / SCROLL_PIXELS_PER_LEVEL).clamp(MIN_ZOOM, MAX_ZOOM);
        if new_zoom == old_zoom {
            return;
        }

        if let Some(anchor) = anchor {
            // Visible span scales by 2^-(new - old).
            let ratio = 2f64.powf((old_zoom - new_zoom) as f64);
            self.center.lng = anchor.x + (self.center.lng - anchor.x) * ratio;
            self.center.lat = anchor.y + (self.center.lat - anchor.y) * ratio;
        }

        self.zoom = new_zoom;
    }

    pub fn reset_view(&mut self) {
        self.zoom = self.home_zoom;
        self.center = self.home_center;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viz() -> VizState {
        VizState::new(MapCenter { lng: 10.0, lat: 20.0 }, 10.0)
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut v = viz();
        let anchor = Coord { x: 11.0, y: 21.0 };
        v.zoom_by_scroll(SCROLL_PIXELS_PER_LEVEL, Some(anchor));
        assert_eq!(v.zoom, 11.0);
        // One level in halves the distance to the anchor.
        assert!((v.center.lng - 10.5).abs() < 1e-9);
        assert!((v.center.lat - 20.5).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut v = viz();
        v.zoom_by_scroll(1.0e6, None);
        assert_eq!(v.zoom, MAX_ZOOM);
        v.zoom_by_scroll(-1.0e6, None);
        assert_eq!(v.zoom, MIN_ZOOM);
    }

    #[test]
    fn test_pan_and_reset() {
        let mut v = viz();
        v.pan_by(Coord { x: 0.5, y: -0.25 });
        assert_eq!(v.center, MapCenter { lng: 9.5, lat: 20.25 });
        v.zoom_by_scroll(-240.0, None);
        v.reset_view();
        assert_eq!(v.center, MapCenter { lng: 10.0, lat: 20.0 });
        assert_eq!(v.zoom, 10.0);
    }
}
