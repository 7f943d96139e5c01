//! Infrastructure overlays: bridge work-order status and areas of interest.

use geo_types::Coord;
use serde::{Deserialize, Serialize};

/// Simulation clock position of the last event that touched an overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LastUpdate {
    pub day: i64,
    pub t: f64,
    pub step: i64,
}

/// Status marker for a single bridge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BridgeOverlay {
    pub bridge_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub risk: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub work_order_status: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub days_overdue: Option<i64>,
    #[serde(default, alias = "longitude", alias = "lon")]
    pub lng: Option<f64>,
    #[serde(default, alias = "latitude")]
    pub lat: Option<f64>,
    #[serde(default)]
    pub last_update: Option<LastUpdate>,
}

impl BridgeOverlay {
    pub fn new(bridge_id: impl Into<String>) -> Self {
        Self {
            bridge_id: bridge_id.into(),
            ..Default::default()
        }
    }

    /// Position, only when both coordinates are known.
    pub fn position(&self) -> Option<Coord<f64>> {
        match (self.lng, self.lat) {
            (Some(x), Some(y)) => Some(Coord { x, y }),
            _ => None,
        }
    }

    /// Name to show on the map, falling back to the bridge id.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.bridge_id)
    }
}

/// A land-use polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaOfInterest {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub land_use: Option<i64>,
    /// Exterior ring as `[lng, lat]` pairs.
    #[serde(default)]
    pub ring: Vec<[f64; 2]>,
}

impl AreaOfInterest {
    pub fn coords(&self) -> Vec<Coord<f64>> {
        self.ring.iter().map(|p| Coord { x: p[0], y: p[1] }).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_requires_both_coordinates() {
        let mut overlay = BridgeOverlay::new("B-1");
        assert!(overlay.position().is_none());

        overlay.lng = Some(-93.6);
        assert!(overlay.position().is_none());

        overlay.lat = Some(41.6);
        assert_eq!(overlay.position(), Some(Coord { x: -93.6, y: 41.6 }));
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let mut overlay = BridgeOverlay::new("B-9");
        assert_eq!(overlay.display_name(), "B-9");

        overlay.name = Some(String::new());
        assert_eq!(overlay.display_name(), "B-9");

        overlay.name = Some("Elm St Bridge".to_string());
        assert_eq!(overlay.display_name(), "Elm St Bridge");
    }
}
