//! Map layer derivation.
//!
//! Turns a replay snapshot plus the current view parameters into a list of
//! renderer-agnostic layer descriptors. Nothing here touches the painter;
//! `geo::renderer` draws the layers and `geo::picking` hit-tests them.
//!
//! Layer order (back to front): heatmap, agents, bridge markers, bridge
//! labels, areas of interest.

mod bridge;
mod builder;
mod icons;
mod tooltip;

pub use bridge::bridge_color;
pub use builder::build_view;
pub use icons::{select_icon, AgentIcon};
pub use tooltip::tooltip_for;

use crate::model::MapCenter;
use eframe::egui::Color32;
use geo_types::Coord;

/// Identifies a layer; tooltips and click handling dispatch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerId {
    Heatmap,
    AgentPoints,
    AgentIcons,
    AgentLabels,
    BridgeStatus,
    BridgeLabels,
    Aoi,
}

impl LayerId {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerId::Heatmap => "agent-heatmap",
            LayerId::AgentPoints => "agent-points",
            LayerId::AgentIcons => "agent-icons",
            LayerId::AgentLabels => "agent-labels",
            LayerId::BridgeStatus => "bridge-status",
            LayerId::BridgeLabels => "bridge-labels",
            LayerId::Aoi => "aoi",
        }
    }

    /// Layers whose objects index into the snapshot's agent list.
    pub fn carries_agents(&self) -> bool {
        matches!(
            self,
            LayerId::AgentPoints | LayerId::AgentIcons | LayerId::AgentLabels
        )
    }

    /// Layers whose objects index into the snapshot's bridge list.
    pub fn carries_bridges(&self) -> bool {
        matches!(self, LayerId::BridgeStatus | LayerId::BridgeLabels)
    }
}

/// A point with a back-reference into the snapshot collection it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub position: Coord<f64>,
    pub source: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IconMark {
    pub position: Coord<f64>,
    pub icon: AgentIcon,
    pub url: String,
    pub source: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub position: Coord<f64>,
    pub text: String,
    pub source: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedPoint {
    pub position: Coord<f64>,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub position: Coord<f64>,
    pub color: Color32,
    pub source: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    pub ring: Vec<Coord<f64>>,
    pub source: usize,
}

/// Primitive set carried by a layer.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    /// Uniformly styled points.
    Scatter {
        points: Vec<ScatterPoint>,
        color: Color32,
        radius: f32,
    },
    /// Per-object icons.
    Icon { icons: Vec<IconMark>, size: f32 },
    /// Text labels drawn next to their anchor.
    Text {
        labels: Vec<TextLabel>,
        color: Color32,
        size: f32,
    },
    /// Weighted density blobs.
    Heatmap {
        points: Vec<WeightedPoint>,
        radius: f32,
    },
    /// Individually colored markers.
    Marker { markers: Vec<Marker>, radius: f32 },
    /// Filled polygons.
    Polygon { polygons: Vec<PolygonShape> },
}

impl LayerKind {
    /// Number of objects in the layer.
    pub fn len(&self) -> usize {
        match self {
            LayerKind::Scatter { points, .. } => points.len(),
            LayerKind::Icon { icons, .. } => icons.len(),
            LayerKind::Text { labels, .. } => labels.len(),
            LayerKind::Heatmap { points, .. } => points.len(),
            LayerKind::Marker { markers, .. } => markers.len(),
            LayerKind::Polygon { polygons } => polygons.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub id: LayerId,
    pub pickable: bool,
    pub kind: LayerKind,
}

/// Map camera handed to the renderer alongside the layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Coord<f64>,
    pub zoom: f32,
}

/// Per-frame view inputs that are not part of the snapshot.
#[derive(Debug, Clone, Copy)]
pub struct ViewParams<'a> {
    pub zoom: f32,
    pub center: MapCenter,
    pub heatmap_key: Option<&'a str>,
    pub show_bridges: bool,
    pub show_aois: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewOutput {
    pub viewport: Viewport,
    pub layers: Vec<Layer>,
}

impl ViewOutput {
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }
}

/// Result of hit-testing the pointer: which layer, and which object of the
/// snapshot collection that layer draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickInfo {
    pub layer: LayerId,
    pub index: usize,
}
