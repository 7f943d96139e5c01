//! Snapshot + view parameters to layer descriptors.

use super::{
    bridge_color, select_icon, IconMark, Layer, LayerId, LayerKind, Marker, PolygonShape,
    ScatterPoint, TextLabel, ViewOutput, ViewParams, Viewport, WeightedPoint,
};
use crate::model::{Agent, AreaOfInterest, BridgeOverlay, ReplaySnapshot};
use crate::state::ViewerSettings;
use crate::ui::colors;
use geo_types::Coord;

/// Builds the full layer stack and viewport for one frame.
pub fn build_view(
    snapshot: &ReplaySnapshot,
    params: &ViewParams<'_>,
    settings: &ViewerSettings,
) -> ViewOutput {
    let mut layers = Vec::new();

    if let Some(key) = params.heatmap_key.filter(|k| !k.is_empty()) {
        layers.push(heatmap_layer(&snapshot.agents, key, settings));
    }

    layers.extend(agent_layers(&snapshot.agents, params.zoom, settings));

    if params.show_bridges {
        layers.extend(bridge_layers(&snapshot.bridges, settings));
    }

    if params.show_aois && !snapshot.aois.is_empty() {
        layers.push(aoi_layer(&snapshot.aois));
    }

    ViewOutput {
        viewport: Viewport {
            center: Coord {
                x: params.center.lng,
                y: params.center.lat,
            },
            zoom: params.zoom,
        },
        layers,
    }
}

/// Agent layers for the given zoom.
///
/// Below the icon threshold this is a single uniform point layer. At or above
/// it, an icon layer with every agent plus a label layer with every named
/// agent.
pub fn agent_layers(agents: &[Agent], zoom: f32, settings: &ViewerSettings) -> Vec<Layer> {
    if zoom < settings.icon_zoom_threshold {
        let points = agents
            .iter()
            .enumerate()
            .map(|(source, agent)| ScatterPoint {
                position: agent.position(),
                source,
            })
            .collect();
        return vec![Layer {
            id: LayerId::AgentPoints,
            pickable: true,
            kind: LayerKind::Scatter {
                points,
                color: colors::agents::POINT,
                radius: settings.point_radius,
            },
        }];
    }

    let icons = agents
        .iter()
        .enumerate()
        .map(|(source, agent)| {
            let icon = select_icon(agent.profile.as_ref());
            IconMark {
                position: agent.position(),
                icon,
                url: icon.url(&settings.icon_base_url),
                source,
            }
        })
        .collect();

    let labels = agents
        .iter()
        .enumerate()
        .filter(|(_, agent)| !agent.name.trim().is_empty())
        .map(|(source, agent)| TextLabel {
            position: agent.position(),
            text: agent.name.clone(),
            source,
        })
        .collect();

    vec![
        Layer {
            id: LayerId::AgentIcons,
            pickable: true,
            kind: LayerKind::Icon {
                icons,
                size: settings.icon_size,
            },
        },
        Layer {
            id: LayerId::AgentLabels,
            pickable: true,
            kind: LayerKind::Text {
                labels,
                color: colors::agents::LABEL,
                size: settings.label_size,
            },
        },
    ]
}

/// Status markers and labels for overlays that carry both coordinates.
///
/// Returns no layers when none of them do.
pub fn bridge_layers(overlays: &[BridgeOverlay], settings: &ViewerSettings) -> Vec<Layer> {
    let located: Vec<(usize, &BridgeOverlay, Coord<f64>)> = overlays
        .iter()
        .enumerate()
        .filter_map(|(i, o)| o.position().map(|p| (i, o, p)))
        .collect();

    if located.is_empty() {
        return Vec::new();
    }

    let markers = located
        .iter()
        .map(|&(source, overlay, position)| Marker {
            position,
            color: bridge_color(overlay),
            source,
        })
        .collect();

    let labels = located
        .iter()
        .map(|&(source, overlay, position)| TextLabel {
            position,
            text: overlay.display_name().to_string(),
            source,
        })
        .collect();

    vec![
        Layer {
            id: LayerId::BridgeStatus,
            pickable: true,
            kind: LayerKind::Marker {
                markers,
                radius: settings.bridge_marker_radius,
            },
        },
        Layer {
            id: LayerId::BridgeLabels,
            pickable: true,
            kind: LayerKind::Text {
                labels,
                color: colors::bridge::LABEL,
                size: settings.label_size,
            },
        },
    ]
}

fn heatmap_layer(agents: &[Agent], key: &str, settings: &ViewerSettings) -> Layer {
    let points = agents
        .iter()
        .map(|agent| WeightedPoint {
            position: agent.position(),
            weight: agent.status_weight(key),
        })
        .collect();
    Layer {
        id: LayerId::Heatmap,
        pickable: false,
        kind: LayerKind::Heatmap {
            points,
            radius: settings.heatmap_radius,
        },
    }
}

fn aoi_layer(aois: &[AreaOfInterest]) -> Layer {
    let polygons = aois
        .iter()
        .enumerate()
        .filter(|(_, aoi)| aoi.ring.len() >= 3)
        .map(|(source, aoi)| PolygonShape {
            ring: aoi.coords(),
            source,
        })
        .collect();
    Layer {
        id: LayerId::Aoi,
        pickable: true,
        kind: LayerKind::Polygon { polygons },
    }
}
