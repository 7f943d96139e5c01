//! Pointer hit-testing against layer descriptors.

use super::renderer::LABEL_OFFSET;
use super::MapProjection;
use crate::layers::{Layer, LayerKind, PickInfo};
use eframe::egui::{Pos2, Rect, Vec2};
use geo_types::Coord;

/// Extra pixels around point-like objects that still count as a hit.
const PICK_SLOP: f32 = 3.0;

/// Approximate advance of one proportional glyph relative to font size.
const GLYPH_WIDTH_FACTOR: f32 = 0.55;

/// Hit-tests pickable layers against a pointer position.
///
/// Point-like layers are tested top-most first and the nearest hit within a
/// layer wins. Polygon layers are only consulted when no point-like object
/// is under the pointer, so areas of interest never hide agents or bridges
/// drawn beneath them.
pub fn pick(projection: &MapProjection, layers: &[Layer], pointer: Pos2) -> Option<PickInfo> {
    let pickable = || layers.iter().rev().filter(|l| l.pickable);

    pickable()
        .filter(|l| !matches!(l.kind, LayerKind::Polygon { .. }))
        .find_map(|layer| {
            pick_nearest(projection, layer, pointer).map(|index| PickInfo {
                layer: layer.id,
                index,
            })
        })
        .or_else(|| {
            let geo = projection.screen_to_geo(pointer);
            pickable().find_map(|layer| match &layer.kind {
                LayerKind::Polygon { polygons } => polygons
                    .iter()
                    .rev()
                    .find(|p| point_in_ring(geo, &p.ring))
                    .map(|p| PickInfo {
                        layer: layer.id,
                        index: p.source,
                    }),
                _ => None,
            })
        })
}

/// Snapshot index of the nearest point-like object under the pointer.
fn pick_nearest(projection: &MapProjection, layer: &Layer, pointer: Pos2) -> Option<usize> {
    let within = |anchor: Coord<f64>, radius: f32| {
        let d = projection.geo_to_screen(anchor).distance(pointer);
        (d <= radius + PICK_SLOP).then_some(d)
    };

    let hits: Vec<(f32, usize)> = match &layer.kind {
        LayerKind::Scatter { points, radius, .. } => points
            .iter()
            .filter_map(|p| within(p.position, *radius).map(|d| (d, p.source)))
            .collect(),
        LayerKind::Icon { icons, size } => icons
            .iter()
            .filter_map(|m| within(m.position, size * m.icon.scale()).map(|d| (d, m.source)))
            .collect(),
        LayerKind::Marker { markers, radius } => markers
            .iter()
            .filter_map(|m| within(m.position, *radius).map(|d| (d, m.source)))
            .collect(),
        LayerKind::Text { labels, size, .. } => labels
            .iter()
            .filter_map(|label| {
                let anchor = projection.geo_to_screen(label.position) + LABEL_OFFSET;
                let width = label.text.chars().count() as f32 * size * GLYPH_WIDTH_FACTOR;
                let rect = Rect::from_min_size(
                    anchor - Vec2::new(0.0, size / 2.0),
                    Vec2::new(width, *size),
                );
                rect.contains(pointer)
                    .then(|| (rect.center().distance(pointer), label.source))
            })
            .collect(),
        LayerKind::Heatmap { .. } | LayerKind::Polygon { .. } => Vec::new(),
    };

    hits.into_iter()
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, index)| index)
}

/// Even-odd ray casting test in geographic space.
pub fn point_in_ring(point: Coord<f64>, ring: &[Coord<f64>]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::{
        Layer, LayerId, LayerKind, PolygonShape, ScatterPoint, TextLabel, Viewport,
    };
    use eframe::egui::Color32;

    fn projection() -> MapProjection {
        let viewport = Viewport {
            center: Coord { x: 0.0, y: 0.0 },
            zoom: 10.0,
        };
        MapProjection::new(
            &viewport,
            Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0)),
        )
    }

    fn scatter(id: LayerId, coords: &[(f64, f64)]) -> Layer {
        Layer {
            id,
            pickable: true,
            kind: LayerKind::Scatter {
                points: coords
                    .iter()
                    .enumerate()
                    .map(|(source, &(x, y))| ScatterPoint {
                        position: Coord { x, y },
                        source,
                    })
                    .collect(),
                color: Color32::WHITE,
                radius: 4.0,
            },
        }
    }

    fn square(half: f64) -> Layer {
        Layer {
            id: LayerId::Aoi,
            pickable: true,
            kind: LayerKind::Polygon {
                polygons: vec![PolygonShape {
                    ring: vec![
                        Coord { x: -half, y: -half },
                        Coord { x: half, y: -half },
                        Coord { x: half, y: half },
                        Coord { x: -half, y: half },
                    ],
                    source: 0,
                }],
            },
        }
    }

    #[test]
    fn test_picks_nearest_point() {
        let p = projection();
        let layer = scatter(LayerId::AgentPoints, &[(0.0, 0.0), (0.0001, 0.0)]);
        let pointer = p.geo_to_screen(Coord { x: 0.0001, y: 0.0 });
        assert_eq!(
            pick(&p, &[layer], pointer),
            Some(PickInfo {
                layer: LayerId::AgentPoints,
                index: 1
            })
        );
    }

    #[test]
    fn test_miss_returns_none() {
        let p = projection();
        let layer = scatter(LayerId::AgentPoints, &[(0.0, 0.0)]);
        assert_eq!(pick(&p, &[layer], Pos2::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_top_most_layer_wins() {
        let p = projection();
        let layers = vec![
            scatter(LayerId::AgentPoints, &[(0.0, 0.0)]),
            scatter(LayerId::BridgeStatus, &[(0.0, 0.0)]),
        ];
        let hit = pick(&p, &layers, p.screen_rect.center()).unwrap();
        assert_eq!(hit.layer, LayerId::BridgeStatus);
    }

    #[test]
    fn test_unpickable_layers_are_skipped() {
        let p = projection();
        let mut layer = scatter(LayerId::AgentPoints, &[(0.0, 0.0)]);
        layer.pickable = false;
        assert_eq!(pick(&p, &[layer], p.screen_rect.center()), None);
    }

    #[test]
    fn test_polygon_does_not_hide_points() {
        let p = projection();
        let layers = vec![scatter(LayerId::AgentPoints, &[(0.0, 0.0)]), square(0.05)];
        let center = p.screen_rect.center();
        assert_eq!(pick(&p, &layers, center).unwrap().layer, LayerId::AgentPoints);

        let off_point = center + Vec2::new(40.0, 0.0);
        assert_eq!(pick(&p, &layers, off_point).unwrap().layer, LayerId::Aoi);
    }

    #[test]
    fn test_text_label_hit_box() {
        let p = projection();
        let layer = Layer {
            id: LayerId::AgentLabels,
            pickable: true,
            kind: LayerKind::Text {
                labels: vec![TextLabel {
                    position: Coord { x: 0.0, y: 0.0 },
                    text: "Agent 7".to_string(),
                    source: 7,
                }],
                color: Color32::WHITE,
                size: 12.0,
            },
        };
        let on_text = p.screen_rect.center() + LABEL_OFFSET + Vec2::new(10.0, 0.0);
        assert_eq!(pick(&p, &[layer.clone()], on_text).map(|h| h.index), Some(7));
        let left_of_anchor = p.screen_rect.center() - Vec2::new(20.0, 0.0);
        assert_eq!(pick(&p, &[layer], left_of_anchor), None);
    }

    #[test]
    fn test_point_in_ring() {
        let ring = vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 2.0, y: 0.0 },
            Coord { x: 2.0, y: 2.0 },
            Coord { x: 0.0, y: 2.0 },
        ];
        assert!(point_in_ring(Coord { x: 1.0, y: 1.0 }, &ring));
        assert!(!point_in_ring(Coord { x: 3.0, y: 1.0 }, &ring));
        assert!(!point_in_ring(Coord { x: 1.0, y: 1.0 }, &ring[..2]));
    }
}
