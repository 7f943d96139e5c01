//! Map layer rendering.
//!
//! Paints layer descriptors to the egui canvas, back to front.

use super::MapProjection;
use crate::layers::{
    IconMark, Layer, LayerKind, Marker, PolygonShape, ScatterPoint, TextLabel, WeightedPoint,
};
use crate::ui::colors;
use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Shape, Stroke, Vec2};

/// Offset of a text label from its anchor.
pub(crate) const LABEL_OFFSET: Vec2 = Vec2::new(8.0, 0.0);

/// Margin in degrees when culling objects outside the view.
const CULL_MARGIN_DEG: f64 = 0.01;

/// Renders all layers in order (back to front).
pub fn paint_layers(painter: &Painter, projection: &MapProjection, layers: &[Layer]) {
    for layer in layers.iter().filter(|l| !l.kind.is_empty()) {
        paint_layer(painter, projection, layer);
    }
}

fn paint_layer(painter: &Painter, projection: &MapProjection, layer: &Layer) {
    match &layer.kind {
        LayerKind::Scatter {
            points,
            color,
            radius,
        } => paint_points(painter, projection, points, *color, *radius),
        LayerKind::Icon { icons, size } => paint_icons(painter, projection, icons, *size),
        LayerKind::Text {
            labels,
            color,
            size,
        } => paint_labels(painter, projection, labels, *color, *size),
        LayerKind::Heatmap { points, radius } => {
            paint_heatmap(painter, projection, points, *radius)
        }
        LayerKind::Marker { markers, radius } => {
            paint_markers(painter, projection, markers, *radius)
        }
        LayerKind::Polygon { polygons } => paint_polygons(painter, projection, polygons),
    }
}

fn paint_points(
    painter: &Painter,
    projection: &MapProjection,
    points: &[ScatterPoint],
    color: Color32,
    radius: f32,
) {
    for point in points {
        if !projection.is_visible(point.position, CULL_MARGIN_DEG) {
            continue;
        }
        painter.circle_filled(projection.geo_to_screen(point.position), radius, color);
    }
}

/// Icons are drawn as tinted discs with a bucket glyph; children are smaller.
fn paint_icons(painter: &Painter, projection: &MapProjection, icons: &[IconMark], size: f32) {
    let stroke = Stroke::new(1.0, colors::agents::ICON_STROKE);
    for mark in icons {
        if !projection.is_visible(mark.position, CULL_MARGIN_DEG) {
            continue;
        }
        let pos = projection.geo_to_screen(mark.position);
        let radius = size * mark.icon.scale();
        painter.circle(pos, radius, mark.icon.tint(), stroke);
        painter.text(
            pos,
            Align2::CENTER_CENTER,
            mark.icon.glyph(),
            FontId::monospace(radius * 1.2),
            colors::agents::ICON_STROKE,
        );
    }
}

fn paint_labels(
    painter: &Painter,
    projection: &MapProjection,
    labels: &[TextLabel],
    color: Color32,
    size: f32,
) {
    for label in labels {
        if !projection.is_visible(label.position, CULL_MARGIN_DEG) {
            continue;
        }
        let pos = projection.geo_to_screen(label.position) + LABEL_OFFSET;
        painter.text(
            pos,
            Align2::LEFT_CENTER,
            &label.text,
            FontId::proportional(size),
            color,
        );
    }
}

/// Weighted blobs, each drawn as three concentric discs so overlapping
/// blobs accumulate through alpha blending. Weights are normalized to the
/// largest positive weight in the layer.
fn paint_heatmap(
    painter: &Painter,
    projection: &MapProjection,
    points: &[WeightedPoint],
    radius: f32,
) {
    let max = points
        .iter()
        .map(|p| p.weight)
        .filter(|w| w.is_finite())
        .fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return;
    }

    for point in points {
        if !point.weight.is_finite() || point.weight <= 0.0 {
            continue;
        }
        if !projection.is_visible(point.position, CULL_MARGIN_DEG) {
            continue;
        }
        let w = (point.weight / max) as f32;
        let pos = projection.geo_to_screen(point.position);
        for (scale, strength) in [(1.0, 0.4), (0.66, 0.7), (0.33, 1.0)] {
            painter.circle_filled(pos, radius * scale, colors::heatmap::ramp(w * strength));
        }
    }
}

fn paint_markers(painter: &Painter, projection: &MapProjection, markers: &[Marker], radius: f32) {
    let stroke = Stroke::new(1.5, colors::bridge::STROKE);
    for marker in markers {
        if !projection.is_visible(marker.position, CULL_MARGIN_DEG) {
            continue;
        }
        painter.circle(
            projection.geo_to_screen(marker.position),
            radius,
            marker.color,
            stroke,
        );
    }
}

/// Fill assumes a convex ring; the outline is exact for any ring.
fn paint_polygons(painter: &Painter, projection: &MapProjection, polygons: &[PolygonShape]) {
    let stroke = Stroke::new(1.5, colors::aoi::STROKE);
    for polygon in polygons {
        let screen_points: Vec<Pos2> = polygon
            .ring
            .iter()
            .map(|c| projection.geo_to_screen(*c))
            .collect();
        if screen_points.len() < 3 {
            continue;
        }
        painter.add(Shape::convex_polygon(
            screen_points.clone(),
            colors::aoi::fill(),
            Stroke::NONE,
        ));
        painter.add(Shape::closed_line(screen_points, stroke));
    }
}
