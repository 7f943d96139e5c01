//! Central canvas UI: map layers, hover tooltips and agent selection.

use crate::geo::{paint_layers, pick, MapProjection};
use crate::layers::{build_view, tooltip_for, PickInfo};
use crate::selection::AgentSelectionChannel;
use crate::state::AppState;
use crate::ui::colors;
use eframe::egui::{self, PointerButton, Rect, RichText, Sense, Stroke, Vec2};

pub fn render_canvas(ctx: &egui::Context, state: &mut AppState, selection: &AgentSelectionChannel) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let available_size = ui.available_size();

            // Allocate the full available space for the canvas
            let (response, painter) = ui.allocate_painter(available_size, Sense::click_and_drag());

            let rect = response.rect;

            // Draw background
            painter.rect_filled(rect, 0.0, colors::canvas::BACKGROUND);

            let view = build_view(&state.snapshot, &state.view_params(), &state.settings);
            let projection = MapProjection::new(&view.viewport, rect);
            let painter = painter.with_clip_rect(rect);

            paint_layers(&painter, &projection, &view.layers);
            draw_selection_ring(&painter, &projection, state);

            state.viz_state.hovered = response
                .hover_pos()
                .and_then(|pos| pick(&projection, &view.layers, pos));

            let drawn = view.layers.iter().map(|l| l.kind.len()).sum::<usize>();
            draw_overlay_info(ui, &rect, state, drawn);

            handle_canvas_interaction(&response, &projection, &view.layers, state, selection);

            if let Some(tooltip) = state
                .viz_state
                .hovered
                .and_then(|hovered| tooltip_for(&hovered, &state.snapshot))
            {
                response.on_hover_ui_at_pointer(|ui| {
                    ui.label(RichText::new(&tooltip.title).strong());
                    for (label, value) in &tooltip.rows {
                        ui.label(format!("{}: {}", label, value));
                    }
                });
            }
        });
}

fn draw_selection_ring(painter: &egui::Painter, projection: &MapProjection, state: &AppState) {
    let Some(agent) = state
        .selection
        .selected_id()
        .and_then(|id| state.snapshot.find_agent(id))
    else {
        return;
    };
    let pos = projection.geo_to_screen(agent.position());
    let radius = state.settings.icon_size.max(state.settings.point_radius) + 4.0;
    painter.circle_stroke(pos, radius, Stroke::new(2.0, colors::canvas::SELECTION));
}

fn draw_overlay_info(ui: &mut egui::Ui, rect: &Rect, state: &AppState, drawn: usize) {
    let overlay_pos = rect.left_top() + Vec2::new(10.0, 10.0);

    // Create a small overlay area
    let overlay_rect = Rect::from_min_size(overlay_pos, Vec2::new(220.0, 90.0));

    let center = state.viz_state.center;
    let hovered = state
        .viz_state
        .hovered
        .map_or_else(|| "--".to_string(), |h| format!("{} #{}", h.layer.as_str(), h.index));

    ui.scope_builder(egui::UiBuilder::new().max_rect(overlay_rect), |ui| {
        ui.vertical(|ui| {
            for line in [
                format!("Zoom: {:.1}", state.viz_state.zoom),
                format!("Center: {:.4}, {:.4}", center.lng, center.lat),
                format!("Hover: {}", hovered),
                format!("Objects: {}", drawn),
            ] {
                ui.label(
                    RichText::new(line)
                        .monospace()
                        .size(12.0)
                        .color(colors::canvas::OVERLAY_TEXT),
                );
            }
        });
    });
}

fn handle_canvas_interaction(
    response: &egui::Response,
    projection: &MapProjection,
    layers: &[crate::layers::Layer],
    state: &mut AppState,
    selection: &AgentSelectionChannel,
) {
    // Handle dragging for panning
    if response.dragged_by(PointerButton::Primary) {
        state
            .viz_state
            .pan_by(projection.screen_delta_to_geo(response.drag_delta()));
    }

    // Handle scroll for zooming relative to cursor position
    if response.hovered() {
        let scroll_delta = response.ctx.input(|i| i.raw_scroll_delta);
        if scroll_delta.y != 0.0 {
            let anchor = response.hover_pos().map(|pos| projection.screen_to_geo(pos));
            state.viz_state.zoom_by_scroll(scroll_delta.y, anchor);
        }
    }

    // Reset view on double-click
    if response.double_clicked() {
        state.viz_state.reset_view();
        return;
    }

    if response.clicked() {
        let hit = response
            .interact_pointer_pos()
            .and_then(|pos| pick(projection, layers, pos));
        if let Some(hit) = hit {
            if hit.layer.carries_agents() {
                select_agent(hit, state, response.ctx.clone(), selection);
            } else {
                copy_tooltip(hit, state, &response.ctx);
            }
        }
    }

    if response.secondary_clicked() {
        log::debug!(
            "Context menu not available (pointer over {:?})",
            state.viz_state.hovered.map(|h| h.layer.as_str())
        );
    }
}

fn select_agent(
    hit: PickInfo,
    state: &mut AppState,
    ctx: egui::Context,
    selection: &AgentSelectionChannel,
) {
    let Some(agent_id) = state.agent_for_pick(&hit) else {
        return;
    };
    state.selection.request(agent_id);
    selection.select(ctx, state.snapshot.clone(), agent_id);
}

/// Copies the clicked bridge or area summary to the clipboard as HTML.
fn copy_tooltip(hit: PickInfo, state: &mut AppState, ctx: &egui::Context) {
    let Some(tooltip) = tooltip_for(&hit, &state.snapshot) else {
        return;
    };
    ctx.copy_text(tooltip.html());
    state.status_message = format!("Copied {} summary", tooltip.title);
}
