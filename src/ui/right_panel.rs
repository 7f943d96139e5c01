//! Right panel UI: layers, heatmap, view, and bridge metrics.

use crate::state::{AppState, MAX_ZOOM, MIN_ZOOM};
use crate::ui::colors;
use eframe::egui::{self, RichText, ScrollArea};

pub fn render_right_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::SidePanel::right("right_panel")
        .resizable(true)
        .default_width(220.0)
        .min_width(180.0)
        .max_width(350.0)
        .show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Controls");
                ui.separator();

                render_layers_section(ui, state);
                ui.add_space(5.0);

                render_heatmap_section(ui, state);
                ui.add_space(5.0);

                render_view_section(ui, state);
                ui.add_space(5.0);

                render_bridge_section(ui, state);
            });
        });
}

fn render_layers_section(ui: &mut egui::Ui, state: &mut AppState) {
    egui::CollapsingHeader::new(RichText::new("Layers").strong())
        .default_open(true)
        .show(ui, |ui| {
            ui.checkbox(&mut state.layer_state.bridges, "Bridge Status");
            ui.checkbox(&mut state.layer_state.aois, "Areas of Interest");
        });
}

fn render_heatmap_section(ui: &mut egui::Ui, state: &mut AppState) {
    egui::CollapsingHeader::new(RichText::new("Heatmap").strong())
        .default_open(true)
        .show(ui, |ui| {
            if state.status_keys.is_empty() {
                ui.label(
                    RichText::new("No agent status fields")
                        .small()
                        .color(colors::ui::LABEL),
                );
                return;
            }

            let selected = state.heatmap_key.as_deref().unwrap_or("Off").to_string();
            egui::ComboBox::from_id_salt("heatmap_key_selector")
                .selected_text(selected)
                .width(150.0)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut state.heatmap_key, None, "Off");
                    for key in &state.status_keys {
                        ui.selectable_value(
                            &mut state.heatmap_key,
                            Some(key.clone()),
                            key.as_str(),
                        );
                    }
                });
        });
}

fn render_view_section(ui: &mut egui::Ui, state: &mut AppState) {
    egui::CollapsingHeader::new(RichText::new("View").strong())
        .default_open(true)
        .show(ui, |ui| {
            ui.add(egui::Slider::new(&mut state.viz_state.zoom, MIN_ZOOM..=MAX_ZOOM).text("Zoom"));

            let mode = if state.viz_state.zoom >= state.settings.icon_zoom_threshold {
                "icons"
            } else {
                "points"
            };
            ui.label(
                RichText::new(format!("Agents drawn as {}", mode))
                    .small()
                    .color(colors::ui::LABEL),
            );

            ui.separator();
            ui.label(RichText::new("Settings").small());

            let settings = &mut state.settings;
            let mut changed = false;
            changed |= ui
                .add(
                    egui::Slider::new(&mut settings.icon_zoom_threshold, MIN_ZOOM..=MAX_ZOOM)
                        .text("Icon zoom"),
                )
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut settings.point_radius, 1.0..=12.0).text("Point size"))
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut settings.heatmap_radius, 5.0..=80.0).text("Heat radius"),
                )
                .changed();

            if changed {
                settings.save();
            }
        });
}

fn render_bridge_section(ui: &mut egui::Ui, state: &mut AppState) {
    egui::CollapsingHeader::new(RichText::new("Bridge Maintenance").strong())
        .default_open(true)
        .show(ui, |ui| {
            let Some(monitor) = state.bridge_monitor.as_ref() else {
                ui.label(
                    RichText::new("No maintenance monitor for this snapshot")
                        .small()
                        .color(colors::ui::LABEL),
                );
                return;
            };

            let step = state.snapshot.step.unwrap_or(0);
            egui::Grid::new("bridge_metrics")
                .num_columns(2)
                .spacing([8.0, 2.0])
                .show(ui, |ui| {
                    for metric in monitor.metric_tuples(step) {
                        let name = metric.name.trim_start_matches("bridge/");
                        ui.label(RichText::new(name).small().color(colors::ui::LABEL));
                        ui.label(
                            RichText::new(format!("{:.2}", metric.value))
                                .small()
                                .monospace()
                                .color(colors::ui::VALUE),
                        );
                        ui.end_row();
                    }
                });

            ui.add_space(5.0);
            let mut reset = false;
            ui.horizontal(|ui| {
                if ui.button("Copy export JSON").clicked() {
                    match serde_json::to_string_pretty(&monitor.export_state()) {
                        Ok(json) => {
                            ui.ctx().copy_text(json);
                            state.status_message =
                                "Copied bridge export to clipboard".to_string();
                        }
                        Err(e) => {
                            log::error!("Failed to serialize bridge export: {}", e);
                            state.status_message = format!("Export failed: {}", e);
                        }
                    }
                }
                reset = ui.button("Reset").clicked();
            });

            if reset {
                state.reset_bridge_monitor();
                state.status_message = "Bridge monitor reset".to_string();
            }
        });
}
