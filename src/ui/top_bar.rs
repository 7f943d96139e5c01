//! Top bar UI: app title, replay step, and status.

use crate::state::AppState;
use crate::ui::colors;
use eframe::egui::{self, Color32, RichText};

pub fn render_top_bar(ctx: &egui::Context, state: &AppState) {
    egui::TopBottomPanel::top("top_bar")
        .exact_height(36.0)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                // App title
                ui.label(
                    RichText::new("Agent Replay Workbench")
                        .strong()
                        .size(16.0)
                        .color(Color32::WHITE),
                );

                ui.separator();

                ui.label(RichText::new("Step:").size(12.0).color(colors::ui::LABEL));
                let step = state
                    .snapshot
                    .step
                    .map_or_else(|| "--".to_string(), |s| s.to_string());
                ui.label(
                    RichText::new(step)
                        .monospace()
                        .size(12.0)
                        .color(colors::ui::VALUE),
                );

                ui.separator();

                // Status text
                ui.label(
                    RichText::new(&state.status_message)
                        .size(13.0)
                        .color(Color32::GRAY),
                );
            });
        });
}
