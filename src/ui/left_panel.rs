//! Left panel UI: snapshot loading, agent list and inspector.

use crate::file_ops::FilePickerChannel;
use crate::model::Agent;
use crate::selection::AgentSelectionChannel;
use crate::state::AppState;
use crate::ui::colors;
use eframe::egui::{self, RichText, ScrollArea};
use serde_json::Value;

pub fn render_left_panel(
    ctx: &egui::Context,
    state: &mut AppState,
    file_picker: &FilePickerChannel,
    selection: &AgentSelectionChannel,
) {
    egui::SidePanel::left("left_panel")
        .resizable(true)
        .default_width(250.0)
        .min_width(200.0)
        .max_width(400.0)
        .show(ctx, |ui| {
            ui.heading("Snapshot");
            ui.separator();

            let is_loading = state.loading;

            ui.add_enabled_ui(!is_loading, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("Open snapshot...").clicked() {
                        state.loading = true;
                        state.status_message = "Opening file dialog...".to_string();
                        file_picker.pick_file(ctx.clone());
                    }
                    if ui.button("Load demo").clicked() {
                        state.load_demo();
                    }
                });
            });

            if is_loading {
                ui.add_space(5.0);
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Selecting file...");
                });
            }

            ui.add_space(10.0);

            ui.group(|ui| {
                ui.label(RichText::new(&state.snapshot_name).strong().monospace());
                ui.label(
                    RichText::new(format!(
                        "{} agents, {} bridges, {} areas",
                        state.snapshot.agents.len(),
                        state.snapshot.bridges.len(),
                        state.snapshot.aois.len()
                    ))
                    .small()
                    .color(colors::ui::LABEL),
                );
            });

            ui.add_space(10.0);
            render_inspector(ui, state);

            ui.add_space(10.0);
            render_agent_list(ui, state, selection);
        });
}

fn render_agent_list(ui: &mut egui::Ui, state: &mut AppState, selection: &AgentSelectionChannel) {
    ui.label(RichText::new("Agents").strong());
    ui.separator();

    let selected = state.selection.requested;
    let mut clicked = None;

    ScrollArea::vertical()
        .id_salt("agent_list")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for agent in &state.snapshot.agents {
                let label = format!("#{} {}", agent.id, display_name(agent));
                if ui
                    .selectable_label(selected == Some(agent.id), label)
                    .clicked()
                {
                    clicked = Some(agent.id);
                }
            }
        });

    if let Some(agent_id) = clicked {
        state.selection.request(agent_id);
        selection.select(ui.ctx().clone(), state.snapshot.clone(), agent_id);
    }
}

fn render_inspector(ui: &mut egui::Ui, state: &AppState) {
    let Some(agent) = state.selection.agent.as_ref() else {
        ui.label(
            RichText::new("Click an agent to inspect it")
                .small()
                .color(colors::ui::LABEL),
        );
        return;
    };

    ui.group(|ui| {
        ui.label(RichText::new(display_name(agent)).strong().color(colors::ui::ACTIVE));
        egui::Grid::new("agent_inspector")
            .num_columns(2)
            .spacing([8.0, 2.0])
            .show(ui, |ui| {
                row(ui, "ID", agent.id.to_string());
                row(ui, "Position", format!("{:.5}, {:.5}", agent.lng, agent.lat));

                match agent.profile.as_ref().and_then(Value::as_object) {
                    Some(profile) => {
                        for (key, value) in profile {
                            row(ui, key, value_text(value));
                        }
                    }
                    None => row(ui, "Profile", "n/a".to_string()),
                }

                for (key, value) in &agent.status {
                    row(ui, key, value_text(value));
                }
            });
    });
}

fn row(ui: &mut egui::Ui, label: &str, value: String) {
    ui.label(RichText::new(label).small().color(colors::ui::LABEL));
    ui.label(RichText::new(value).small().monospace().color(colors::ui::VALUE));
    ui.end_row();
}

fn display_name(agent: &Agent) -> &str {
    if agent.name.trim().is_empty() {
        "(unnamed)"
    } else {
        &agent.name
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => format!("{:.2}", f),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}
