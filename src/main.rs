#![warn(clippy::all)]

//! Agent Replay Workbench - a map-based replay viewer for simulated agents.
//!
//! Loads replay snapshots (agents, bridge maintenance overlays, areas of
//! interest) and renders them as zoom-dependent map layers with hover
//! tooltips and click-to-inspect agent selection.

mod bridge;
mod file_ops;
mod geo;
mod layers;
mod model;
mod selection;
mod state;
mod ui;

use eframe::egui;
use file_ops::{FilePickerChannel, PickOutcome};
use selection::AgentSelectionChannel;
use state::{AppState, ViewerSettings};

// Native entry point
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions::default();

    eframe::run_native(
        "Agent Replay Workbench",
        native_options,
        Box::new(|cc| Ok(Box::new(WorkbenchApp::new(cc)))),
    )
}

// WASM entry point - main is not called on wasm32
#[cfg(target_arch = "wasm32")]
fn main() {}

/// Entry point for the WASM application.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn start() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` messages to `console.log`:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document available");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("app_canvas")
            .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        else {
            log::error!("Failed to find app_canvas");
            return;
        };

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(WorkbenchApp::new(cc)))),
            )
            .await;

        // Remove the loading text once the app has loaded:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p>The app has crashed. See the developer console for details.</p>",
                    );
                    log::error!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}

/// Main application state and logic.
pub struct WorkbenchApp {
    /// Application state containing all sub-states
    state: AppState,

    /// Channel for async file picker operations
    file_picker: FilePickerChannel,

    /// Channel for async select-agent notifications
    selection: AgentSelectionChannel,
}

impl WorkbenchApp {
    /// Creates a new WorkbenchApp instance.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings = ViewerSettings::load();
        let mut state = AppState::new(settings);

        // A snapshot path on the command line replaces the demo replay
        #[cfg(not(target_arch = "wasm32"))]
        if let Some(path) = std::env::args_os().nth(1).map(std::path::PathBuf::from) {
            match model::ReplaySnapshot::from_path(&path) {
                Ok(snapshot) => {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    state.set_snapshot(snapshot, name.clone(), None);
                    state.status_message = format!("Loaded {}", name);
                }
                Err(e) => {
                    log::error!("{}", e);
                    state.status_message = e.to_string();
                }
            }
        }

        Self {
            state,
            file_picker: FilePickerChannel::new(),
            selection: AgentSelectionChannel::new(),
        }
    }

    fn poll_channels(&mut self) {
        // Check for completed file pick operations
        if let Some(result) = self.file_picker.try_recv() {
            self.state.loading = false;
            match result {
                PickOutcome::Picked(file_result) => match file_result.parse_snapshot() {
                    Ok(snapshot) => {
                        let name = file_result.file_name.clone();
                        self.state.set_snapshot(snapshot, name.clone(), None);
                        self.state.status_message = format!("Loaded {}", name);
                    }
                    Err(e) => {
                        log::error!("Failed to load {}: {}", file_result.file_name, e);
                        self.state.status_message =
                            format!("Failed to load {}: {}", file_result.file_name, e);
                    }
                },
                PickOutcome::Cancelled => {
                    self.state.status_message = "File selection cancelled".to_string();
                }
            }
        }

        // Apply completed select-agent notifications
        while let Some(result) = self.selection.try_recv() {
            if self.state.selection.apply(result) {
                if let Some(agent) = self.state.selection.agent.as_ref() {
                    log::info!("Selected agent {} ({})", agent.id, agent.name);
                }
            }
        }
    }
}

impl eframe::App for WorkbenchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_channels();

        // Render UI panels (order matters for layout)
        ui::render_top_bar(ctx, &self.state);
        ui::render_left_panel(ctx, &mut self.state, &self.file_picker, &self.selection);
        ui::render_right_panel(ctx, &mut self.state);
        ui::render_canvas(ctx, &mut self.state, &self.selection);
    }
}
