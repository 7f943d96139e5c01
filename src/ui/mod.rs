//! UI modules for the Agent Replay Workbench application.
//!
//! The UI is split into distinct panels:
//! - Top bar: Title, replay step, and status
//! - Left panel: Snapshot loading, agent list and inspector
//! - Central canvas: Map layers, hover tooltips and selection
//! - Right panel: Layer toggles, heatmap key, and bridge metrics

mod canvas;
pub mod colors;
mod left_panel;
mod right_panel;
mod top_bar;

pub use canvas::render_canvas;
pub use left_panel::render_left_panel;
pub use right_panel::render_right_panel;
pub use top_bar::render_top_bar;
