//! Bridge status to marker color.

use crate::model::BridgeOverlay;
use crate::ui::colors;
use eframe::egui::Color32;

/// An in-progress work order outranks priority; otherwise critical priority
/// gets its own color.
pub fn bridge_color(overlay: &BridgeOverlay) -> Color32 {
    let in_progress = overlay
        .work_order_status
        .as_deref()
        .is_some_and(|s| s.to_lowercase().contains("progress"));
    if in_progress {
        return colors::bridge::IN_PROGRESS;
    }

    let critical = overlay
        .priority
        .as_deref()
        .is_some_and(|p| p.eq_ignore_ascii_case("critical"));
    if critical {
        colors::bridge::CRITICAL
    } else {
        colors::bridge::DEFAULT
    }
}
