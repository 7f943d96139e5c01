//! Hover tooltip content.

use super::{LayerId, PickInfo};
use crate::model::{AreaOfInterest, BridgeOverlay, ReplaySnapshot};

/// Tooltip content: a bold title followed by labelled rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub title: String,
    pub rows: Vec<(&'static str, String)>,
}

impl Tooltip {
    /// HTML block for web hosts and the clipboard. All values are escaped.
    pub fn html(&self) -> String {
        let mut html = format!("<div class=\"map-tooltip\"><b>{}</b>", escape_html(&self.title));
        for (label, value) in &self.rows {
            html.push_str(&format!("<br/>{}: {}", label, escape_html(value)));
        }
        html.push_str("</div>");
        html
    }
}

/// Tooltip for the hovered object, if its layer has one.
///
/// Only bridge and area-of-interest layers carry tooltips; agent and
/// heatmap layers (and stale indices) yield `None`.
pub fn tooltip_for(pick: &PickInfo, snapshot: &ReplaySnapshot) -> Option<Tooltip> {
    match pick.layer {
        layer if layer.carries_bridges() => snapshot.bridges.get(pick.index).map(bridge_tooltip),
        LayerId::Aoi => snapshot.aois.get(pick.index).map(aoi_tooltip),
        _ => None,
    }
}

fn bridge_tooltip(overlay: &BridgeOverlay) -> Tooltip {
    let status = match overlay.work_order_status.as_deref() {
        Some(work_order) => format!("{} ({})", overlay.status, work_order),
        None => overlay.status.clone(),
    };

    let mut rows = vec![
        ("Status", status),
        (
            "Priority",
            overlay.priority.clone().unwrap_or_else(|| "n/a".to_string()),
        ),
    ];

    match (overlay.days_overdue, overlay.due_date.as_deref()) {
        (Some(days), _) if days > 0 => rows.push(("Overdue", format!("{} days", days))),
        (_, Some(due)) => rows.push(("Due", due.to_string())),
        _ => {}
    }

    if let Some(action) = overlay.action.as_deref().filter(|a| !a.is_empty()) {
        rows.push(("Action", action.to_string()));
    }

    Tooltip {
        title: overlay.display_name().to_string(),
        rows,
    }
}

fn aoi_tooltip(aoi: &AreaOfInterest) -> Tooltip {
    Tooltip {
        title: aoi
            .name
            .clone()
            .unwrap_or_else(|| "Area of interest".to_string()),
        rows: vec![
            ("ID", aoi.id.to_string()),
            ("Land use", land_use_label(aoi.land_use).to_string()),
        ],
    }
}

/// First-level land-use classes keyed by their two-digit code.
const LAND_USE_LABELS: &[(i64, &str)] = &[
    (1, "Cropland"),
    (2, "Garden"),
    (3, "Forest"),
    (4, "Grassland"),
    (5, "Commercial"),
    (6, "Industrial & mining"),
    (7, "Residential"),
    (8, "Public services"),
    (9, "Special use"),
    (10, "Transportation"),
    (11, "Water"),
    (12, "Other"),
];

pub fn land_use_label(code: Option<i64>) -> &'static str {
    code.and_then(|c| {
        LAND_USE_LABELS
            .iter()
            .find(|(k, _)| *k == c)
            .map(|(_, label)| *label)
    })
    .unwrap_or("Unknown")
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
