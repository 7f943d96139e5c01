//! Application state management.
//!
//! This module contains all state structures used throughout the application.
//! State is organized into logical groupings that correspond to different
//! areas of functionality.

mod layer;
mod selection;
mod settings;
mod viz;

pub use layer::LayerState;
pub use selection::SelectionState;
pub use settings::ViewerSettings;
pub use viz::{VizState, MAX_ZOOM, MIN_ZOOM};

use crate::bridge::{load_clean_bridge_records, BridgeMaintenanceMonitor};
use crate::layers::{PickInfo, ViewParams};
use crate::model::sample::{demo_replay, DemoReplay};
use crate::model::ReplaySnapshot;
use std::path::Path;
use std::sync::Arc;

/// Root application state containing all sub-states.
pub struct AppState {
    /// Snapshot currently on the map. Shared with selection workers.
    pub snapshot: Arc<ReplaySnapshot>,

    /// Display name of the snapshot source
    pub snapshot_name: String,

    /// Status keys available for the heatmap, sorted
    pub status_keys: Vec<String>,

    /// Status key weighting the heatmap, if any
    pub heatmap_key: Option<String>,

    /// Map camera and hover
    pub viz_state: VizState,

    /// Layer visibility toggles
    pub layer_state: LayerState,

    /// Clicked agent
    pub selection: SelectionState,

    /// Persisted viewer settings
    pub settings: ViewerSettings,

    /// Monitor behind the bridge overlays, when the snapshot came from one
    pub bridge_monitor: Option<BridgeMaintenanceMonitor>,

    /// Application status message displayed in top bar
    pub status_message: String,

    /// Whether a file pick operation is in progress
    pub loading: bool,
}

impl AppState {
    /// Creates state showing the demo replay.
    pub fn new(settings: ViewerSettings) -> Self {
        let mut state = Self {
            snapshot: Arc::new(ReplaySnapshot::default()),
            snapshot_name: String::new(),
            status_keys: Vec::new(),
            heatmap_key: None,
            viz_state: VizState::new(crate::model::DEFAULT_CENTER, settings.initial_zoom),
            layer_state: LayerState::default(),
            selection: SelectionState::default(),
            settings,
            bridge_monitor: None,
            status_message: "Ready".to_string(),
            loading: false,
        };
        state.load_demo();
        state
    }

    /// Replaces the snapshot and resets view, hover and selection.
    pub fn set_snapshot(
        &mut self,
        snapshot: ReplaySnapshot,
        name: impl Into<String>,
        monitor: Option<BridgeMaintenanceMonitor>,
    ) {
        let center = snapshot.center_or_centroid();
        self.status_keys = snapshot.status_keys();
        self.heatmap_key = snapshot
            .heatmap_status_key
            .clone()
            .filter(|k| self.status_keys.contains(k));
        self.snapshot_name = name.into();
        self.snapshot = Arc::new(snapshot);
        self.bridge_monitor = monitor;

        self.viz_state = VizState::new(center, self.settings.initial_zoom);
        self.selection.clear();

        log::info!(
            "Showing snapshot {:?}: {} agents, {} bridges, {} areas",
            self.snapshot_name,
            self.snapshot.agents.len(),
            self.snapshot.bridges.len(),
            self.snapshot.aois.len()
        );
    }

    /// Loads the generated demo replay, using the configured bridge
    /// inventory when one is available.
    pub fn load_demo(&mut self) {
        let inventory = self
            .settings
            .inventory_dir
            .as_deref()
            .map(|dir| load_clean_bridge_records(Path::new(dir)))
            .unwrap_or_default();
        let today = chrono::Local::now().date_naive();

        let DemoReplay { snapshot, monitor } = demo_replay(inventory, today);
        self.set_snapshot(snapshot, "Demo replay", Some(monitor));
        self.status_message = "Loaded demo replay".to_string();
    }

    /// Clears the maintenance monitor and the bridge overlays it produced.
    /// Agents, view and selection are kept.
    pub fn reset_bridge_monitor(&mut self) {
        let Some(monitor) = self.bridge_monitor.as_mut() else {
            return;
        };
        monitor.reset();

        let mut snapshot = (*self.snapshot).clone();
        snapshot.bridges = monitor.overlays().to_vec();
        self.snapshot = Arc::new(snapshot);
        self.viz_state.hovered = None;
        log::info!("Bridge maintenance monitor reset");
    }

    /// Agent id behind a pick, if the picked layer carries agents.
    pub fn agent_for_pick(&self, pick: &PickInfo) -> Option<u64> {
        if !pick.layer.carries_agents() {
            return None;
        }
        self.snapshot.agents.get(pick.index).map(|a| a.id)
    }

    /// View inputs for this frame.
    pub fn view_params(&self) -> ViewParams<'_> {
        ViewParams {
            zoom: self.viz_state.zoom,
            center: self.viz_state.center,
            heatmap_key: self.heatmap_key.as_deref(),
            show_bridges: self.layer_state.bridges,
            show_aois: self.layer_state.aois,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::LayerId;
    use crate::model::MapCenter;

    fn snapshot(json: &str) -> ReplaySnapshot {
        ReplaySnapshot::from_json(json).unwrap()
    }

    #[test]
    fn test_new_shows_demo() {
        let state = AppState::new(ViewerSettings::default());
        assert_eq!(state.snapshot_name, "Demo replay");
        assert!(!state.snapshot.agents.is_empty());
        assert!(state.bridge_monitor.is_some());
        assert_eq!(state.viz_state.zoom, ViewerSettings::default().initial_zoom);
    }

    #[test]
    fn test_set_snapshot_resets_view_and_selection() {
        let mut state = AppState::new(ViewerSettings::default());
        state.selection.request(1);
        state.viz_state.zoom = 15.0;

        state.set_snapshot(
            snapshot(
                r#"{
                    "agents": [ { "id": 1, "lng": 2.0, "lat": 4.0, "status": { "mood": 1 } } ],
                    "heatmap_status_key": "mood"
                }"#,
            ),
            "run.json",
            None,
        );

        assert_eq!(state.snapshot_name, "run.json");
        assert_eq!(state.selection.requested, None);
        assert_eq!(state.viz_state.center, MapCenter { lng: 2.0, lat: 4.0 });
        assert_eq!(state.viz_state.zoom, 11.0);
        assert_eq!(state.heatmap_key.as_deref(), Some("mood"));
        assert!(state.bridge_monitor.is_none());
    }

    #[test]
    fn test_unknown_heatmap_key_is_dropped() {
        let mut state = AppState::new(ViewerSettings::default());
        state.set_snapshot(
            snapshot(r#"{ "agents": [], "heatmap_status_key": "mood" }"#),
            "empty.json",
            None,
        );
        assert_eq!(state.heatmap_key, None);
    }

    #[test]
    fn test_reset_bridge_monitor_clears_overlays() {
        let mut state = AppState::new(ViewerSettings::default());
        assert!(!state.snapshot.bridges.is_empty());
        let agents = state.snapshot.agents.len();

        state.reset_bridge_monitor();

        assert!(state.snapshot.bridges.is_empty());
        assert_eq!(state.snapshot.agents.len(), agents);
        let metrics = state.bridge_monitor.as_ref().unwrap().metric_tuples(0);
        assert!(metrics.iter().all(|m| m.value == 0.0));
    }

    #[test]
    fn test_agent_for_pick_only_resolves_agent_layers() {
        let mut state = AppState::new(ViewerSettings::default());
        state.set_snapshot(
            snapshot(
                r#"{
                    "agents": [
                        { "id": 10, "lng": 0.0, "lat": 0.0 },
                        { "id": 11, "lng": 0.1, "lat": 0.1 }
                    ]
                }"#,
            ),
            "two.json",
            None,
        );

        for layer in [
            LayerId::AgentPoints,
            LayerId::AgentIcons,
            LayerId::AgentLabels,
        ] {
            assert_eq!(state.agent_for_pick(&PickInfo { layer, index: 1 }), Some(11));
        }

        for layer in [
            LayerId::BridgeStatus,
            LayerId::BridgeLabels,
            LayerId::Aoi,
            LayerId::Heatmap,
        ] {
            assert_eq!(state.agent_for_pick(&PickInfo { layer, index: 0 }), None);
        }

        let out_of_range = PickInfo {
            layer: LayerId::AgentIcons,
            index: 2,
        };
        assert_eq!(state.agent_for_pick(&out_of_range), None);
    }

    #[test]
    fn test_view_params_follow_toggles() {
        let mut state = AppState::new(ViewerSettings::default());
        state.layer_state.aois = true;
        state.heatmap_key = Some("health".to_string());
        let params = state.view_params();
        assert!(params.show_aois);
        assert!(params.show_bridges);
        assert_eq!(params.heatmap_key, Some("health"));
    }
}
