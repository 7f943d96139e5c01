//! Viewer settings.
//!
//! Settings are persisted as JSON: in localStorage on the web, and in the
//! user's config directory on native builds.

use serde::{Deserialize, Serialize};

/// Map styling and behavior knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// Zoom level at and above which agents switch from points to icons.
    pub icon_zoom_threshold: f32,
    /// Zoom level used when a snapshot is loaded.
    pub initial_zoom: f32,
    /// Base URL for agent icon assets.
    pub icon_base_url: String,
    /// Radius of uniform agent points in pixels.
    pub point_radius: f32,
    /// Icon marker size in pixels.
    pub icon_size: f32,
    /// Agent name label size in points.
    pub label_size: f32,
    /// Heatmap blob radius in pixels.
    pub heatmap_radius: f32,
    /// Bridge marker radius in pixels.
    pub bridge_marker_radius: f32,
    /// Directory holding cleaned bridge inventory files for the demo replay.
    pub inventory_dir: Option<String>,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            icon_zoom_threshold: 10.0,
            initial_zoom: 11.0,
            icon_base_url: "/icons".to_string(),
            point_radius: 4.0,
            icon_size: 10.0,
            label_size: 11.0,
            heatmap_radius: 28.0,
            bridge_marker_radius: 7.0,
            inventory_dir: None,
        }
    }
}

impl ViewerSettings {
    /// localStorage key for persisting settings.
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "agent_replay_viewer_settings";

    /// Parses settings JSON; absent fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from localStorage.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let window = match web_sys::window() {
            Some(w) => w,
            None => return Self::default(),
        };

        let storage = match window.local_storage() {
            Ok(Some(s)) => s,
            _ => return Self::default(),
        };

        let json = match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(s)) => s,
            _ => return Self::default(),
        };

        Self::parse_or_default(&json)
    }

    /// Load settings from the user's config directory.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => Self::parse_or_default(&json),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                log::warn!("Failed to read viewer settings {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    fn parse_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded viewer settings");
                settings
            }
            Err(e) => {
                log::warn!("Failed to parse viewer settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings to localStorage.
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let window = match web_sys::window() {
            Some(w) => w,
            None => return,
        };

        let storage = match window.local_storage() {
            Ok(Some(s)) => s,
            _ => return,
        };

        let json = match serde_json::to_string(self) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("Failed to serialize viewer settings: {}", e);
                return;
            }
        };

        if let Err(e) = storage.set_item(Self::STORAGE_KEY, &json) {
            log::warn!("Failed to save viewer settings: {:?}", e);
        } else {
            log::info!("Saved viewer settings to localStorage");
        }
    }

    /// Save settings to the user's config directory.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let Some(path) = Self::settings_path() else {
            log::warn!("No config directory available; settings not saved");
            return;
        };

        let json = match serde_json::to_string_pretty(self) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("Failed to serialize viewer settings: {}", e);
                return;
            }
        };

        let result = path
            .parent()
            .map_or(Ok(()), std::fs::create_dir_all)
            .and_then(|_| std::fs::write(&path, json));
        match result {
            Ok(()) => log::info!("Saved viewer settings to {:?}", path),
            Err(e) => log::warn!("Failed to save viewer settings {:?}: {}", path, e),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn settings_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|dir| dir.join("agent-replay-workbench").join("settings.json"))
    }
}
