//! Replay snapshot loading.

use super::{Agent, AreaOfInterest, BridgeOverlay};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fallback map center when a snapshot has neither a center nor agents.
pub const DEFAULT_CENTER: MapCenter = MapCenter {
    lng: 116.391,
    lat: 39.907,
};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to parse replay snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read replay snapshot from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Geographic map center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapCenter {
    #[serde(alias = "longitude", alias = "lon")]
    pub lng: f64,
    #[serde(alias = "latitude")]
    pub lat: f64,
}

/// Everything the map view reads from a single replay step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplaySnapshot {
    #[serde(default)]
    pub step: Option<i64>,
    #[serde(default)]
    pub agents: Vec<Agent>,
    /// Bridge status entries. A monitor export names these `work_orders`.
    #[serde(default, alias = "work_orders")]
    pub bridges: Vec<BridgeOverlay>,
    #[serde(default)]
    pub aois: Vec<AreaOfInterest>,
    #[serde(default)]
    pub center: Option<MapCenter>,
    #[serde(default)]
    pub heatmap_status_key: Option<String>,
}

impl ReplaySnapshot {
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, SnapshotError> {
        let json = std::fs::read_to_string(path).map_err(|source| SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn find_agent(&self, id: u64) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Sorted union of status keys across all agents.
    pub fn status_keys(&self) -> Vec<String> {
        self.agents
            .iter()
            .flat_map(|a| a.status.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Explicit center if present, otherwise the mean agent position.
    pub fn center_or_centroid(&self) -> MapCenter {
        if let Some(center) = self.center {
            return center;
        }
        if self.agents.is_empty() {
            return DEFAULT_CENTER;
        }

        let n = self.agents.len() as f64;
        let (sum_lng, sum_lat) = self
            .agents
            .iter()
            .fold((0.0, 0.0), |(x, y), a| (x + a.lng, y + a.lat));
        MapCenter {
            lng: sum_lng / n,
            lat: sum_lat / n,
        }
    }
}
