//! Replay data model.
//!
//! Read-only snapshot types consumed by the map view: agents, bridge
//! overlays, and areas of interest. The snapshot is produced elsewhere
//! (a simulation run or a monitor export) and only ever read here.

mod agent;
mod overlay;
pub mod sample;
mod snapshot;

pub use agent::Agent;
pub use overlay::{AreaOfInterest, BridgeOverlay, LastUpdate};
pub use snapshot::{MapCenter, ReplaySnapshot, SnapshotError, DEFAULT_CENTER};
