//! Bridge maintenance tooling.
//!
//! - `records`: inventory loading, condition filtering, inspection
//!   scheduling, and repair proposals
//! - `monitor`: event log that turns maintenance workflow steps into map
//!   overlays and evaluation metrics

pub mod monitor;
pub mod records;

pub use monitor::{BridgeMaintenanceMonitor, WorkOrderTask};
pub use records::{
    filter_bridges_by_condition, load_clean_bridge_records, propose_repair_actions,
    schedule_overdue_inspections, BridgeRecord,
};
