//! Bridge maintenance monitor.
//!
//! Folds maintenance workflow events (backlog snapshots, inspection triage,
//! dispatched interventions, crew progress) into per-bridge status entries
//! that feed the map overlays, plus a handful of evaluation metrics.

use super::records::{
    extract_bridge_id, extract_coords, extract_name, extract_risk, first_present, parse_date,
    value_to_string, BacklogEntry, BridgeRecord, RepairProposal,
};
use crate::model::{BridgeOverlay, LastUpdate};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

pub const STATUS_INSPECTION_DUE: &str = "inspection_due";
pub const STATUS_SCHEDULED: &str = "scheduled";
pub const STATUS_TRIAGED: &str = "triaged";
pub const STATUS_WORK_ORDER: &str = "work_order";
pub const WORK_ORDER_DISPATCHED: &str = "dispatched";
pub const WORK_ORDER_IN_PROGRESS: &str = "in_progress";

/// One row of the inspection log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectionLog {
    pub bridge_id: String,
    pub day: i64,
    pub t: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_overdue: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    pub risk: Option<String>,
}

/// One dispatched intervention.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterventionLog {
    pub bridge_id: String,
    pub priority: Option<String>,
    pub risk: Option<String>,
    pub action: Option<String>,
    pub assigned_to: Option<u64>,
    /// Steps between the bridge entering the backlog and this dispatch.
    pub response_steps: Option<i64>,
    pub day: i64,
    pub t: f64,
}

/// A crew task acknowledging a work order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkOrderTask {
    pub bridge: BridgeRecord,
    pub priority: Option<String>,
    pub action: Option<String>,
    pub risk: Option<String>,
}

/// A named metric value at a simulation step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTuple {
    pub name: &'static str,
    pub value: f64,
    pub step: i64,
}

/// JSON-serializable monitor state. Loads directly as a replay snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct MonitorExport {
    pub inspections: Vec<InspectionLog>,
    pub interventions: Vec<InterventionLog>,
    pub work_orders: Vec<BridgeOverlay>,
}

#[derive(Debug, Default, Clone)]
pub struct BridgeMaintenanceMonitor {
    backlog_history: Vec<(i64, usize)>,
    pending_backlog_step: HashMap<String, i64>,
    response_times: Vec<i64>,
    mitigated_bridges: HashSet<String>,
    interventions: Vec<InterventionLog>,
    inspections: Vec<InspectionLog>,
    statuses: Vec<BridgeOverlay>,
    status_index: HashMap<String, usize>,
}

impl BridgeMaintenanceMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all recorded events and statuses.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Status entry for `bridge_id`, created on first sight. Name and
    /// coordinates from `bridge` only fill gaps in an existing entry.
    fn status_entry(&mut self, bridge_id: &str, bridge: &BridgeRecord) -> &mut BridgeOverlay {
        let idx = match self.status_index.get(bridge_id) {
            Some(&idx) => idx,
            None => {
                self.statuses.push(BridgeOverlay::new(bridge_id));
                let idx = self.statuses.len() - 1;
                self.status_index.insert(bridge_id.to_string(), idx);
                idx
            }
        };

        let (lng, lat) = extract_coords(bridge);
        let status = &mut self.statuses[idx];
        if status.name.is_none() {
            status.name = extract_name(bridge);
        }
        status.lng = status.lng.or(lng);
        status.lat = status.lat.or(lat);
        status
    }

    /// Logs a backlog snapshot produced by the inspection scheduler.
    pub fn record_backlog(&mut self, backlog: &[BacklogEntry], at: LastUpdate) {
        self.backlog_history.push((at.step, backlog.len()));

        for entry in backlog {
            let bridge_id = extract_bridge_id(&entry.bridge);
            let due_date = entry.due_date.format("%Y-%m-%d").to_string();
            let risk = extract_risk(&entry.bridge).map(|r| r.to_lowercase());

            self.inspections.push(InspectionLog {
                bridge_id: bridge_id.clone(),
                day: at.day,
                t: at.t,
                due_date: Some(due_date.clone()),
                days_overdue: Some(entry.days_overdue),
                priority: None,
                risk: risk.clone(),
            });
            self.pending_backlog_step.insert(bridge_id.clone(), at.step);

            let status = self.status_entry(&bridge_id, &entry.bridge);
            status.priority = Some(
                if entry.days_overdue > 0 {
                    "critical"
                } else {
                    STATUS_SCHEDULED
                }
                .to_string(),
            );
            status.risk = risk.or(status.risk.take());
            status.status = if entry.days_overdue >= 0 {
                STATUS_INSPECTION_DUE
            } else {
                STATUS_SCHEDULED
            }
            .to_string();
            status.due_date = Some(due_date);
            status.days_overdue = Some(entry.days_overdue);
            status.last_update = Some(at);
        }
    }

    /// Logs triage outcomes from inspection reasoning.
    pub fn record_inspection_findings(&mut self, proposals: &[RepairProposal], at: LastUpdate) {
        for proposal in proposals {
            let bridge_id = extract_bridge_id(&proposal.bridge);
            let priority = proposal.priority.as_str().to_string();

            self.inspections.push(InspectionLog {
                bridge_id: bridge_id.clone(),
                day: at.day,
                t: at.t,
                due_date: None,
                days_overdue: None,
                priority: Some(priority.clone()),
                risk: Some(proposal.risk.clone()),
            });

            let status = self.status_entry(&bridge_id, &proposal.bridge);
            status.priority = Some(priority);
            status.risk = Some(proposal.risk.clone());
            status.status = STATUS_TRIAGED.to_string();
            status.last_update = Some(at);
        }
    }

    /// Logs a work order dispatch and the response time since the bridge
    /// entered the backlog.
    pub fn record_intervention(
        &mut self,
        bridge: &BridgeRecord,
        priority: Option<&str>,
        action: Option<&str>,
        assigned_to: Option<u64>,
        at: LastUpdate,
    ) {
        let bridge_id = extract_bridge_id(bridge);
        let response_steps = self
            .pending_backlog_step
            .remove(&bridge_id)
            .map(|queued_at| (at.step - queued_at).max(0));
        if let Some(steps) = response_steps {
            self.response_times.push(steps);
        }

        let risk = extract_risk(bridge);
        let raw_due = first_present(bridge, &["next_inspection_due", "next_inspection_date"]);
        let due_date = parse_date(raw_due)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .or_else(|| value_to_string(raw_due));

        self.interventions.push(InterventionLog {
            bridge_id: bridge_id.clone(),
            priority: priority.map(str::to_string),
            risk: risk.clone(),
            action: action.map(str::to_string),
            assigned_to,
            response_steps,
            day: at.day,
            t: at.t,
        });

        let status = self.status_entry(&bridge_id, bridge);
        if let Some(priority) = priority {
            status.priority = Some(priority.to_string());
        }
        status.risk = risk.or(status.risk.take());
        status.status = STATUS_WORK_ORDER.to_string();
        status.work_order_status = Some(WORK_ORDER_DISPATCHED.to_string());
        if let Some(action) = action {
            status.action = Some(action.to_string());
        }
        status.due_date = status.due_date.take().or(due_date);
        status.last_update = Some(at);
    }

    /// Tracks work orders acknowledged or in progress by field crews.
    pub fn record_work_order_status(&mut self, task: &WorkOrderTask, at: LastUpdate) {
        let bridge_id = extract_bridge_id(&task.bridge);

        let status = self.status_entry(&bridge_id, &task.bridge);
        status.status = STATUS_WORK_ORDER.to_string();
        status.work_order_status = Some(WORK_ORDER_IN_PROGRESS.to_string());
        if let Some(action) = &task.action {
            status.action = Some(action.clone());
        }
        if let Some(priority) = &task.priority {
            status.priority = Some(priority.clone());
        }
        if status.risk.is_none() {
            status.risk = task.risk.clone();
        }
        status.last_update = Some(at);

        let critical = task
            .priority
            .as_deref()
            .is_some_and(|p| p.eq_ignore_ascii_case("critical"));
        if critical {
            self.mitigated_bridges.insert(bridge_id);
        }
    }

    /// Evaluation metrics as of `current_step`.
    pub fn metric_tuples(&self, current_step: i64) -> Vec<MetricTuple> {
        let mut metrics = Vec::new();
        let metric = |name, value| MetricTuple {
            name,
            value,
            step: current_step,
        };

        if let (Some(first), Some(last)) =
            (self.backlog_history.first(), self.backlog_history.last())
        {
            metrics.push(metric("bridge/current_backlog", last.1 as f64));
            metrics.push(metric(
                "bridge/backlog_reduction",
                first.1 as f64 - last.1 as f64,
            ));
        }

        if !self.response_times.is_empty() {
            let total: i64 = self.response_times.iter().sum();
            metrics.push(metric(
                "bridge/avg_response_steps",
                total as f64 / self.response_times.len() as f64,
            ));
        }

        let critical_open = self
            .statuses
            .iter()
            .filter(|s| {
                s.priority
                    .as_deref()
                    .is_some_and(|p| p.eq_ignore_ascii_case("critical"))
                    && matches!(
                        s.status.as_str(),
                        STATUS_INSPECTION_DUE | STATUS_TRIAGED | STATUS_WORK_ORDER
                    )
            })
            .count();
        metrics.push(metric(
            "bridge/critical_open_work_orders",
            critical_open as f64,
        ));
        metrics.push(metric(
            "bridge/risk_mitigated",
            self.mitigated_bridges.len() as f64,
        ));

        metrics
    }

    /// Current per-bridge status entries in first-seen order.
    pub fn overlays(&self) -> &[BridgeOverlay] {
        &self.statuses
    }

    pub fn export_state(&self) -> MonitorExport {
        MonitorExport {
            inspections: self.inspections.clone(),
            interventions: self.interventions.clone(),
            work_orders: self.statuses.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::records::RepairPriority;
    use chrono::NaiveDate;
    use serde_json::{json, Value};

    fn record(value: Value) -> BridgeRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    fn at(step: i64) -> LastUpdate {
        LastUpdate {
            day: 0,
            t: step as f64 * 60.0,
            step,
        }
    }

    fn backlog_entry(bridge: BridgeRecord, days_overdue: i64) -> BacklogEntry {
        BacklogEntry {
            bridge,
            due_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            days_overdue,
        }
    }

    fn metric(metrics: &[MetricTuple], name: &str) -> Option<f64> {
        metrics.iter().find(|m| m.name == name).map(|m| m.value)
    }

    #[test]
    fn test_backlog_sets_priority_and_status() {
        let mut monitor = BridgeMaintenanceMonitor::new();
        let overdue = record(json!({
            "bridge_id": "A",
            "risk_level": "HIGH",
            "lng": 1.0,
            "lat": 2.0,
        }));
        let upcoming = record(json!({ "bridge_id": "B" }));

        monitor.record_backlog(
            &[backlog_entry(overdue, 12), backlog_entry(upcoming, -5)],
            at(1),
        );

        let overlays = monitor.overlays();
        assert_eq!(overlays.len(), 2);
        assert_eq!(overlays[0].priority.as_deref(), Some("critical"));
        assert_eq!(overlays[0].status, STATUS_INSPECTION_DUE);
        assert_eq!(overlays[0].risk.as_deref(), Some("high"));
        assert_eq!(overlays[0].due_date.as_deref(), Some("2024-05-01"));
        assert_eq!(overlays[0].lng, Some(1.0));
        assert_eq!(overlays[1].priority.as_deref(), Some("scheduled"));
        assert_eq!(overlays[1].status, STATUS_SCHEDULED);
        assert_eq!(overlays[1].last_update, Some(at(1)));
    }

    #[test]
    fn test_intervention_response_time_and_dispatch() {
        let mut monitor = BridgeMaintenanceMonitor::new();
        let bridge = record(json!({ "bridge_id": "A", "next_inspection_due": "2024-06-01" }));

        monitor.record_backlog(&[backlog_entry(bridge.clone(), 3)], at(2));
        monitor.record_intervention(&bridge, Some("critical"), Some("Close lane"), Some(42), at(7));
        // A second dispatch without a pending backlog entry has no response time.
        monitor.record_intervention(&bridge, None, None, None, at(9));

        let export = monitor.export_state();
        assert_eq!(export.interventions.len(), 2);
        assert_eq!(export.interventions[0].response_steps, Some(5));
        assert_eq!(export.interventions[1].response_steps, None);

        let status = &export.work_orders[0];
        assert_eq!(status.status, STATUS_WORK_ORDER);
        assert_eq!(status.work_order_status.as_deref(), Some(WORK_ORDER_DISPATCHED));
        assert_eq!(status.action.as_deref(), Some("Close lane"));
        assert_eq!(status.priority.as_deref(), Some("critical"));
        // Backlog due date wins over the record's next inspection date.
        assert_eq!(status.due_date.as_deref(), Some("2024-05-01"));

        let metrics = monitor.metric_tuples(9);
        assert_eq!(metric(&metrics, "bridge/avg_response_steps"), Some(5.0));
    }

    #[test]
    fn test_intervention_keeps_unparsed_due_date() {
        let mut monitor = BridgeMaintenanceMonitor::new();
        let free_text = record(json!({ "bridge_id": "A", "next_inspection_due": "Q3 2024" }));
        let dated = record(json!({ "bridge_id": "B", "next_inspection_date": "06/15/2024" }));

        monitor.record_intervention(&free_text, None, None, None, at(1));
        monitor.record_intervention(&dated, None, None, None, at(1));

        let overlays = monitor.overlays();
        assert_eq!(overlays[0].due_date.as_deref(), Some("Q3 2024"));
        assert_eq!(overlays[1].due_date.as_deref(), Some("2024-06-15"));
    }

    #[test]
    fn test_work_order_in_progress_marks_mitigation() {
        let mut monitor = BridgeMaintenanceMonitor::new();
        let task = WorkOrderTask {
            bridge: record(json!({ "structure_id": "S-7", "name": "River Crossing" })),
            priority: Some("Critical".to_string()),
            action: Some("Shore up pier".to_string()),
            risk: Some("high".to_string()),
        };

        monitor.record_work_order_status(&task, at(4));
        monitor.record_work_order_status(&task, at(5));

        let status = &monitor.overlays()[0];
        assert_eq!(status.bridge_id, "S-7");
        assert_eq!(status.name.as_deref(), Some("River Crossing"));
        assert_eq!(status.work_order_status.as_deref(), Some(WORK_ORDER_IN_PROGRESS));
        assert_eq!(status.risk.as_deref(), Some("high"));

        let metrics = monitor.metric_tuples(5);
        assert_eq!(metric(&metrics, "bridge/risk_mitigated"), Some(1.0));
        assert_eq!(metric(&metrics, "bridge/critical_open_work_orders"), Some(1.0));
    }

    #[test]
    fn test_later_events_only_fill_coordinate_gaps() {
        let mut monitor = BridgeMaintenanceMonitor::new();
        let first = record(json!({ "bridge_id": "A", "lng": 1.0 }));
        let second = record(json!({ "bridge_id": "A", "lng": 9.0, "lat": 2.0 }));

        monitor.record_backlog(&[backlog_entry(first, 0)], at(1));
        monitor.record_inspection_findings(
            &[RepairProposal {
                bridge: second,
                priority: RepairPriority::Routine,
                risk: "unknown".to_string(),
                recommended_action: String::new(),
            }],
            at(2),
        );

        let status = &monitor.overlays()[0];
        assert_eq!(status.lng, Some(1.0));
        assert_eq!(status.lat, Some(2.0));
        assert_eq!(status.status, STATUS_TRIAGED);
        assert_eq!(status.priority.as_deref(), Some("routine"));
    }

    #[test]
    fn test_backlog_metrics() {
        let mut monitor = BridgeMaintenanceMonitor::new();
        let bridges: Vec<BridgeRecord> = (0..4)
            .map(|i| record(json!({ "bridge_id": format!("B{i}") })))
            .collect();

        let entries: Vec<BacklogEntry> = bridges
            .iter()
            .map(|b| backlog_entry(b.clone(), 1))
            .collect();
        monitor.record_backlog(&entries, at(1));
        monitor.record_backlog(&entries[..1], at(2));

        let metrics = monitor.metric_tuples(2);
        assert_eq!(metric(&metrics, "bridge/current_backlog"), Some(1.0));
        assert_eq!(metric(&metrics, "bridge/backlog_reduction"), Some(3.0));
        assert_eq!(metric(&metrics, "bridge/avg_response_steps"), None);
        assert_eq!(metric(&metrics, "bridge/critical_open_work_orders"), Some(4.0));
        assert!(metrics.iter().all(|m| m.step == 2));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut monitor = BridgeMaintenanceMonitor::new();
        monitor.record_backlog(
            &[backlog_entry(record(json!({ "bridge_id": "A" })), 1)],
            at(1),
        );
        monitor.reset();

        assert!(monitor.overlays().is_empty());
        let metrics = monitor.metric_tuples(0);
        assert_eq!(metrics.len(), 2);
        assert_eq!(metric(&metrics, "bridge/current_backlog"), None);
    }
}
