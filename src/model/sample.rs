//! Built-in demo replay.
//!
//! Generates a deterministic crowd of agents and runs a small bridge
//! inventory through the maintenance pipeline so the viewer has something
//! to show before a snapshot file is loaded.

use super::{Agent, AreaOfInterest, LastUpdate, MapCenter, ReplaySnapshot};
use crate::bridge::records::RepairPriority;
use crate::bridge::{
    filter_bridges_by_condition, propose_repair_actions, schedule_overdue_inspections,
    BridgeMaintenanceMonitor, BridgeRecord, WorkOrderTask,
};
use chrono::{Duration, NaiveDate};
use serde_json::{json, Map, Value};

const CENTER: MapCenter = MapCenter {
    lng: 116.391,
    lat: 39.907,
};
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;
const AGENT_COUNT: u64 = 60;
const CREW_IDS: &[u64] = &[1001, 1002, 1003];

const NAMES: &[&str] = &[
    "Avery", "Blake", "Casey", "Devon", "Emery", "Finley", "Harper", "Jordan", "Kai", "Logan",
    "Morgan", "Quinn", "Riley", "Sage", "Taylor",
];
const OCCUPATIONS: &[&str] = &["student", "engineer", "teacher", "retired"];

/// Snapshot plus the monitor that produced its bridge overlays.
pub struct DemoReplay {
    pub snapshot: ReplaySnapshot,
    pub monitor: BridgeMaintenanceMonitor,
}

/// Builds the demo replay. `inventory` replaces the built-in bridge
/// inventory when non-empty.
pub fn demo_replay(inventory: Vec<BridgeRecord>, reference_date: NaiveDate) -> DemoReplay {
    let inventory = if inventory.is_empty() {
        sample_inventory(reference_date)
    } else {
        inventory
    };

    let monitor = run_maintenance_pipeline(&inventory, reference_date);

    let snapshot = ReplaySnapshot {
        step: Some(4),
        agents: (0..AGENT_COUNT).map(sample_agent).collect(),
        bridges: monitor.overlays().to_vec(),
        aois: sample_aois(),
        center: Some(CENTER),
        heatmap_status_key: None,
    };

    log::info!(
        "Generated demo replay: {} agents, {} bridge overlays",
        snapshot.agents.len(),
        snapshot.bridges.len()
    );

    DemoReplay { snapshot, monitor }
}

fn clock(step: i64) -> LastUpdate {
    LastUpdate {
        day: 0,
        t: step as f64 * 900.0,
        step,
    }
}

/// Inspect → triage → dispatch → crew acknowledgement, one step each.
fn run_maintenance_pipeline(
    inventory: &[BridgeRecord],
    reference_date: NaiveDate,
) -> BridgeMaintenanceMonitor {
    let mut monitor = BridgeMaintenanceMonitor::new();

    let risky = filter_bridges_by_condition(inventory, 4.0, &[]);
    let backlog = schedule_overdue_inspections(&risky, reference_date, 30);
    monitor.record_backlog(&backlog, clock(1));

    let candidates: Vec<BridgeRecord> = backlog.iter().map(|e| e.bridge.clone()).collect();
    let proposals = propose_repair_actions(&candidates, 3.0);
    monitor.record_inspection_findings(&proposals, clock(2));

    let critical: Vec<_> = proposals
        .iter()
        .filter(|p| p.priority == RepairPriority::Critical)
        .collect();
    for (idx, proposal) in critical.iter().enumerate() {
        monitor.record_intervention(
            &proposal.bridge,
            Some(proposal.priority.as_str()),
            Some(proposal.recommended_action.as_str()),
            Some(CREW_IDS[idx % CREW_IDS.len()]),
            clock(3),
        );
    }

    if let Some(first) = critical.first() {
        let task = WorkOrderTask {
            bridge: first.bridge.clone(),
            priority: Some(first.priority.as_str().to_string()),
            action: Some(first.recommended_action.clone()),
            risk: Some(first.risk.clone()),
        };
        monitor.record_work_order_status(&task, clock(4));
    }

    monitor
}

fn sample_agent(i: u64) -> Agent {
    let angle = i as f64 * GOLDEN_ANGLE;
    let radius = 0.03 * ((i as f64 + 0.5) / AGENT_COUNT as f64).sqrt();

    let name = if i % 13 == 12 {
        String::new()
    } else {
        format!("{} {}", NAMES[(i as usize) % NAMES.len()], i)
    };

    let gender = if i % 2 == 0 { "male" } else { "female" };
    let occupation = OCCUPATIONS[(i as usize) % OCCUPATIONS.len()];
    let profile = if i % 17 == 16 {
        None
    } else if i % 19 == 18 {
        Some(json!({ "age": "unknown", "gender": gender }))
    } else {
        Some(json!({
            "age": (i * 7) % 80 + 5,
            "gender": gender,
            "occupation": occupation,
        }))
    };

    let mut status = Map::new();
    status.insert("satisfaction".into(), json!(((i * 37) % 100) as f64 / 100.0));
    status.insert("health".into(), json!(((i * 53) % 100) as f64 / 100.0));
    if i % 3 != 0 {
        status.insert("commute_minutes".into(), json!((i * 11) % 90));
    }

    Agent {
        id: i,
        name,
        lng: CENTER.lng + radius * angle.cos() / CENTER.lat.to_radians().cos(),
        lat: CENTER.lat + radius * angle.sin(),
        profile,
        status,
    }
}

fn sample_inventory(reference_date: NaiveDate) -> Vec<BridgeRecord> {
    let day = |offset: i64| {
        (reference_date + Duration::days(offset))
            .format("%Y-%m-%d")
            .to_string()
    };

    let rows = [
        json!({
            "structure_id": "BR-0101",
            "name": "North Canal Bridge",
            "condition_rating": 2,
            "risk_level": "HIGH",
            "next_inspection_due": day(-45),
            "longitude": 116.381,
            "latitude": 39.921,
        }),
        json!({
            "structure_id": "BR-0102",
            "name": "Temple Gate Overpass",
            "condition_rating": 3,
            "risk_level": "HIGH",
            "next_inspection_due": day(-10),
            "longitude": 116.405,
            "latitude": 39.915,
        }),
        json!({
            "structure_id": "BR-0103",
            "name": "Moat Footbridge",
            "condition_rating": 4,
            "risk_level": "MEDIUM",
            "next_inspection_due": day(12),
            "longitude": 116.372,
            "latitude": 39.899,
        }),
        json!({
            "structure_id": "BR-0104",
            "name": "Ring Road Interchange",
            "condition_rating": "4",
            "risk_level": "MEDIUM",
            "last_inspection_date": day(-3),
            "longitude": 116.412,
            "latitude": 39.894,
        }),
        json!({
            "structure_id": "BR-0105",
            "name": "Rail Yard Crossing",
            "condition_rating": 7,
            "risk_level": "LOW",
            "next_inspection_due": day(-90),
            "longitude": 116.366,
            "latitude": 39.912,
        }),
        json!({
            "structure_id": "BR-0106",
            "name": "Lake Causeway",
            "condition_rating": 1,
            "risk_level": "HIGH",
            "next_inspection_due": day(-2),
        }),
        json!({
            "structure_id": "BR-0107",
            "name": "East Market Span",
            "condition_rating": 3,
            "risk_level": "MEDIUM",
            "next_inspection_due": day(200),
            "longitude": 116.421,
            "latitude": 39.908,
        }),
    ];

    rows.into_iter()
        .filter_map(|row| match row {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect()
}

fn sample_aois() -> Vec<AreaOfInterest> {
    let square = |lng: f64, lat: f64, half: f64| {
        vec![
            [lng - half, lat - half],
            [lng + half, lat - half],
            [lng + half, lat + half],
            [lng - half, lat + half],
        ]
    };

    vec![
        AreaOfInterest {
            id: 500_001,
            name: Some("Old Town Market".to_string()),
            land_use: Some(5),
            ring: square(116.398, 39.903, 0.003),
        },
        AreaOfInterest {
            id: 500_002,
            name: Some("Riverside Housing".to_string()),
            land_use: Some(7),
            ring: square(116.379, 39.913, 0.004),
        },
        AreaOfInterest {
            id: 500_003,
            name: None,
            land_use: Some(31),
            ring: square(116.409, 39.918, 0.002),
        },
    ]
}
