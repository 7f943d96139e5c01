//! Bridge inventory records and the maintenance helpers that work on them.
//!
//! Records are loose JSON objects straight from the cleaned inventory, so
//! every accessor tolerates missing keys and mixed value types.

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};
use std::path::Path;

/// A single cleaned bridge inventory row.
pub type BridgeRecord = Map<String, Value>;

const ID_KEYS: &[&str] = &[
    "bridge_id",
    "structure_id",
    "id",
    "structure_number",
    "structure_num",
];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%Y%m%d"];

const CRITICAL_ACTION: &str =
    "Stabilize, post warning signage, and initiate emergency repair crew dispatch";
const ROUTINE_ACTION: &str = "Schedule preventive maintenance and patch identified defects";

/// Returns the first value under `keys` that is neither null nor an empty string.
pub(crate) fn first_present<'a>(record: &'a BridgeRecord, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().filter_map(|k| record.get(*k)).find(|v| match v {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    })
}

pub(crate) fn parse_float(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

pub(crate) fn value_to_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Parses a date from any of the inventory's date encodings.
///
/// Numbers are treated as Unix epoch seconds.
pub fn parse_date(value: Option<&Value>) -> Option<NaiveDate> {
    match value? {
        Value::Number(n) => {
            let secs = n.as_f64()?;
            DateTime::from_timestamp(secs as i64, 0).map(|dt| dt.date_naive())
        }
        Value::String(s) => {
            let text = s.trim();
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        }
        _ => None,
    }
}

/// Stable identifier for a record, `"unknown"` if none of the id columns are set.
pub fn extract_bridge_id(record: &BridgeRecord) -> String {
    value_to_string(first_present(record, ID_KEYS)).unwrap_or_else(|| "unknown".to_string())
}

/// Returns `(lng, lat)`, each independently optional.
pub fn extract_coords(record: &BridgeRecord) -> (Option<f64>, Option<f64>) {
    let lng = parse_float(first_present(record, &["longitude", "lng", "lon"]));
    let lat = parse_float(first_present(record, &["latitude", "lat"]));
    (lng, lat)
}

pub(crate) fn extract_name(record: &BridgeRecord) -> Option<String> {
    match first_present(record, &["name", "bridge_name"]) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

pub(crate) fn extract_risk(record: &BridgeRecord) -> Option<String> {
    value_to_string(first_present(record, &["risk_level", "risk"]))
}

fn condition_score(record: &BridgeRecord) -> Option<f64> {
    parse_float(first_present(record, &["condition_rating", "condition"]))
}

/// Inventory file encodings, by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InventoryFormat {
    Json,
    Csv,
}

impl InventoryFormat {
    fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if ext.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else {
            None
        }
    }
}

/// Loads the newest cleaned inventory file (`*.json` or `*.csv`) from
/// `directory`.
///
/// CSV rows become records keyed by the header row, with every cell kept as
/// a string. Any failure yields an empty inventory; the reason is logged.
pub fn load_clean_bridge_records(directory: &Path) -> Vec<BridgeRecord> {
    let entries = match std::fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Bridge inventory directory {:?} unavailable: {}", directory, e);
            return Vec::new();
        }
    };

    let newest = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter_map(|path| {
            let format = InventoryFormat::from_path(&path)?;
            let modified = std::fs::metadata(&path).and_then(|m| m.modified()).ok()?;
            Some((modified, path, format))
        })
        .max_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    let Some((_, path, format)) = newest else {
        log::info!("No bridge inventory files found in {:?}", directory);
        return Vec::new();
    };

    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("Failed to read bridge inventory {:?}: {}", path, e);
            return Vec::new();
        }
    };

    let parsed = match format {
        InventoryFormat::Json => {
            serde_json::from_str::<Vec<BridgeRecord>>(&text).map_err(|e| e.to_string())
        }
        InventoryFormat::Csv => parse_csv_records(&text).map_err(|e| e.to_string()),
    };

    match parsed {
        Ok(records) => {
            log::info!("Loaded {} bridge records from {:?}", records.len(), path);
            records
        }
        Err(e) => {
            log::warn!("Failed to parse bridge inventory {:?}: {}", path, e);
            Vec::new()
        }
    }
}

fn parse_csv_records(text: &str) -> Result<Vec<BridgeRecord>, csv::Error> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let record: BridgeRecord = headers
            .iter()
            .zip(row.iter())
            .map(|(key, cell)| (key.to_string(), Value::String(cell.to_string())))
            .collect();
        records.push(record);
    }
    Ok(records)
}

/// Keeps bridges at or below `max_condition_score`, optionally restricted to
/// the given risk labels (case-insensitive). Records without a parseable
/// condition are dropped.
pub fn filter_bridges_by_condition(
    records: &[BridgeRecord],
    max_condition_score: f64,
    risk_levels: &[&str],
) -> Vec<BridgeRecord> {
    let wanted: Vec<String> = risk_levels.iter().map(|r| r.to_lowercase()).collect();

    records
        .iter()
        .filter(|record| {
            let Some(score) = condition_score(record) else {
                return false;
            };
            if score > max_condition_score {
                return false;
            }
            if wanted.is_empty() {
                return true;
            }
            extract_risk(record)
                .map(|r| wanted.contains(&r.to_lowercase()))
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

/// A bridge whose inspection is overdue or coming due.
#[derive(Debug, Clone, PartialEq)]
pub struct BacklogEntry {
    pub bridge: BridgeRecord,
    pub due_date: NaiveDate,
    /// Positive when overdue, negative when the due date is still ahead.
    pub days_overdue: i64,
}

/// Builds the inspection backlog as of `reference_date`.
///
/// Missing due dates count as due today. Entries due more than
/// `lead_time_days` in the future are left out. The result is ordered by
/// `days_overdue` ascending, then due date.
pub fn schedule_overdue_inspections(
    records: &[BridgeRecord],
    reference_date: NaiveDate,
    lead_time_days: i64,
) -> Vec<BacklogEntry> {
    let mut backlog: Vec<BacklogEntry> = records
        .iter()
        .filter_map(|record| {
            let due_date = parse_date(first_present(
                record,
                &["next_inspection_due", "next_inspection_date"],
            ))
            .or_else(|| parse_date(first_present(record, &["last_inspection_date"])))
            .unwrap_or(reference_date);
            let days_overdue = (reference_date - due_date).num_days();

            (days_overdue >= -lead_time_days).then(|| BacklogEntry {
                bridge: record.clone(),
                due_date,
                days_overdue,
            })
        })
        .collect();

    backlog.sort_by_key(|entry| (entry.days_overdue, entry.due_date));
    backlog
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairPriority {
    Critical,
    Routine,
}

impl RepairPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepairPriority::Critical => "critical",
            RepairPriority::Routine => "routine",
        }
    }
}

/// A recommended repair for one bridge.
#[derive(Debug, Clone, PartialEq)]
pub struct RepairProposal {
    pub bridge: BridgeRecord,
    pub priority: RepairPriority,
    pub risk: String,
    pub recommended_action: String,
}

/// Proposes repairs from condition scores; `critical` at or below
/// `severe_threshold`, otherwise `routine`.
pub fn propose_repair_actions(
    records: &[BridgeRecord],
    severe_threshold: f64,
) -> Vec<RepairProposal> {
    records
        .iter()
        .filter_map(|record| {
            let score = condition_score(record)?;
            let priority = if score <= severe_threshold {
                RepairPriority::Critical
            } else {
                RepairPriority::Routine
            };
            let recommended_action = match priority {
                RepairPriority::Critical => CRITICAL_ACTION,
                RepairPriority::Routine => ROUTINE_ACTION,
            };

            Some(RepairProposal {
                bridge: record.clone(),
                priority,
                risk: extract_risk(record).unwrap_or_else(|| "unknown".to_string()),
                recommended_action: recommended_action.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> BridgeRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_extract_bridge_id_priority() {
        assert_eq!(
            extract_bridge_id(&record(json!({ "structure_id": "S-1", "id": 9 }))),
            "S-1"
        );
        assert_eq!(extract_bridge_id(&record(json!({ "bridge_id": "", "id": 9 }))), "9");
        assert_eq!(extract_bridge_id(&record(json!({}))), "unknown");
    }

    #[test]
    fn test_extract_coords_accepts_strings() {
        let (lng, lat) = extract_coords(&record(json!({ "lon": "-93.5", "lat": 41.2 })));
        assert_eq!(lng, Some(-93.5));
        assert_eq!(lat, Some(41.2));

        let (lng, lat) = extract_coords(&record(json!({ "longitude": "n/a" })));
        assert_eq!(lng, None);
        assert_eq!(lat, None);
    }

    #[test]
    fn test_parse_date_formats() {
        for text in ["2024-03-05", "03/05/2024", "2024/03/05", "20240305"] {
            assert_eq!(parse_date(Some(&json!(text))), Some(date(2024, 3, 5)), "{text}");
        }
        assert_eq!(parse_date(Some(&json!(0))), Some(date(1970, 1, 1)));
        assert_eq!(parse_date(Some(&json!("March 5"))), None);
        assert_eq!(parse_date(None), None);
    }

    #[test]
    fn test_filter_by_condition_and_risk() {
        let records = vec![
            record(json!({ "id": 1, "condition_rating": 3, "risk_level": "HIGH" })),
            record(json!({ "id": 2, "condition_rating": "6", "risk_level": "HIGH" })),
            record(json!({ "id": 3, "condition": 4, "risk": "medium" })),
            record(json!({ "id": 4, "condition_rating": "poor" })),
            record(json!({ "id": 5, "condition_rating": 2 })),
        ];

        let any_risk = filter_bridges_by_condition(&records, 4.0, &[]);
        let ids: Vec<String> = any_risk.iter().map(extract_bridge_id).collect();
        assert_eq!(ids, vec!["1", "3", "5"]);

        let high_only = filter_bridges_by_condition(&records, 4.0, &["high"]);
        let ids: Vec<String> = high_only.iter().map(extract_bridge_id).collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[test]
    fn test_schedule_sorts_and_applies_lead_time() {
        let today = date(2024, 5, 1);
        let records = vec![
            record(json!({ "id": "late", "next_inspection_due": "2024-04-01" })),
            record(json!({ "id": "soon", "next_inspection_due": "2024-05-20" })),
            record(json!({ "id": "far", "next_inspection_due": "2024-09-01" })),
            record(json!({ "id": "fallback", "last_inspection_date": "04/21/2024" })),
            record(json!({ "id": "missing" })),
        ];

        let backlog = schedule_overdue_inspections(&records, today, 30);
        let summary: Vec<(String, i64)> = backlog
            .iter()
            .map(|e| (extract_bridge_id(&e.bridge), e.days_overdue))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("soon".to_string(), -19),
                ("missing".to_string(), 0),
                ("fallback".to_string(), 10),
                ("late".to_string(), 30),
            ]
        );
        assert_eq!(backlog[1].due_date, today);
    }

    #[test]
    fn test_propose_repair_actions() {
        let records = vec![
            record(json!({ "id": 1, "condition_rating": 2, "risk_level": "HIGH" })),
            record(json!({ "id": 2, "condition_rating": 5 })),
            record(json!({ "id": 3 })),
        ];

        let proposals = propose_repair_actions(&records, 3.0);
        assert_eq!(proposals.len(), 2);
        assert_eq!(proposals[0].priority, RepairPriority::Critical);
        assert_eq!(proposals[0].risk, "HIGH");
        assert_eq!(proposals[0].recommended_action, CRITICAL_ACTION);
        assert_eq!(proposals[1].priority, RepairPriority::Routine);
        assert_eq!(proposals[1].risk, "unknown");
        assert_eq!(proposals[1].recommended_action, ROUTINE_ACTION);
    }

    /// Fresh scratch directory under the system temp dir.
    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "agent-replay-inventory-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_with_mtime(path: &Path, contents: &str, secs: u64) {
        std::fs::write(path, contents).unwrap();
        let file = std::fs::File::options().write(true).open(path).unwrap();
        file.set_modified(std::time::UNIX_EPOCH + std::time::Duration::from_secs(secs))
            .unwrap();
    }

    #[test]
    fn test_load_csv_inventory() {
        let dir = scratch_dir("csv-only");
        write_with_mtime(
            &dir.join("bridges_clean_20240501.csv"),
            "structure_id,condition_rating,longitude,latitude,risk_level\n\
             BR-1,3,-93.5,41.2,high\n\
             BR-2,,-93.6,41.3,\n",
            1_700_000_000,
        );

        let records = load_clean_bridge_records(&dir);
        assert_eq!(records.len(), 2);
        assert_eq!(extract_bridge_id(&records[0]), "BR-1");
        assert_eq!(extract_coords(&records[0]), (Some(-93.5), Some(41.2)));
        assert_eq!(condition_score(&records[0]), Some(3.0));
        assert_eq!(extract_risk(&records[1]), None);

        let risky = filter_bridges_by_condition(&records, 4.0, &["HIGH"]);
        assert_eq!(risky.len(), 1);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_picks_newest_file_across_formats() {
        let dir = scratch_dir("newest");
        write_with_mtime(
            &dir.join("bridges_clean_old.json"),
            r#"[{ "bridge_id": "OLD" }]"#,
            1_600_000_000,
        );
        write_with_mtime(
            &dir.join("bridges_clean_new.csv"),
            "bridge_id\nNEW-1\nNEW-2\n",
            1_700_000_000,
        );
        write_with_mtime(&dir.join("notes.txt"), "ignored", 1_800_000_000);

        let records = load_clean_bridge_records(&dir);
        let ids: Vec<String> = records.iter().map(extract_bridge_id).collect();
        assert_eq!(ids, vec!["NEW-1", "NEW-2"]);

        write_with_mtime(
            &dir.join("bridges_clean_old.json"),
            r#"[{ "bridge_id": "OLD" }]"#,
            1_750_000_000,
        );
        let records = load_clean_bridge_records(&dir);
        assert_eq!(extract_bridge_id(&records[0]), "OLD");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_missing_directory_is_empty() {
        let records = load_clean_bridge_records(Path::new("/definitely/not/a/bridge/dir"));
        assert!(records.is_empty());
    }
}
