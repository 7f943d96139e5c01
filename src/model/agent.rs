//! Simulated agent records.

use geo_types::Coord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A simulated agent as seen by the replay view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(alias = "longitude", alias = "lon")]
    pub lng: f64,
    #[serde(alias = "latitude")]
    pub lat: f64,
    /// Free-form profile (age, gender, occupation, ...). May be absent or
    /// not even an object; consumers must not assume its shape.
    #[serde(default)]
    pub profile: Option<Value>,
    /// Free-form status fields keyed by name.
    #[serde(default)]
    pub status: Map<String, Value>,
}

impl Agent {
    pub fn position(&self) -> Coord<f64> {
        Coord {
            x: self.lng,
            y: self.lat,
        }
    }

    /// Numeric value of a status field, 0.0 when missing or not numeric.
    pub fn status_weight(&self, key: &str) -> f64 {
        match self.status.get(key) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
            Some(Value::Bool(b)) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    }
}
