//! Agent icon selection by coarse age/gender buckets.

use crate::ui::colors;
use eframe::egui::Color32;
use serde_json::Value;
use thiserror::Error;

const CHILD_MAX_AGE: f64 = 18.0;
const ADULT_MAX_AGE: f64 = 60.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AgentIcon {
    Boy1,
    Boy2,
    Boy3,
    Girl1,
    Girl2,
    Girl3,
    #[default]
    Default,
}

impl AgentIcon {
    /// Asset name without extension.
    pub fn name(&self) -> &'static str {
        match self {
            AgentIcon::Boy1 => "boy1",
            AgentIcon::Boy2 => "boy2",
            AgentIcon::Boy3 => "boy3",
            AgentIcon::Girl1 => "girl1",
            AgentIcon::Girl2 => "girl2",
            AgentIcon::Girl3 => "girl3",
            AgentIcon::Default => "default",
        }
    }

    pub fn url(&self, base: &str) -> String {
        format!("{}/{}.png", base.trim_end_matches('/'), self.name())
    }

    pub fn tint(&self) -> Color32 {
        match self {
            AgentIcon::Boy1 | AgentIcon::Boy2 | AgentIcon::Boy3 => colors::agents::ICON_BOY,
            AgentIcon::Girl1 | AgentIcon::Girl2 | AgentIcon::Girl3 => colors::agents::ICON_GIRL,
            AgentIcon::Default => colors::agents::ICON_DEFAULT,
        }
    }

    /// Relative marker scale: children draw smaller than adults.
    pub fn scale(&self) -> f32 {
        match self {
            AgentIcon::Boy1 | AgentIcon::Girl1 => 0.75,
            _ => 1.0,
        }
    }

    /// Single-character glyph drawn inside the marker.
    pub fn glyph(&self) -> &'static str {
        match self {
            AgentIcon::Boy1 | AgentIcon::Girl1 => "c",
            AgentIcon::Boy2 | AgentIcon::Girl2 => "a",
            AgentIcon::Boy3 | AgentIcon::Girl3 => "s",
            AgentIcon::Default => "?",
        }
    }
}

/// Why a profile could not be mapped to an icon.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("agent has no profile")]
    Missing,
    #[error("profile is not an object")]
    NotAnObject,
    #[error("profile has no age")]
    MissingAge,
    #[error("invalid age {0}")]
    InvalidAge(String),
    #[error("unrecognized gender {0:?}")]
    UnknownGender(String),
}

fn parse_age(value: &Value) -> Result<f64, ProfileError> {
    let age = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match age {
        Some(a) if a.is_finite() && a >= 0.0 => Ok(a),
        _ => Err(ProfileError::InvalidAge(value.to_string())),
    }
}

/// Maps a profile to an icon, reporting what was wrong with it.
pub fn try_select_icon(profile: Option<&Value>) -> Result<AgentIcon, ProfileError> {
    let profile = profile
        .filter(|p| !p.is_null())
        .ok_or(ProfileError::Missing)?
        .as_object()
        .ok_or(ProfileError::NotAnObject)?;

    let age = parse_age(profile.get("age").ok_or(ProfileError::MissingAge)?)?;
    let gender = match profile.get("gender") {
        Some(Value::String(s)) => s.trim().to_lowercase(),
        Some(other) => return Err(ProfileError::UnknownGender(other.to_string())),
        None => return Err(ProfileError::UnknownGender(String::new())),
    };

    let bucket = if age < CHILD_MAX_AGE {
        0
    } else if age < ADULT_MAX_AGE {
        1
    } else {
        2
    };

    let icon = match (gender.as_str(), bucket) {
        ("male" | "m", 0) => AgentIcon::Boy1,
        ("male" | "m", 1) => AgentIcon::Boy2,
        ("male" | "m", _) => AgentIcon::Boy3,
        ("female" | "f", 0) => AgentIcon::Girl1,
        ("female" | "f", 1) => AgentIcon::Girl2,
        ("female" | "f", _) => AgentIcon::Girl3,
        _ => return Err(ProfileError::UnknownGender(gender)),
    };
    Ok(icon)
}

/// Maps a profile to an icon, falling back to [`AgentIcon::Default`] on
/// malformed data.
pub fn select_icon(profile: Option<&Value>) -> AgentIcon {
    try_select_icon(profile).unwrap_or_else(|e| {
        log::debug!("Using default agent icon: {}", e);
        AgentIcon::Default
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_age_gender_buckets() {
        assert_eq!(
            select_icon(Some(&json!({ "gender": "male", "age": 10 }))),
            AgentIcon::Boy1
        );
        assert_eq!(
            select_icon(Some(&json!({ "gender": "female", "age": 40 }))),
            AgentIcon::Girl2
        );
        assert_eq!(
            select_icon(Some(&json!({ "gender": "Male", "age": 72 }))),
            AgentIcon::Boy3
        );
        assert_eq!(
            select_icon(Some(&json!({ "gender": "F", "age": "17" }))),
            AgentIcon::Girl1
        );
    }

    #[test]
    fn test_bucket_boundaries() {
        let icon = |age: f64| select_icon(Some(&json!({ "gender": "male", "age": age })));
        assert_eq!(icon(17.9), AgentIcon::Boy1);
        assert_eq!(icon(18.0), AgentIcon::Boy2);
        assert_eq!(icon(59.9), AgentIcon::Boy2);
        assert_eq!(icon(60.0), AgentIcon::Boy3);
    }

    #[test]
    fn test_malformed_profiles_fall_back() {
        assert_eq!(select_icon(None), AgentIcon::Default);
        assert_eq!(select_icon(Some(&Value::Null)), AgentIcon::Default);
        assert_eq!(select_icon(Some(&json!("adult"))), AgentIcon::Default);
        assert_eq!(
            select_icon(Some(&json!({ "gender": "male", "age": "unknown" }))),
            AgentIcon::Default
        );
        assert_eq!(
            select_icon(Some(&json!({ "gender": "male", "age": -3 }))),
            AgentIcon::Default
        );
        assert_eq!(select_icon(Some(&json!({ "age": 30 }))), AgentIcon::Default);
        assert_eq!(
            select_icon(Some(&json!({ "gender": "other", "age": 30 }))),
            AgentIcon::Default
        );
    }

    #[test]
    fn test_errors_name_the_problem() {
        assert_eq!(try_select_icon(None), Err(ProfileError::Missing));
        assert_eq!(
            try_select_icon(Some(&json!({ "gender": "male" }))),
            Err(ProfileError::MissingAge)
        );
        assert_eq!(
            try_select_icon(Some(&json!({ "gender": "male", "age": "old" }))),
            Err(ProfileError::InvalidAge("\"old\"".to_string()))
        );
    }

    #[test]
    fn test_icon_url() {
        assert_eq!(AgentIcon::Girl2.url("/icons/"), "/icons/girl2.png");
        assert_eq!(
            AgentIcon::Default.url("https://cdn.example.org/agents"),
            "https://cdn.example.org/agents/default.png"
        );
    }
}
