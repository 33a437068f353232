//! Core types for assassin

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A roster row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    /// Display name, also the chain key
    pub name: String,
    /// Where the target email goes
    pub email: String,
}

/// One participant's assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainEntry {
    /// Participant key (the roster name)
    pub participant: String,
    /// Key of the participant this one must act on
    pub target: String,
    /// Target's email, as reported by the backend
    pub target_email: Option<String>,
    /// Participant's own email, as reported by the backend
    pub player_email: Option<String>,
}

impl ChainEntry {
    /// Entry with only the key and target set
    pub fn new(participant: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            participant: participant.into(),
            target: target.into(),
            target_email: None,
            player_email: None,
        }
    }
}

/// Wire body of a chain entry; the participant key lives in the enclosing map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct EntryBody {
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_email: Option<String>,
}

/// A single `participant → target` step of a traversed chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainLink {
    /// Acting participant
    pub from: String,
    /// Their target
    pub to: String,
}

impl fmt::Display for ChainLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.from, self.to)
    }
}

/// A fetched check-in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckInRecord {
    /// Participant name
    pub name: String,
    /// When the selfie was submitted
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub submitted_at: DateTime<Utc>,
    /// Opaque image reference, dereferenced through `GET /image/{ref}`
    #[serde(default, rename = "image_url")]
    pub image_reference: Option<String>,
}

/// Accepts RFC 3339, HTTP-date (`Fri, 01 Mar 2024 09:00:00 GMT`) and naive
/// `YYYY-MM-DD HH:MM:SS[.f]` timestamps (read as UTC)
fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| serde::de::Error::custom(format!("bad timestamp: {raw}")))
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_rfc2822(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Where a check-in selfie is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureSource {
    /// Device camera, rear-facing
    Camera,
    /// Existing file on disk
    FilePicker,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_link_display() {
        let link = ChainLink {
            from: "A".into(),
            to: "B".into(),
        };
        assert_eq!(link.to_string(), "A → B");
    }

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let ts = parse_timestamp("2024-03-01T12:30:00+02:00").unwrap();
        assert_eq!(ts.hour(), 10);
    }

    #[test]
    fn test_parse_timestamp_naive() {
        let ts = parse_timestamp("2024-03-01 08:05:09.123").unwrap();
        assert_eq!(ts.day(), 1);
        assert_eq!(ts.minute(), 5);
    }

    #[test]
    fn test_parse_timestamp_http_date() {
        let ts = parse_timestamp("Fri, 01 Mar 2024 09:00:00 GMT").unwrap();
        assert_eq!((ts.day(), ts.hour()), (1, 9));
    }

    #[test]
    fn test_check_in_record_http_date() {
        let rec: CheckInRecord = serde_json::from_str(
            r#"{"name":"Sam","submitted_at":"Fri, 01 Mar 2024 09:00:00 GMT","image_url":"a.jpg"}"#,
        )
        .unwrap();
        assert_eq!(rec.submitted_at.to_rfc3339(), "2024-03-01T09:00:00+00:00");
    }

    #[test]
    fn test_check_in_record_optional_image() {
        let rec: CheckInRecord =
            serde_json::from_str(r#"{"name":"Sam","submitted_at":"2024-03-01T12:00:00Z"}"#)
                .unwrap();
        assert_eq!(rec.name, "Sam");
        assert!(rec.image_reference.is_none());
    }

    #[test]
    fn test_check_in_record_rejects_garbage_timestamp() {
        let res: std::result::Result<CheckInRecord, _> =
            serde_json::from_str(r#"{"name":"Sam","submitted_at":"yesterday"}"#);
        assert!(res.is_err());
    }
}
