//! Guestbook entry and identifier types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of a guestbook entry.
///
/// The hosted store hands out integer primary keys while the in-memory
/// store uses strings, so both shapes are accepted and each serializes back
/// in the JSON kind it arrived as.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    /// Numeric identifier (hosted store).
    Int(i64),
    /// Textual identifier (in-memory store).
    Text(String),
}

impl EntryId {
    /// Returns true if this id matches the raw value of an `?id=` query.
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            Self::Int(n) => raw.parse::<i64>().is_ok_and(|r| r == *n),
            Self::Text(s) => s == raw,
        }
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EntryId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A single guestbook submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestbookEntry {
    /// Backend-assigned identifier. Immutable once created.
    pub id: EntryId,
    /// Author display name, already trimmed.
    pub name: String,
    /// Message body, already trimmed.
    pub message: String,
    /// Insert time assigned by the storage backend.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_entry_id_keeps_json_kind() {
        let int: EntryId = serde_json::from_str("42").unwrap();
        let text: EntryId = serde_json::from_str("\"demo-1\"").unwrap();

        assert_eq!(int, EntryId::Int(42));
        assert_eq!(text, EntryId::Text("demo-1".into()));
        assert_eq!(serde_json::to_string(&int).unwrap(), "42");
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"demo-1\"");
    }

    #[test]
    fn test_entry_id_matches_query_value() {
        assert!(EntryId::Int(7).matches("7"));
        assert!(!EntryId::Int(7).matches("07x"));
        assert!(EntryId::from("demo-1").matches("demo-1"));
        assert!(!EntryId::from("demo-1").matches("demo-2"));
        assert_eq!(EntryId::Int(7).to_string(), "7");
    }

    #[test]
    fn test_entry_accepts_store_timestamp_format() {
        let json = r#"{
            "id": 3,
            "name": "Ana",
            "message": "Hi!",
            "created_at": "2024-05-01T10:20:30.123456+00:00"
        }"#;
        let entry: GuestbookEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.id, EntryId::Int(3));
        assert_eq!(
            entry.created_at.timestamp(),
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 20, 30).unwrap().timestamp()
        );
    }
}
