//! User notifications: decoding store records and formatting their dates.

use chrono::{DateTime, Datelike, Timelike};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, TimetableError};
use crate::raw::{EntryKey, Indexed};

/// Zone used for notification dates unless the caller picks another.
pub const DEFAULT_TIMEZONE: &str = "Asia/Dushanbe";

/// Abbreviated Russian month names as used after a day number.
const MONTHS_SHORT: [&str; 12] = [
    "янв.", "февр.", "мар.", "апр.", "мая", "июн.", "июл.", "авг.", "сент.", "окт.", "нояб.",
    "дек.",
];

/// A notification as stored: `users/{uid}/notifications/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub timestamp: i64,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(rename = "isRead", default)]
    pub is_read: bool,
}

fn default_kind() -> String {
    "info".to_string()
}

/// A notification ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub body: String,
    /// `"dd MMM, HH:mm"` in the display timezone, e.g. `"19 окт., 14:05"`.
    pub date: String,
    pub kind: String,
    pub timestamp: i64,
    pub is_read: bool,
}

impl Notification {
    pub fn from_record(record: NotificationRecord, tz: &Tz) -> Self {
        Notification {
            date: format_timestamp(record.timestamp, tz),
            id: record.id,
            title: record.title,
            body: record.body,
            kind: record.kind,
            timestamp: record.timestamp,
            is_read: record.is_read,
        }
    }
}

/// Parse an IANA timezone name.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| TimetableError::InvalidTimezone(name.to_string()))
}

/// Render epoch milliseconds as `"dd MMM, HH:mm"` in `tz`.
///
/// Timestamps outside chrono's range render as an empty string.
pub fn format_timestamp(timestamp_ms: i64, tz: &Tz) -> String {
    let Some(utc) = DateTime::from_timestamp_millis(timestamp_ms) else {
        return String::new();
    };
    let local = utc.with_timezone(tz);
    format!(
        "{:02} {}, {:02}:{:02}",
        local.day(),
        MONTHS_SHORT[local.month0() as usize],
        local.hour(),
        local.minute()
    )
}

/// Decode a notification collection, newest first.
///
/// Accepts a list of records or an object keyed by document id; a keyed
/// entry's id is its key. Records that fail to decode are skipped.
pub fn notifications_from_collection(collection: &Value, tz: &Tz) -> Vec<Notification> {
    let mut notifications: Vec<Notification> = Indexed::from_value(Some(collection))
        .entries()
        .into_iter()
        .filter_map(|(key, value)| {
            let mut record: NotificationRecord = match serde_json::from_value(value.clone()) {
                Ok(record) => record,
                Err(e) => {
                    debug!(?key, error = %e, "skipping undecodable notification");
                    return None;
                }
            };
            if let EntryKey::Named(id) = key {
                record.id = id.to_string();
            }
            Some(Notification::from_record(record, tz))
        })
        .collect();
    notifications.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    notifications
}

/// Parse a notification collection from JSON text.
pub fn notifications_from_json(text: &str, tz: &Tz) -> Result<Vec<Notification>> {
    let value: Value = serde_json::from_str(text)?;
    Ok(notifications_from_collection(&value, tz))
}

pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.is_read).count()
}

/// Mark one notification read. Returns `false` when the id is unknown.
pub fn mark_read(notifications: &mut [Notification], id: &str) -> bool {
    match notifications.iter_mut().find(|n| n.id == id) {
        Some(notification) => {
            notification.is_read = true;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dushanbe() -> Tz {
        parse_timezone(DEFAULT_TIMEZONE).unwrap()
    }

    #[test]
    fn test_format_timestamp_in_zone() {
        // 2026-10-19T09:05:00Z is 14:05 in Dushanbe (UTC+5).
        let ms = 1_792_400_700_000;
        assert_eq!(format_timestamp(ms, &dushanbe()), "19 окт., 14:05");
        assert_eq!(format_timestamp(ms, &chrono_tz::UTC), "19 окт., 09:05");
    }

    #[test]
    fn test_format_timestamp_may_uses_genitive() {
        // 2026-05-01T00:00:00Z
        assert_eq!(format_timestamp(1_777_593_600_000, &chrono_tz::UTC), "01 мая, 00:00");
    }

    #[test]
    fn test_invalid_timezone() {
        let err = parse_timezone("Mars/Olympus").unwrap_err();
        assert!(err.to_string().contains("Invalid timezone"), "got: {err}");
    }

    #[test]
    fn test_record_defaults() {
        let record: NotificationRecord = serde_json::from_value(json!({"title": "Hi"})).unwrap();
        assert_eq!(record.kind, "info");
        assert!(!record.is_read);
        assert_eq!(record.timestamp, 0);
    }

    #[test]
    fn test_collection_sorted_newest_first_with_keyed_ids() {
        let collection = json!({
            "a": {"title": "old", "timestamp": 1_000, "isRead": true},
            "b": {"title": "new", "timestamp": 2_000, "type": "schedule"},
            "c": {"title": "broken", "timestamp": "soon"}
        });
        let list = notifications_from_collection(&collection, &dushanbe());
        let ids: Vec<&str> = list.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(list[0].kind, "schedule");
        assert_eq!(unread_count(&list), 1);
    }

    #[test]
    fn test_list_collection_keeps_record_ids() {
        let collection = json!([{"id": "x1", "timestamp": 5}, {"id": "x2", "timestamp": 9}]);
        let list = notifications_from_collection(&collection, &dushanbe());
        assert_eq!(list[0].id, "x2");
        assert_eq!(list[1].id, "x1");
    }

    #[test]
    fn test_mark_read() {
        let collection = json!([{"id": "n1"}]);
        let mut list = notifications_from_collection(&collection, &dushanbe());
        assert!(mark_read(&mut list, "n1"));
        assert!(!mark_read(&mut list, "missing"));
        assert_eq!(unread_count(&list), 0);
    }
}
