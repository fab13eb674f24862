//! Deserialization boundary for the schema-less store documents.
//!
//! The store hands back JSON whose collections may arrive either as arrays
//! or as objects keyed by an index string, and whose text fields may be a
//! string, a list of strings, or anything else. Those shapes are captured
//! here as explicit variants ([`Indexed`], [`TextValue`]) so the rest of the
//! crate works on one normalized form.
//!
//! Nothing in this module fails on a bad shape: a value of the wrong type is
//! treated as absent.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::Result;

// ── Shape variants ──────────────────────────────────────────────────────────

/// A collection that may be stored as an array or as an index-keyed object.
#[derive(Debug, Clone, Copy)]
pub enum Indexed<'a> {
    /// `[a, b, c]`: the position is the key.
    Sequence(&'a [Value]),
    /// `{"0": a, "3": b}`: keys are index strings, possibly sparse.
    Keyed(&'a Map<String, Value>),
    /// Missing, null, or a scalar.
    Absent,
}

/// Key of an [`Indexed`] entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKey<'a> {
    Position(usize),
    Named(&'a str),
}

impl EntryKey<'_> {
    /// The key as an integer. Named keys that do not parse yield `None`.
    pub fn as_index(&self) -> Option<i64> {
        match self {
            EntryKey::Position(i) => i64::try_from(*i).ok(),
            EntryKey::Named(name) => name.parse().ok(),
        }
    }
}

impl<'a> Indexed<'a> {
    pub fn from_value(value: Option<&'a Value>) -> Self {
        match value {
            Some(Value::Array(items)) => Indexed::Sequence(items),
            Some(Value::Object(map)) => Indexed::Keyed(map),
            _ => Indexed::Absent,
        }
    }

    /// All entries in storage order, nulls included.
    pub fn entries(&self) -> Vec<(EntryKey<'a>, &'a Value)> {
        match *self {
            Indexed::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (EntryKey::Position(i), v))
                .collect(),
            Indexed::Keyed(map) => map
                .iter()
                .map(|(k, v)| (EntryKey::Named(k.as_str()), v))
                .collect(),
            Indexed::Absent => Vec::new(),
        }
    }

    /// Object entries ordered by key.
    ///
    /// Sequences keep their order. Keyed entries are stably sorted by their
    /// integer key, with unparseable keys ordering as 0. Non-object values are
    /// skipped, so the result's positions need not match the original keys.
    pub fn ordered_objects(&self) -> Vec<&'a Map<String, Value>> {
        let mut entries = self.entries();
        if let Indexed::Keyed(_) = self {
            entries.sort_by_key(|(key, _)| key.as_index().unwrap_or(0));
        }
        entries
            .into_iter()
            .filter_map(|(_, value)| value.as_object())
            .collect()
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Indexed::Absent)
    }
}

/// A text field that may be a string, a list, or something unusable.
#[derive(Debug, Clone, Copy)]
pub enum TextValue<'a> {
    Single(&'a str),
    List(&'a [Value]),
    Other,
}

impl<'a> TextValue<'a> {
    pub fn from_value(value: Option<&'a Value>) -> Self {
        match value {
            Some(Value::String(s)) => TextValue::Single(s),
            Some(Value::Array(items)) => TextValue::List(items),
            _ => TextValue::Other,
        }
    }

    /// The string, if this is a single string.
    pub fn as_single(&self) -> Option<&'a str> {
        match self {
            TextValue::Single(s) => Some(*s),
            _ => None,
        }
    }

    /// A string as-is, a list joined with `", "`, anything else empty.
    pub fn joined(&self) -> String {
        match self {
            TextValue::Single(s) => (*s).to_string(),
            TextValue::List(items) => items
                .iter()
                .map(scalar_text)
                .collect::<Vec<_>>()
                .join(", "),
            TextValue::Other => String::new(),
        }
    }
}

/// Text of a list element: strings unquoted, anything else as JSON.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ── Day and slot views ──────────────────────────────────────────────────────

/// One entry of a `days` collection.
#[derive(Debug, Clone, Copy)]
pub struct RawDay<'a> {
    pub label: Option<&'a str>,
    pub date: Option<&'a str>,
    pub lessons: Indexed<'a>,
}

impl<'a> RawDay<'a> {
    pub fn from_object(map: &'a Map<String, Value>) -> Self {
        RawDay {
            label: map.get("day").and_then(Value::as_str),
            date: map.get("date").and_then(Value::as_str),
            lessons: Indexed::from_value(map.get("lessons")),
        }
    }
}

/// One occupied slot of a day.
#[derive(Debug, Clone, Copy)]
pub struct RawLesson<'a> {
    pub subject: TextValue<'a>,
    pub kind_label: TextValue<'a>,
    /// Teacher in group schedules, group in teacher schedules.
    pub teacher: TextValue<'a>,
    pub rooms: TextValue<'a>,
}

impl<'a> RawLesson<'a> {
    pub fn from_object(map: &'a Map<String, Value>) -> Self {
        RawLesson {
            subject: TextValue::from_value(map.get("subject")),
            kind_label: TextValue::from_value(map.get("type")),
            teacher: TextValue::from_value(map.get("teacher")),
            rooms: TextValue::from_value(map.get("rooms")),
        }
    }
}

fn days_of(value: &Value) -> Vec<RawDay<'_>> {
    Indexed::from_value(Some(value))
        .ordered_objects()
        .into_iter()
        .map(RawDay::from_object)
        .collect()
}

// ── Documents ───────────────────────────────────────────────────────────────

/// `schedules/{groupId}`: `{"days": <list-or-map>}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupScheduleDocument {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub title: Value,
    #[serde(default)]
    pub days: Value,
}

/// `free_rooms`: `{"schedule": <day->slot->rooms>, "last_update": "..."}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FreeRoomsDocument {
    #[serde(default)]
    pub schedule: Value,
    #[serde(default)]
    pub last_update: Value,
}

/// `teachers/{teacherId}`: same day/slot shape as a group schedule.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeacherDocument {
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub updated_at: Value,
    #[serde(default)]
    pub days: Value,
}

/// Decode a document from an already-parsed value.
///
/// Anything other than a JSON object yields the empty default document.
fn lenient<T>(value: Value) -> T
where
    T: Default + for<'de> Deserialize<'de>,
{
    if !value.is_object() {
        return T::default();
    }
    serde_json::from_value(value).unwrap_or_default()
}

impl GroupScheduleDocument {
    pub fn from_value(value: Value) -> Self {
        lenient(value)
    }

    /// Parse JSON text. Only syntactically invalid JSON is an error.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(Self::from_value(serde_json::from_str(text)?))
    }

    pub fn raw_days(&self) -> Vec<RawDay<'_>> {
        days_of(&self.days)
    }
}

impl FreeRoomsDocument {
    pub fn from_value(value: Value) -> Self {
        lenient(value)
    }

    /// Parse JSON text. Only syntactically invalid JSON is an error.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(Self::from_value(serde_json::from_str(text)?))
    }

    pub fn last_update(&self) -> &str {
        self.last_update.as_str().unwrap_or("")
    }
}

impl TeacherDocument {
    pub fn from_value(value: Value) -> Self {
        lenient(value)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_str()
    }

    pub fn raw_days(&self) -> Vec<RawDay<'_>> {
        days_of(&self.days)
    }
}
