//! Teacher schedules.
//!
//! A teacher document has the same day/slot shape as a group schedule; in it
//! the `teacher` field of a slot names the group being taught.

use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use crate::error::Result;
use crate::lesson::DaySchedule;
use crate::normalize::normalize_days;
use crate::raw::{EntryKey, Indexed, TeacherDocument};

/// Id given to the stand-in returned when a profile matches no teacher.
pub const PLACEHOLDER_TEACHER_ID: &str = "fake";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Teacher {
    /// Store key, e.g. `"Иванов_И_И"`.
    pub id: String,
    /// Display name, e.g. `"Иванов.И.И"`.
    pub name: String,
    pub days: Vec<DaySchedule>,
}

impl Teacher {
    /// Resolve a teacher document stored under `id`.
    ///
    /// The display name is the document's `name`, or the id when absent, with
    /// underscores replaced by dots.
    pub fn from_document(id: &str, document: &TeacherDocument) -> Self {
        let name = document.name().unwrap_or(id).replace('_', ".");
        Teacher {
            id: id.to_string(),
            name,
            days: normalize_days(&document.raw_days()),
        }
    }

    /// A teacher with no schedule, used when a profile matches nobody.
    pub fn placeholder(name: &str) -> Self {
        Teacher {
            id: PLACEHOLDER_TEACHER_ID.to_string(),
            name: name.to_string(),
            days: Vec::new(),
        }
    }
}

/// Resolve a `teachers` collection (object keyed by teacher id) sorted by
/// display name. Entries that are not objects are skipped.
pub fn teachers_from_collection(collection: &Value) -> Vec<Teacher> {
    let mut teachers: Vec<Teacher> = Indexed::from_value(Some(collection))
        .entries()
        .into_iter()
        .filter(|(_, value)| value.is_object())
        .map(|(key, value)| {
            let id = match key {
                EntryKey::Position(i) => i.to_string(),
                EntryKey::Named(name) => name.to_string(),
            };
            Teacher::from_document(&id, &TeacherDocument::from_value(value.clone()))
        })
        .collect();
    teachers.sort_by(|a, b| a.name.cmp(&b.name));
    trace!(teachers = teachers.len(), "normalized teacher collection");
    teachers
}

/// Parse a `teachers` collection from JSON text.
pub fn teachers_from_json(text: &str) -> Result<Vec<Teacher>> {
    let value: Value = serde_json::from_str(text)?;
    Ok(teachers_from_collection(&value))
}

/// Teachers whose name contains `query`, ignoring case. A blank query
/// matches everyone.
pub fn search<'a>(teachers: &'a [Teacher], query: &str) -> Vec<&'a Teacher> {
    if query.trim().is_empty() {
        return teachers.iter().collect();
    }
    let needle = query.to_lowercase();
    teachers
        .iter()
        .filter(|t| t.name.to_lowercase().contains(&needle))
        .collect()
}

/// Display name a teacher's own profile maps to: `"Surname F.P."`.
///
/// # Examples
///
/// ```
/// use msu_timetable::teacher::profile_display_name;
///
/// assert_eq!(profile_display_name("Иванов", "Иван", "Иванович"), "Иванов И.И.");
/// assert_eq!(profile_display_name("Рахимов", "Джамшед", "Олимович"), "Рахимов Дж.О.");
/// ```
pub fn profile_display_name(surname: &str, first_name: &str, patronymic: &str) -> String {
    format!(
        "{} {}{}",
        surname,
        initial(first_name),
        initial(patronymic)
    )
    .trim()
    .to_string()
}

fn initial(name: &str) -> String {
    let trimmed = name.trim();
    let Some(first) = trimmed.chars().next() else {
        return String::new();
    };
    let prefix: String = trimmed.chars().take(2).collect();
    if prefix.to_lowercase() == "дж" {
        return "Дж.".to_string();
    }
    format!("{first}.")
}

/// The teacher whose trimmed name equals `display_name` ignoring case, or a
/// placeholder carrying that name.
pub fn find_by_display_name(teachers: &[Teacher], display_name: &str) -> Teacher {
    let target = display_name.to_lowercase();
    teachers
        .iter()
        .find(|t| t.name.trim().to_lowercase() == target)
        .cloned()
        .unwrap_or_else(|| Teacher::placeholder(display_name))
}

/// Keep the previously selected teacher if still present, else the first.
pub fn retain_selection<'a>(teachers: &'a [Teacher], previous_id: Option<&str>) -> Option<&'a Teacher> {
    previous_id
        .and_then(|id| teachers.iter().find(|t| t.id == id))
        .or_else(|| teachers.first())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::LessonKind;
    use serde_json::json;

    fn collection() -> Value {
        json!({
            "Петров_П_П": {
                "days": [{
                    "day": "Понедельник",
                    "lessons": {"0": {"subject": "Алгебра", "type": "Лекция", "teacher": ["pmi_1", "pmi_2"], "rooms": "101"}}
                }]
            },
            "Иванов_И_И": {"name": "Иванов И.И.", "updated_at": "2026-10-18", "days": []},
            "broken": 17
        })
    }

    #[test]
    fn test_collection_sorted_by_name_and_skips_non_objects() {
        let teachers = teachers_from_collection(&collection());
        let names: Vec<&str> = teachers.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Иванов И.И.", "Петров.П.П"]);
    }

    #[test]
    fn test_name_falls_back_to_id_with_dots() {
        let teacher = Teacher::from_document("Сидоров_С_С", &TeacherDocument::default());
        assert_eq!(teacher.id, "Сидоров_С_С");
        assert_eq!(teacher.name, "Сидоров.С.С");
        assert!(teacher.days.is_empty());
    }

    #[test]
    fn test_teacher_lessons_carry_group_labels() {
        let teachers = teachers_from_collection(&collection());
        let petrov = &teachers[1];
        let monday = &petrov.days[0];
        assert_eq!(monday.lessons.len(), 5);
        assert_eq!(monday.lessons[0].teacher, "pmi_1, pmi_2");
        assert_eq!(monday.lessons[0].kind, LessonKind::Lecture);
        assert!(monday.lessons[1].is_free_slot());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let teachers = teachers_from_collection(&collection());
        assert_eq!(search(&teachers, "ПЕТР").len(), 1);
        assert_eq!(search(&teachers, "  ").len(), 2);
        assert!(search(&teachers, "Смирнов").is_empty());
    }

    #[test]
    fn test_profile_display_name_initials() {
        assert_eq!(profile_display_name("Иванов", "Иван", "Иванович"), "Иванов И.И.");
        assert_eq!(profile_display_name("Каримов", "джура", ""), "Каримов Дж.");
        assert_eq!(profile_display_name("Каримов", "", ""), "Каримов");
    }

    #[test]
    fn test_find_by_display_name_or_placeholder() {
        let teachers = teachers_from_collection(&collection());
        let found = find_by_display_name(&teachers, "иванов и.и.");
        assert_eq!(found.id, "Иванов_И_И");

        let missing = find_by_display_name(&teachers, "Смирнов А.А.");
        assert_eq!(missing.id, PLACEHOLDER_TEACHER_ID);
        assert_eq!(missing.name, "Смирнов А.А.");
        assert!(missing.days.is_empty());
    }

    #[test]
    fn test_retain_selection() {
        let teachers = teachers_from_collection(&collection());
        assert_eq!(
            retain_selection(&teachers, Some("Петров_П_П")).map(|t| t.id.as_str()),
            Some("Петров_П_П")
        );
        assert_eq!(
            retain_selection(&teachers, Some("gone")).map(|t| t.id.as_str()),
            Some("Иванов_И_И")
        );
        assert!(retain_selection(&[], None).is_none());
    }

    #[test]
    fn test_teachers_from_json_rejects_invalid_text() {
        assert!(teachers_from_json("[").is_err());
        assert!(teachers_from_json("null").unwrap().is_empty());
    }
}
