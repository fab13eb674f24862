//! Raw day records → five resolved lessons per day.
//!
//! Two output forms exist. [`days_from_document`] keeps the day grouping;
//! [`lessons_from_document`] flattens every day into one list stably sorted
//! by time string. Since every day shares the same slot times, the flattened
//! sort interleaves days (all first slots, then all second slots, ...) and
//! callers that want per-day lists regroup with [`group_by_day`].

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::lesson::{DaySchedule, Lesson, LessonKind, NO_SUBJECT_TITLE};
use crate::raw::{GroupScheduleDocument, Indexed, RawDay, RawLesson};
use crate::slot::{day_name, slot_time, DAYS_PER_WEEK, SLOTS_PER_DAY};

/// Resolve one raw day into exactly five lessons, in slot order.
///
/// `day_index` is the position of the day after ordering (0 = Monday).
pub fn normalize_day(day_index: usize, raw: &RawDay<'_>) -> DaySchedule {
    let name = resolve_day_name(day_index, raw.label);
    let date = raw.date.map(str::to_string);
    let slots = slot_objects(raw.lessons);

    let lessons = (0..SLOTS_PER_DAY)
        .map(|slot_index| {
            let slot_number = slot_index + 1;
            match slots.get(&(slot_index as i64)) {
                Some(object) => build_lesson(
                    &name,
                    slot_number,
                    day_index,
                    &RawLesson::from_object(object),
                    date.clone(),
                ),
                None => Lesson::free_slot(&name, slot_number, day_index, date.clone()),
            }
        })
        .collect();

    DaySchedule {
        day_index,
        day_name: name,
        date,
        lessons,
    }
}

/// Resolve every raw day, numbering them by position.
pub fn normalize_days(raw_days: &[RawDay<'_>]) -> Vec<DaySchedule> {
    raw_days
        .iter()
        .enumerate()
        .map(|(day_index, raw)| normalize_day(day_index, raw))
        .collect()
}

/// Day-grouped lessons of a group schedule document.
pub fn days_from_document(document: &GroupScheduleDocument) -> Vec<DaySchedule> {
    let days = normalize_days(&document.raw_days());
    trace!(days = days.len(), "normalized group schedule");
    days
}

/// All lessons of a group schedule document, stably sorted by time string.
pub fn lessons_from_document(document: &GroupScheduleDocument) -> Vec<Lesson> {
    let mut lessons: Vec<Lesson> = days_from_document(document)
        .into_iter()
        .flat_map(|day| day.lessons)
        .collect();
    lessons.sort_by(|a, b| a.time.cmp(&b.time));
    lessons
}

/// Regroup a flattened lesson list by day index, keeping relative order.
pub fn group_by_day(lessons: &[Lesson]) -> BTreeMap<usize, Vec<Lesson>> {
    let mut grouped: BTreeMap<usize, Vec<Lesson>> = BTreeMap::new();
    for lesson in lessons {
        grouped
            .entry(lesson.day_index)
            .or_default()
            .push(lesson.clone());
    }
    grouped
}

/// Calendar date of each weekday as carried by the lessons.
///
/// Always seven entries, Monday first; a day without a dated lesson gets
/// `""`. When several lessons of a day carry dates, the last one wins.
pub fn week_dates_from_lessons(lessons: &[Lesson]) -> Vec<String> {
    let mut dates = vec![String::new(); DAYS_PER_WEEK];
    for lesson in lessons {
        if let (Some(date), Some(slot)) = (&lesson.date, dates.get_mut(lesson.day_index)) {
            *slot = date.clone();
        }
    }
    dates
}

fn resolve_day_name(day_index: usize, label: Option<&str>) -> String {
    label
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| day_name(day_index))
}

/// Slot objects by 0-based slot index.
///
/// Keys that do not parse as integers are dropped, as are non-object values.
fn slot_objects(lessons: Indexed<'_>) -> BTreeMap<i64, &Map<String, Value>> {
    let mut slots = BTreeMap::new();
    for (key, value) in lessons.entries() {
        let Some(index) = key.as_index() else {
            debug!(?key, "dropping slot with non-numeric key");
            continue;
        };
        if let Some(object) = value.as_object() {
            slots.insert(index, object);
        }
    }
    slots
}

fn build_lesson(
    day_name: &str,
    slot_number: usize,
    day_index: usize,
    raw: &RawLesson<'_>,
    date: Option<String>,
) -> Lesson {
    let title = raw
        .subject
        .as_single()
        .filter(|subject| !subject.trim().is_empty())
        .unwrap_or(NO_SUBJECT_TITLE)
        .to_string();
    let kind = raw
        .kind_label
        .as_single()
        .map(LessonKind::classify)
        .unwrap_or(LessonKind::Unknown);

    Lesson {
        id: format!("{day_name}_{slot_number}"),
        title,
        time: slot_time(slot_number),
        kind,
        teacher: raw.teacher.joined(),
        room: raw.rooms.joined(),
        day_index,
        date,
        free_rooms: None,
    }
}
