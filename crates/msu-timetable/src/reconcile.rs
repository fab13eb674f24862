//! "Smart" free-room merge: attach free-room lists to the free slots that
//! sit next to or between a day's actual lessons.
//!
//! For a day whose occupied slots span `min..=max` (1-based), the marked
//! slots are `min - 1` (when `min > 1`), `max + 1` (when `max < 5`), and every
//! unoccupied slot strictly between them. Only marked free slots receive a
//! room list. A day with no lessons receives nothing.

use std::collections::BTreeSet;

use crate::free_rooms::FreeRoomsSnapshot;
use crate::lesson::{DaySchedule, Lesson};
use crate::slot::SLOTS_PER_DAY;
use crate::teacher::Teacher;

/// 1-based slot numbers holding an actual lesson.
pub fn occupied_slots(lessons: &[Lesson]) -> BTreeSet<usize> {
    lessons
        .iter()
        .enumerate()
        .filter(|(_, lesson)| !lesson.is_free_slot())
        .map(|(index, _)| index + 1)
        .collect()
}

/// 1-based slot numbers that should show free rooms.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use msu_timetable::reconcile::slots_to_annotate;
///
/// let occupied = BTreeSet::from([2, 3]);
/// assert_eq!(slots_to_annotate(&occupied), BTreeSet::from([1, 4]));
///
/// let occupied = BTreeSet::from([1, 3, 5]);
/// assert_eq!(slots_to_annotate(&occupied), BTreeSet::from([2, 4]));
/// ```
pub fn slots_to_annotate(occupied: &BTreeSet<usize>) -> BTreeSet<usize> {
    let (Some(&min), Some(&max)) = (occupied.first(), occupied.last()) else {
        return BTreeSet::new();
    };

    let mut marked = BTreeSet::new();
    if min > 1 {
        marked.insert(min - 1);
    }
    if max < SLOTS_PER_DAY {
        marked.insert(max + 1);
    }
    marked.extend((min + 1..max).filter(|slot| !occupied.contains(slot)));
    marked
}

/// Annotate one day's lessons with free rooms from `snapshot`.
pub fn annotate_day(mut day: DaySchedule, snapshot: &FreeRoomsSnapshot) -> DaySchedule {
    let marked = slots_to_annotate(&occupied_slots(&day.lessons));
    for (index, lesson) in day.lessons.iter_mut().enumerate() {
        let slot_number = index + 1;
        if lesson.is_free_slot() && marked.contains(&slot_number) {
            lesson.free_rooms = Some(snapshot.rooms(day.day_index, slot_number).to_vec());
        }
    }
    day
}

/// Annotate every day of a schedule.
pub fn annotate_days(days: Vec<DaySchedule>, snapshot: &FreeRoomsSnapshot) -> Vec<DaySchedule> {
    days.into_iter()
        .map(|day| annotate_day(day, snapshot))
        .collect()
}

/// Annotate every day of every teacher.
pub fn annotate_teachers(teachers: Vec<Teacher>, snapshot: &FreeRoomsSnapshot) -> Vec<Teacher> {
    teachers
        .into_iter()
        .map(|mut teacher| {
            teacher.days = annotate_days(std::mem::take(&mut teacher.days), snapshot);
            teacher
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::LessonKind;
    use crate::raw::FreeRoomsDocument;
    use serde_json::json;

    fn day_with(day_index: usize, occupied: &[usize]) -> DaySchedule {
        let mut day = DaySchedule::empty(day_index);
        for &slot_number in occupied {
            let lesson = &mut day.lessons[slot_number - 1];
            lesson.kind = LessonKind::Lecture;
            lesson.title = format!("Lesson {slot_number}");
        }
        day
    }

    fn full_snapshot() -> FreeRoomsSnapshot {
        let mut schedule = serde_json::Map::new();
        for day in 1..=7 {
            let mut slots = serde_json::Map::new();
            for slot in 1..=5 {
                slots.insert(slot.to_string(), json!([format!("{day}-{slot}")]));
            }
            schedule.insert(day.to_string(), serde_json::Value::Object(slots));
        }
        FreeRoomsSnapshot::from_document(&FreeRoomsDocument::from_value(
            json!({ "schedule": schedule }),
        ))
    }

    fn annotated_slots(day: &DaySchedule) -> Vec<usize> {
        day.lessons
            .iter()
            .enumerate()
            .filter(|(_, l)| l.free_rooms.is_some())
            .map(|(i, _)| i + 1)
            .collect()
    }

    #[test]
    fn test_marks_one_before_and_one_after() {
        assert_eq!(
            slots_to_annotate(&BTreeSet::from([2, 3])),
            BTreeSet::from([1, 4])
        );
    }

    #[test]
    fn test_marks_internal_gaps_when_touching_both_ends() {
        assert_eq!(
            slots_to_annotate(&BTreeSet::from([1, 3, 5])),
            BTreeSet::from([2, 4])
        );
    }

    #[test]
    fn test_single_lesson_in_the_middle() {
        assert_eq!(
            slots_to_annotate(&BTreeSet::from([3])),
            BTreeSet::from([2, 4])
        );
    }

    #[test]
    fn test_no_occupied_slots_marks_nothing() {
        assert!(slots_to_annotate(&BTreeSet::new()).is_empty());
    }

    #[test]
    fn test_full_day_marks_nothing() {
        assert!(slots_to_annotate(&BTreeSet::from([1, 2, 3, 4, 5])).is_empty());
    }

    #[test]
    fn test_annotate_day_uses_matching_day_of_snapshot() {
        let day = annotate_day(day_with(2, &[2, 3]), &full_snapshot());
        assert_eq!(annotated_slots(&day), vec![1, 4]);
        assert_eq!(day.lessons[0].free_rooms.as_deref(), Some(&["3-1".to_string()][..]));
        assert_eq!(day.lessons[3].free_rooms.as_deref(), Some(&["3-4".to_string()][..]));
        assert!(day.lessons[4].free_rooms.is_none());
        assert!(day.lessons[1].free_rooms.is_none());
    }

    #[test]
    fn test_empty_day_gets_no_annotations() {
        let day = annotate_day(day_with(0, &[]), &full_snapshot());
        assert!(annotated_slots(&day).is_empty());
    }

    #[test]
    fn test_marked_slot_without_rooms_gets_empty_list() {
        let day = annotate_day(day_with(0, &[1]), &FreeRoomsSnapshot::default());
        assert_eq!(annotated_slots(&day), vec![2]);
        assert_eq!(day.lessons[1].free_rooms.as_deref(), Some(&[][..]));
    }

    #[test]
    fn test_annotate_teachers_touches_every_day() {
        let teacher = Teacher {
            id: "ivanov_i_i".into(),
            name: "ivanov.i.i".into(),
            days: vec![day_with(0, &[1, 5]), day_with(1, &[])],
        };
        let annotated = annotate_teachers(vec![teacher], &full_snapshot());
        assert_eq!(annotated_slots(&annotated[0].days[0]), vec![2, 3, 4]);
        assert!(annotated_slots(&annotated[0].days[1]).is_empty());
    }
}
