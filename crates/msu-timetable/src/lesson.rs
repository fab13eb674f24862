//! Resolved lessons and their classification.

use serde::Serialize;

use crate::slot::{day_name, slot_time};

/// Title given to an occupied slot without a usable subject.
pub const NO_SUBJECT_TITLE: &str = "Нет предмета";

/// Title given to a slot without a lesson.
pub const FREE_SLOT_TITLE: &str = "Свободная пара";

/// Category of a lesson, derived from its free-text type label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonKind {
    Lecture,
    Practice,
    Seminar,
    Lab,
    Exam,
    Credit,
    Consultation,
    Stream,
    /// No lesson in this slot.
    FreeSlot,
    Unknown,
}

/// Substring → kind, evaluated in order. The first hit wins.
const KIND_KEYWORDS: &[(&str, LessonKind)] = &[
    ("лекция", LessonKind::Lecture),
    ("практика", LessonKind::Practice),
    ("семинар", LessonKind::Seminar),
    ("лаб", LessonKind::Lab),
    ("экзамен", LessonKind::Exam),
    ("зачет", LessonKind::Credit),
    ("консультация", LessonKind::Consultation),
    ("поток", LessonKind::Stream),
];

impl LessonKind {
    /// Classify a free-text type label by case-insensitive substring match.
    ///
    /// # Examples
    ///
    /// ```
    /// use msu_timetable::LessonKind;
    ///
    /// assert_eq!(LessonKind::classify("Лекция (поток)"), LessonKind::Lecture);
    /// assert_eq!(LessonKind::classify("лаб. работа"), LessonKind::Lab);
    /// assert_eq!(LessonKind::classify("факультатив"), LessonKind::Unknown);
    /// ```
    pub fn classify(label: &str) -> Self {
        let label = label.to_lowercase();
        KIND_KEYWORDS
            .iter()
            .find(|(keyword, _)| label.contains(keyword))
            .map(|(_, kind)| *kind)
            .unwrap_or(LessonKind::Unknown)
    }

    /// Human-readable Russian label.
    pub fn display_name(&self) -> &'static str {
        match self {
            LessonKind::Lecture => "Лекция",
            LessonKind::Practice => "Практика",
            LessonKind::Seminar => "Семинар",
            LessonKind::Lab => "Лаб. работа",
            LessonKind::Exam => "Экзамен",
            LessonKind::Credit => "Зачет",
            LessonKind::Consultation => "Консультация",
            LessonKind::Stream => "Поток",
            LessonKind::FreeSlot => "Свободно",
            LessonKind::Unknown => "Неизвестно",
        }
    }
}

/// A single resolved time slot of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lesson {
    /// `"{day}_{slot}"` for a lesson, `"window_{day}_{slot}"` for a free slot.
    pub id: String,
    pub title: String,
    /// `"HH:MM\nHH:MM"`.
    pub time: String,
    pub kind: LessonKind,
    /// Teacher for group schedules, group label for teacher schedules.
    pub teacher: String,
    pub room: String,
    /// 0 = Monday.
    pub day_index: usize,
    pub date: Option<String>,
    /// Rooms available during this slot. Only set on free slots by
    /// [`crate::reconcile`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_rooms: Option<Vec<String>>,
}

impl Lesson {
    /// Build the free-slot placeholder for a 1-based slot number.
    pub fn free_slot(
        day_name: &str,
        slot_number: usize,
        day_index: usize,
        date: Option<String>,
    ) -> Self {
        Lesson {
            id: format!("window_{day_name}_{slot_number}"),
            title: FREE_SLOT_TITLE.to_string(),
            time: slot_time(slot_number),
            kind: LessonKind::FreeSlot,
            teacher: String::new(),
            room: String::new(),
            day_index,
            date,
            free_rooms: None,
        }
    }

    pub fn is_free_slot(&self) -> bool {
        self.kind == LessonKind::FreeSlot
    }
}

/// The five lessons of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySchedule {
    pub day_index: usize,
    pub day_name: String,
    pub date: Option<String>,
    pub lessons: Vec<Lesson>,
}

impl DaySchedule {
    /// A day with five free slots, named from its index.
    pub fn empty(day_index: usize) -> Self {
        let name = day_name(day_index);
        let lessons = (1..=crate::slot::SLOTS_PER_DAY)
            .map(|slot_number| Lesson::free_slot(&name, slot_number, day_index, None))
            .collect();
        DaySchedule {
            day_index,
            day_name: name,
            date: None,
            lessons,
        }
    }

    /// Number of slots holding an actual lesson.
    pub fn occupied_count(&self) -> usize {
        self.lessons.iter().filter(|l| !l.is_free_slot()).count()
    }
}
