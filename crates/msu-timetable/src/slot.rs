//! Lesson slots: how many there are, when they happen, and what the days
//! are called.
//!
//! Every day has the same five slots. Slot 1 starts at 08:00 and lasts 90
//! minutes; after slot 3 there is an hour-long break, otherwise 15 minutes.
//! Times are rendered as `"HH:MM\nHH:MM"` (start, newline, end). Consumers
//! split on the newline, so the separator is part of the format.

/// Lesson slots per day.
pub const SLOTS_PER_DAY: usize = 5;

/// Days per week, Monday first.
pub const DAYS_PER_WEEK: usize = 7;

const FIRST_SLOT_START_MINUTES: u32 = 8 * 60;
const LESSON_MINUTES: u32 = 90;
const SHORT_BREAK_MINUTES: u32 = 15;
const LONG_BREAK_MINUTES: u32 = 60;
/// The long break follows this 1-based slot.
const LONG_BREAK_AFTER_SLOT: usize = 3;

/// Fixed time strings for slots 1..=5, used by the free-room grid.
///
/// Must stay equal to [`slot_time`]; a unit test checks the equivalence.
pub const CANONICAL_SLOT_TIMES: [&str; SLOTS_PER_DAY] = [
    "08:00\n09:30",
    "09:45\n11:15",
    "11:30\n13:00",
    "14:00\n15:30",
    "15:45\n17:15",
];

const DAY_NAMES: [&str; DAYS_PER_WEEK] = [
    "Понедельник",
    "Вторник",
    "Среда",
    "Четверг",
    "Пятница",
    "Суббота",
    "Воскресенье",
];

/// Start and end of a slot, in minutes from midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotTime {
    pub start_minutes: u32,
    pub end_minutes: u32,
}

impl SlotTime {
    /// Compute the time range of a 1-based slot number.
    ///
    /// Slot numbers past 5 keep extending the same progression; slot 0 is
    /// treated like slot 1.
    pub fn for_slot(slot_number: usize) -> Self {
        let mut start = FIRST_SLOT_START_MINUTES;
        for previous in 1..slot_number {
            start += LESSON_MINUTES;
            start += if previous == LONG_BREAK_AFTER_SLOT {
                LONG_BREAK_MINUTES
            } else {
                SHORT_BREAK_MINUTES
            };
        }
        SlotTime {
            start_minutes: start,
            end_minutes: start + LESSON_MINUTES,
        }
    }

    /// Render as `"HH:MM\nHH:MM"`.
    pub fn display(&self) -> String {
        format!(
            "{}\n{}",
            format_minutes(self.start_minutes),
            format_minutes(self.end_minutes)
        )
    }
}

/// The `"HH:MM\nHH:MM"` time string of a 1-based slot number.
///
/// # Examples
///
/// ```
/// use msu_timetable::slot::slot_time;
///
/// assert_eq!(slot_time(1), "08:00\n09:30");
/// assert_eq!(slot_time(4), "14:00\n15:30");
/// ```
pub fn slot_time(slot_number: usize) -> String {
    SlotTime::for_slot(slot_number).display()
}

/// The canonical time string of a 1-based slot number, or `""` when the
/// number is outside 1..=5.
pub fn canonical_slot_time(slot_number: usize) -> &'static str {
    slot_number
        .checked_sub(1)
        .and_then(|i| CANONICAL_SLOT_TIMES.get(i))
        .copied()
        .unwrap_or("")
}

/// Russian name of a 0-based day index (0 = Monday).
///
/// Indices past Sunday fall back to `"День N"`.
pub fn day_name(day_index: usize) -> String {
    match DAY_NAMES.get(day_index) {
        Some(name) => (*name).to_string(),
        None => format!("День {day_index}"),
    }
}

fn format_minutes(total: u32) -> String {
    format!("{:02}:{:02}", total / 60, total % 60)
}
