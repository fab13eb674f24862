//! # msu-timetable
//!
//! Schedule reconciliation for a university timetable client.
//!
//! The backing store is schema-less: schedules, free rooms and teacher
//! records arrive as loosely-typed JSON where collections may be arrays or
//! index-keyed objects. This crate turns those documents into typed,
//! immutable snapshots: five lessons per day with computed slot times,
//! free-room grids, and free-room hints merged into schedule gaps.
//!
//! Everything here is pure and synchronous. Snapshots are recomputed
//! wholesale on every store update; a caller running the work off its UI
//! thread simply drops results superseded by a newer update.
//!
//! ## Modules
//!
//! - [`raw`] — Store documents and the list-or-map shape variants
//! - [`slot`] — Slot times and day names
//! - [`lesson`] — Lessons, lesson kinds, day schedules
//! - [`normalize`] — Raw days → five lessons per day
//! - [`free_rooms`] — Free-room snapshots and the day × slot grid
//! - [`reconcile`] — Free-room hints next to and between lessons
//! - [`teacher`] — Teacher schedules, search, and profile matching
//! - [`group`] — Group identifiers and the faculty catalogue
//! - [`week`] — Week date strip
//! - [`notification`] — Notification decoding and date formatting
//! - [`error`] — Error types

pub mod error;
pub mod free_rooms;
pub mod group;
pub mod lesson;
pub mod normalize;
pub mod notification;
pub mod raw;
pub mod reconcile;
pub mod slot;
pub mod teacher;
pub mod week;

pub use error::TimetableError;
pub use free_rooms::{
    build_free_room_grid, DayFreeRooms, FreeRoomGrid, FreeRoomsSnapshot, SlotFreeRooms,
};
pub use group::GroupId;
pub use lesson::{DaySchedule, Lesson, LessonKind};
pub use normalize::{
    days_from_document, group_by_day, lessons_from_document, week_dates_from_lessons,
};
pub use notification::{notifications_from_collection, Notification};
pub use raw::{FreeRoomsDocument, GroupScheduleDocument, TeacherDocument};
pub use reconcile::{annotate_day, annotate_days, annotate_teachers, slots_to_annotate};
pub use slot::{slot_time, CANONICAL_SLOT_TIMES, DAYS_PER_WEEK, SLOTS_PER_DAY};
pub use teacher::{teachers_from_collection, Teacher};
