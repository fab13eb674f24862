//! Study groups and their store identifiers.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::TimetableError;

/// Faculty code → display name, in presentation order.
pub const FACULTIES: &[(&str, &str)] = &[
    ("pmi", "ПМИ"),
    ("geo", "Геология"),
    ("mo", "МО"),
    ("ling", "Лингвистика"),
    ("gmu", "ГМУ"),
    ("hfmm", "ХФММ"),
];

/// Courses offered by every faculty.
pub const COURSES: std::ops::RangeInclusive<u32> = 1..=4;

/// A faculty/course pair, stored under `"{facultyCode}_{course}"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GroupId {
    pub faculty_code: String,
    pub course: u32,
}

impl GroupId {
    pub fn new(faculty_code: impl Into<String>, course: u32) -> Self {
        GroupId {
            faculty_code: faculty_code.into(),
            course,
        }
    }

    /// Like [`GroupId::new`], but only for a known faculty and course.
    pub fn checked(faculty_code: &str, course: u32) -> Result<Self, TimetableError> {
        if faculty_name(faculty_code).is_none() {
            return Err(TimetableError::InvalidGroup(format!(
                "unknown faculty '{faculty_code}'"
            )));
        }
        if !COURSES.contains(&course) {
            return Err(TimetableError::InvalidGroup(format!(
                "course {course} is outside {}..={}",
                COURSES.start(),
                COURSES.end()
            )));
        }
        Ok(GroupId::new(faculty_code, course))
    }

    /// Store path of this group's schedule, e.g. `"schedules/pmi_3"`.
    pub fn schedule_path(&self) -> String {
        format!("schedules/{self}")
    }
}

impl Default for GroupId {
    fn default() -> Self {
        GroupId::new("pmi", 3)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.faculty_code, self.course)
    }
}

impl FromStr for GroupId {
    type Err = TimetableError;

    /// Parse `"{facultyCode}_{course}"`. The course is whatever follows the
    /// last underscore.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (faculty, course) = s
            .rsplit_once('_')
            .ok_or_else(|| TimetableError::InvalidGroup(format!("missing '_' in '{s}'")))?;
        if faculty.is_empty() {
            return Err(TimetableError::InvalidGroup(format!(
                "empty faculty code in '{s}'"
            )));
        }
        let course = course
            .parse()
            .map_err(|_| TimetableError::InvalidGroup(format!("bad course in '{s}'")))?;
        Ok(GroupId::new(faculty, course))
    }
}

/// Display name of a faculty code.
pub fn faculty_name(code: &str) -> Option<&'static str> {
    FACULTIES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| *name)
}
