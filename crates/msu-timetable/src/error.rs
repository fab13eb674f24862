//! Error types for msu-timetable operations.
//!
//! Shape problems inside a document never produce an error; they degrade to
//! defaults. These variants cover inputs that are not documents at all and
//! explicit caller parameters.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Invalid group id: {0}")]
    InvalidGroup(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl From<serde_json::Error> for TimetableError {
    fn from(err: serde_json::Error) -> Self {
        TimetableError::InvalidDocument(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TimetableError>;
