//! Editor-side draft checks.
//!
//! These run at the presentation boundary before a draft reaches a
//! controller. Controllers never call them and will persist whatever they
//! are handed.

use chrono::NaiveTime;
use std::error::Error;
use std::fmt::{Display, Formatter};

const TIME_OF_DAY_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// A time-of-day field is not `HH:MM`.
    InvalidTime { field: &'static str, value: String },
    /// The block would end at or before its start.
    EndNotAfterStart { start: String, end: String },
}

impl Display for DraftValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title cannot be empty"),
            Self::InvalidTime { field, value } => {
                write!(f, "{field} must be HH:MM, got `{value}`")
            }
            Self::EndNotAfterStart { start, end } => {
                write!(f, "end time {end} must be after start time {start}")
            }
        }
    }
}

impl Error for DraftValidationError {}

pub(crate) fn require_title(title: &str) -> Result<(), DraftValidationError> {
    if title.trim().is_empty() {
        return Err(DraftValidationError::EmptyTitle);
    }
    Ok(())
}

pub(crate) fn parse_time_of_day(
    field: &'static str,
    value: &str,
) -> Result<NaiveTime, DraftValidationError> {
    NaiveTime::parse_from_str(value, TIME_OF_DAY_FORMAT).map_err(|_| {
        DraftValidationError::InvalidTime {
            field,
            value: value.to_string(),
        }
    })
}
