//! Task schedules and the date rules applied before any write.
//!
//! Dates are calendar days. Time-of-day never takes part in a comparison,
//! so a task starting today is accepted all day long.

use super::TaskDomainError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

const CALENDAR_DAY_FORMAT: &str = "%Y-%m-%d";

/// Optional start and end days of a task.
///
/// When both days are present the end never precedes the start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskSchedule {
    #[serde(rename = "start_date")]
    start: Option<NaiveDate>,
    #[serde(rename = "end_date")]
    end: Option<NaiveDate>,
}

impl TaskSchedule {
    /// Creates a schedule from optional start and end days.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EndBeforeStart`] when `end < start`.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, TaskDomainError> {
        match (start, end) {
            (Some(first), Some(last)) if last < first => Err(TaskDomainError::EndBeforeStart {
                start: first,
                end: last,
            }),
            _ => Ok(Self { start, end }),
        }
    }

    /// Returns a schedule without dates.
    #[must_use]
    pub const fn unscheduled() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Returns the start day.
    #[must_use]
    pub const fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    /// Returns the end day.
    #[must_use]
    pub const fn end(&self) -> Option<NaiveDate> {
        self.end
    }
}

/// Requested change to one date of an existing schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DatePatch {
    /// Leave the date as it is.
    #[default]
    Keep,
    /// Remove the date.
    Clear,
    /// Replace the date with a raw value; an empty value clears it.
    Set(String),
}

/// Parses a calendar day.
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, which is reduced to its
/// UTC calendar day.
///
/// # Errors
///
/// Returns [`TaskDomainError::MalformedDate`] when neither format matches.
pub fn parse_calendar_day(raw: &str) -> Result<NaiveDate, TaskDomainError> {
    let value = raw.trim();
    NaiveDate::parse_from_str(value, CALENDAR_DAY_FORMAT)
        .or_else(|_| {
            DateTime::parse_from_rfc3339(value)
                .map(|instant| instant.with_timezone(&Utc).date_naive())
        })
        .map_err(|_| TaskDomainError::MalformedDate(raw.to_owned()))
}

/// Validates the dates supplied when a task is created.
///
/// Absent or empty values leave the corresponding day unset.
///
/// # Errors
///
/// Returns [`TaskDomainError::MalformedDate`] for unparsable input,
/// [`TaskDomainError::DateInPast`] when a day precedes `today`, and
/// [`TaskDomainError::EndBeforeStart`] when the end precedes the start.
pub fn validate_new_schedule(
    start: Option<&str>,
    end: Option<&str>,
    today: NaiveDate,
) -> Result<TaskSchedule, TaskDomainError> {
    let start_day = start.map(|raw| supplied_day(raw, today)).transpose()?.flatten();
    let end_day = end.map(|raw| supplied_day(raw, today)).transpose()?.flatten();
    TaskSchedule::new(start_day, end_day)
}

/// Applies a partial date update to an existing schedule.
///
/// Only the days named by a patch are validated against `today`; kept days
/// are taken as stored. The end is always checked against the resulting
/// start, whether that start is new or kept.
///
/// # Errors
///
/// Returns the same errors as [`validate_new_schedule`].
pub fn apply_schedule_patch(
    current: TaskSchedule,
    start: &DatePatch,
    end: &DatePatch,
    today: NaiveDate,
) -> Result<TaskSchedule, TaskDomainError> {
    let start_day = patched_day(current.start, start, today)?;
    let end_day = patched_day(current.end, end, today)?;
    TaskSchedule::new(start_day, end_day)
}

fn patched_day(
    current: Option<NaiveDate>,
    patch: &DatePatch,
    today: NaiveDate,
) -> Result<Option<NaiveDate>, TaskDomainError> {
    match patch {
        DatePatch::Keep => Ok(current),
        DatePatch::Clear => Ok(None),
        DatePatch::Set(raw) => supplied_day(raw, today),
    }
}

fn supplied_day(raw: &str, today: NaiveDate) -> Result<Option<NaiveDate>, TaskDomainError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let date = parse_calendar_day(raw)?;
    if date < today {
        return Err(TaskDomainError::DateInPast { date, today });
    }
    Ok(Some(date))
}
