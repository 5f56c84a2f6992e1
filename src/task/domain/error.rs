//! Error types for task validation and scheduling rules.

use super::MAX_TITLE_LENGTH;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned by task constructors, transitions, and schedule checks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the storage limit.
    #[error("task title has {0} characters, at most {max} are allowed", max = MAX_TITLE_LENGTH)]
    TitleTooLong(usize),

    /// A date value could not be parsed as a calendar day.
    #[error("malformed date '{0}', expected YYYY-MM-DD or an RFC 3339 timestamp")]
    MalformedDate(String),

    /// A supplied date lies before the current calendar day.
    #[error("date {date} is in the past (today is {today})")]
    DateInPast {
        /// Rejected date.
        date: NaiveDate,
        /// Calendar day the check ran against.
        today: NaiveDate,
    },

    /// The end date precedes the start date.
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart {
        /// Effective start date.
        start: NaiveDate,
        /// Rejected end date.
        end: NaiveDate,
    },

    /// A status value is unknown.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
}

/// Error returned while parsing a task status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
