//! Derived lifecycle status.
//!
//! The status reported for a task follows its dates whenever it has any.
//! The derived value is recomputed on every read and never stored.

use super::{Task, TaskStatus};
use chrono::NaiveDate;
use serde::Serialize;

/// Derives the status a task reports on `today`.
///
/// Rules, first match wins:
///
/// 1. No dates: the stored status.
/// 2. `today` before the start: pending, whatever the end.
/// 3. An end is present: in progress before it, done from it on.
/// 4. Only a start, already reached: in progress.
#[must_use]
pub fn compute_status(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    stored: TaskStatus,
    today: NaiveDate,
) -> TaskStatus {
    match (start, end) {
        (None, None) => stored,
        (Some(first), _) if today < first => TaskStatus::Pending,
        (_, Some(last)) if today < last => TaskStatus::InProgress,
        (_, Some(_)) => TaskStatus::Done,
        (Some(_), None) => TaskStatus::InProgress,
    }
}

/// Task snapshot paired with the status it reports on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    #[serde(flatten)]
    task: Task,
    derived_status: TaskStatus,
}

impl TaskView {
    /// Builds the view of `task` as of `today`.
    #[must_use]
    pub fn new(task: Task, today: NaiveDate) -> Self {
        let schedule = task.schedule();
        let derived_status = compute_status(schedule.start(), schedule.end(), task.status(), today);
        Self {
            task,
            derived_status,
        }
    }

    /// Returns the task snapshot.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the derived status.
    #[must_use]
    pub const fn derived_status(&self) -> TaskStatus {
        self.derived_status
    }

    /// Consumes the view, returning the task snapshot.
    #[must_use]
    pub fn into_task(self) -> Task {
        self.task
    }
}
