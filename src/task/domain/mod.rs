//! Domain model for tasks, their schedules, and their derived status.
//!
//! The lifecycle and schedule modules hold the pure rules consumed by the
//! task service: [`compute_status`] derives the status reported on every
//! read and [`validate_new_schedule`] / [`apply_schedule_patch`] guard every
//! date written.

mod error;
mod ids;
mod lifecycle;
mod schedule;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use lifecycle::{TaskView, compute_status};
pub use schedule::{
    DatePatch, TaskSchedule, apply_schedule_patch, parse_calendar_day, validate_new_schedule,
};
pub use task::{
    MAX_TITLE_LENGTH, NewTask, PersistedTaskData, Task, TaskChanges, TaskStatus, TaskTitle,
};
