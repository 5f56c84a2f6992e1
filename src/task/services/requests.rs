//! Request payloads accepted by [`super::TaskService`].

use crate::task::domain::DatePatch;

/// Request payload for creating a task.
///
/// Every field except the title is optional. Dates are raw strings that are
/// validated before any storage access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub(super) title: String,
    pub(super) description: Option<String>,
    pub(super) group_id: Option<String>,
    pub(super) start_date: Option<String>,
    pub(super) end_date: Option<String>,
    pub(super) status: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request for a private task with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            group_id: None,
            start_date: None,
            end_date: None,
            status: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Scopes the task to a group.
    #[must_use]
    pub fn in_group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    /// Sets the start date.
    #[must_use]
    pub fn with_start_date(mut self, date: impl Into<String>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    /// Sets the end date.
    #[must_use]
    pub fn with_end_date(mut self, date: impl Into<String>) -> Self {
        self.end_date = Some(date.into());
        self
    }

    /// Sets the stored fallback status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Partial update of a task. Fields left unset keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    pub(super) title: Option<String>,
    pub(super) description: Option<String>,
    pub(super) start_date: DatePatch,
    pub(super) end_date: DatePatch,
    pub(super) status: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the start date; an empty value clears it.
    #[must_use]
    pub fn with_start_date(mut self, date: impl Into<String>) -> Self {
        self.start_date = DatePatch::Set(date.into());
        self
    }

    /// Clears the start date.
    #[must_use]
    pub fn clear_start_date(mut self) -> Self {
        self.start_date = DatePatch::Clear;
        self
    }

    /// Replaces the end date; an empty value clears it.
    #[must_use]
    pub fn with_end_date(mut self, date: impl Into<String>) -> Self {
        self.end_date = DatePatch::Set(date.into());
        self
    }

    /// Clears the end date.
    #[must_use]
    pub fn clear_end_date(mut self) -> Self {
        self.end_date = DatePatch::Clear;
        self
    }

    /// Replaces the stored fallback status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub(super) fn touches_schedule(&self) -> bool {
        self.start_date != DatePatch::Keep || self.end_date != DatePatch::Keep
    }
}
