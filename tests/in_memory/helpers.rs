//! Shared wiring for in-memory integration tests.

use std::sync::Arc;

use atelier::{
    group::{
        adapters::{RandomInviteCodeGenerator, memory::InMemoryGroupRepository},
        services::GroupService,
    },
    identity::domain::UserId,
    task::{adapters::memory::InMemoryTaskRepository, services::TaskService},
};
use chrono::{Days, Utc};
use mockable::DefaultClock;
use rstest::fixture;

/// Group service wired to in-memory repositories.
pub type Groups = GroupService<
    InMemoryGroupRepository,
    InMemoryTaskRepository,
    RandomInviteCodeGenerator,
    DefaultClock,
>;

/// Task service wired to in-memory repositories.
pub type Tasks = TaskService<InMemoryTaskRepository, InMemoryGroupRepository, DefaultClock>;

/// Both services sharing one set of repositories.
pub struct App {
    pub groups: Groups,
    pub tasks: Tasks,
}

/// Provides services backed by fresh shared repositories.
#[fixture]
pub fn app() -> App {
    let clock = Arc::new(DefaultClock);
    let group_store = Arc::new(InMemoryGroupRepository::new());
    let task_store = Arc::new(InMemoryTaskRepository::new());
    App {
        groups: GroupService::new(
            Arc::clone(&group_store),
            Arc::clone(&task_store),
            Arc::new(RandomInviteCodeGenerator::default()),
            Arc::clone(&clock),
        ),
        tasks: TaskService::new(task_store, group_store, clock),
    }
}

/// Returns a fresh actor identifier.
#[must_use]
pub fn actor() -> UserId {
    UserId::new()
}

/// Formats the calendar day `days` after today.
///
/// # Errors
///
/// Returns an error when the day is out of range.
pub fn days_from_today(days: u64) -> Result<String, eyre::Report> {
    Utc::now()
        .date_naive()
        .checked_add_days(Days::new(days))
        .map(|day| day.to_string())
        .ok_or_else(|| eyre::eyre!("date out of range"))
}

/// Formats the calendar day `days` before today.
///
/// # Errors
///
/// Returns an error when the day is out of range.
pub fn days_before_today(days: u64) -> Result<String, eyre::Report> {
    Utc::now()
        .date_naive()
        .checked_sub_days(Days::new(days))
        .map(|day| day.to_string())
        .ok_or_else(|| eyre::eyre!("date out of range"))
}
