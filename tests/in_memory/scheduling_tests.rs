//! Date validation and derived status through the task service.

use super::helpers::{App, actor, app, days_before_today, days_from_today};
use atelier::{
    error::{ServiceError, ValidationFailure},
    task::{
        domain::{TaskDomainError, TaskStatus},
        services::{CreateTaskRequest, UpdateTaskRequest},
    },
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_starting_today_is_in_progress(app: App) -> Result<(), eyre::Report> {
    let view = app
        .tasks
        .create_task(
            actor(),
            CreateTaskRequest::new("Daily standup")
                .with_start_date(days_from_today(0)?)
                .with_end_date(days_from_today(1)?),
        )
        .await?;

    eyre::ensure!(
        view.derived_status() == TaskStatus::InProgress,
        "task started today must be in progress"
    );
    eyre::ensure!(
        view.task().status() == TaskStatus::Pending,
        "stored status must stay pending"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn yesterday_is_rejected_on_update(app: App) -> Result<(), eyre::Report> {
    let creator = actor();
    let created = app
        .tasks
        .create_task(creator, CreateTaskRequest::new("Renew passport"))
        .await?;
    let task_id = created.task().id().to_string();

    let result = app
        .tasks
        .update_task(
            creator,
            &task_id,
            UpdateTaskRequest::new().with_start_date(days_before_today(1)?),
        )
        .await;

    eyre::ensure!(
        matches!(
            result,
            Err(ServiceError::Validation(ValidationFailure::Task(
                TaskDomainError::DateInPast { .. }
            )))
        ),
        "past start date must be rejected"
    );
    let stored = app.tasks.get_task(creator, &task_id).await?;
    eyre::ensure!(stored.task() == created.task(), "task must be unchanged");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rfc3339_timestamps_are_reduced_to_their_day(app: App) -> Result<(), eyre::Report> {
    let tomorrow = days_from_today(1)?;
    let view = app
        .tasks
        .create_task(
            actor(),
            CreateTaskRequest::new("Book tickets").with_end_date(format!("{tomorrow}T12:00:00Z")),
        )
        .await?;

    eyre::ensure!(
        view.task().schedule().end().map(|day| day.to_string()) == Some(tomorrow),
        "end date must keep only the calendar day"
    );
    eyre::ensure!(
        view.derived_status() == TaskStatus::InProgress,
        "task due tomorrow must be in progress"
    );
    Ok(())
}
