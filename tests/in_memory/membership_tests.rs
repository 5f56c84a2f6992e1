//! Membership flows across the group and task services.

use super::helpers::{App, actor, app};
use atelier::{
    error::ServiceError,
    group::services::{CreateGroupRequest, JoinGroupRequest},
    task::services::CreateTaskRequest,
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn joined_member_sees_group_tasks_until_removed(app: App) -> Result<(), eyre::Report> {
    let owner = actor();
    let member = actor();
    let group = app
        .groups
        .create_group(owner, CreateGroupRequest::new("Garden"))
        .await?;
    let group_id = group.id().to_string();
    app.tasks
        .create_task(owner, CreateTaskRequest::new("Water tomatoes").in_group(group_id.clone()))
        .await?;

    eyre::ensure!(
        app.tasks.list_tasks(member).await?.is_empty(),
        "outsider must not see group tasks"
    );
    app.groups
        .join_group(member, JoinGroupRequest::new(group.invite_code().as_str()))
        .await?;
    eyre::ensure!(
        app.tasks.list_tasks(member).await?.len() == 1,
        "member must see the group task"
    );

    app.groups
        .remove_member(owner, &group_id, &member.to_string())
        .await?;
    eyre::ensure!(
        app.tasks.list_tasks(member).await?.is_empty(),
        "removed member must not see group tasks"
    );
    let refused = app.tasks.list_group_tasks(member, &group_id).await;
    eyre::ensure!(
        matches!(refused, Err(ServiceError::Forbidden(_))),
        "removed member must not list group tasks"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn member_who_left_keeps_control_of_own_task(app: App) -> Result<(), eyre::Report> {
    let owner = actor();
    let member = actor();
    let group = app
        .groups
        .create_group(owner, CreateGroupRequest::new("Kitchen"))
        .await?;
    let group_id = group.id().to_string();
    app.groups
        .join_group(member, JoinGroupRequest::new(group.invite_code().as_str()))
        .await?;
    let created = app
        .tasks
        .create_task(member, CreateTaskRequest::new("Descale kettle").in_group(group_id.clone()))
        .await?;

    app.groups.leave_group(member, &group_id).await?;

    let task_id = created.task().id().to_string();
    app.tasks.get_task(member, &task_id).await?;
    app.tasks.get_task(owner, &task_id).await?;
    app.tasks.delete_task(owner, &task_id).await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn owner_lists_every_group_they_belong_to(app: App) -> Result<(), eyre::Report> {
    let owner = actor();
    let other = actor();
    let first = app
        .groups
        .create_group(owner, CreateGroupRequest::new("First"))
        .await?;
    let foreign = app
        .groups
        .create_group(other, CreateGroupRequest::new("Foreign"))
        .await?;
    app.groups
        .join_group(owner, JoinGroupRequest::new(foreign.invite_code().as_str()))
        .await?;

    let listed: Vec<_> = app
        .groups
        .list_groups(owner)
        .await?
        .iter()
        .map(|group| group.id())
        .collect();
    eyre::ensure!(listed.len() == 2, "expected two groups, found {}", listed.len());
    eyre::ensure!(
        listed.contains(&first.id()) && listed.contains(&foreign.id()),
        "owned and joined groups must both be listed"
    );
    Ok(())
}
