//! Then steps for group collaboration BDD scenarios.

use super::world::{CollaborationWorld, run_async};
use atelier::{
    error::ServiceError,
    task::ports::{TaskFilter, TaskRepository},
};
use rstest_bdd_macros::then;

#[then("the request is forbidden")]
fn request_is_forbidden(world: &CollaborationWorld) -> Result<(), eyre::Report> {
    match world.last_task_result.as_ref() {
        Some(Err(ServiceError::Forbidden(_))) => Ok(()),
        Some(other) => Err(eyre::eyre!("expected forbidden, found {other:?}")),
        None => Err(eyre::eyre!("missing task result in scenario world")),
    }
}

#[then(r#"the task is created by "{name}""#)]
fn task_created_by(world: &mut CollaborationWorld, name: String) -> Result<(), eyre::Report> {
    let expected = world.actor(&name)?;
    let view = world
        .last_task_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task result in scenario world"))?
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected task creation failure: {err}"))?;
    eyre::ensure!(
        view.task().created_by() == expected,
        "task creator mismatch"
    );
    Ok(())
}

#[then("the group has {count:u64} tasks")]
fn group_task_count(world: &CollaborationWorld, count: u64) -> Result<(), eyre::Report> {
    let group_id = world.current_group()?.id();
    let tasks = run_async(world.task_store.find(&TaskFilter::InGroup(group_id)))
        .map_err(|err| eyre::eyre!("task lookup failed: {err}"))?;
    let found = u64::try_from(tasks.len())?;
    eyre::ensure!(found == count, "expected {count} tasks, found {found}");
    Ok(())
}

#[then("the deletion reports {count:u64} removed tasks")]
fn deletion_reports(world: &CollaborationWorld, count: u64) -> Result<(), eyre::Report> {
    let deletion = world
        .last_deletion
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing deletion result in scenario world"))?
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected deletion failure: {err}"))?;
    eyre::ensure!(
        deletion.deleted_tasks == count,
        "expected {count} removed tasks, found {}",
        deletion.deleted_tasks
    );
    Ok(())
}

#[then("the deletion is forbidden")]
fn deletion_is_forbidden(world: &CollaborationWorld) -> Result<(), eyre::Report> {
    match world.last_deletion.as_ref() {
        Some(Err(ServiceError::Forbidden(_))) => Ok(()),
        Some(other) => Err(eyre::eyre!("expected forbidden, found {other:?}")),
        None => Err(eyre::eyre!("missing deletion result in scenario world")),
    }
}

#[then(r#"the group is no longer found for "{name}""#)]
fn group_not_found(world: &mut CollaborationWorld, name: String) -> Result<(), eyre::Report> {
    let actor = world.actor(&name)?;
    let group_id = world.current_group()?.id().to_string();
    match run_async(world.groups.get_group(actor, &group_id)) {
        Err(ServiceError::NotFound(_)) => Ok(()),
        other => Err(eyre::eyre!("expected not found, found {other:?}")),
    }
}

fn listed_titles(world: &mut CollaborationWorld, name: &str) -> Result<Vec<String>, eyre::Report> {
    let actor = world.actor(name)?;
    let views = run_async(world.tasks.list_tasks(actor))
        .map_err(|err| eyre::eyre!("listing failed: {err}"))?;
    Ok(views
        .iter()
        .map(|view| view.task().title().as_str().to_owned())
        .collect())
}

#[then(r#""{name}" sees the task "{title}""#)]
fn user_sees_task(
    world: &mut CollaborationWorld,
    name: String,
    title: String,
) -> Result<(), eyre::Report> {
    let titles = listed_titles(world, &name)?;
    eyre::ensure!(titles.contains(&title), "{name} should see {title}");
    Ok(())
}

#[then(r#""{name}" does not see the task "{title}""#)]
fn user_does_not_see_task(
    world: &mut CollaborationWorld,
    name: String,
    title: String,
) -> Result<(), eyre::Report> {
    let titles = listed_titles(world, &name)?;
    eyre::ensure!(!titles.contains(&title), "{name} should not see {title}");
    Ok(())
}
