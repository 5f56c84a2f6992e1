//! When steps for group collaboration BDD scenarios.

use super::world::{CollaborationWorld, run_async};
use atelier::task::services::CreateTaskRequest;
use rstest_bdd_macros::when;

#[when(r#""{name}" creates a task "{title}" in the group"#)]
fn user_creates_group_task(
    world: &mut CollaborationWorld,
    name: String,
    title: String,
) -> Result<(), eyre::Report> {
    let creator = world.actor(&name)?;
    let group_id = world.current_group()?.id().to_string();
    let request = CreateTaskRequest::new(title).in_group(group_id);
    world.last_task_result = Some(run_async(world.tasks.create_task(creator, request)));
    Ok(())
}

#[when(r#""{name}" deletes the group"#)]
fn user_deletes_group(world: &mut CollaborationWorld, name: String) -> Result<(), eyre::Report> {
    let actor = world.actor(&name)?;
    let group_id = world.current_group()?.id().to_string();
    world.last_deletion = Some(run_async(world.groups.delete_group(actor, &group_id)));
    Ok(())
}
