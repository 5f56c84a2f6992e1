//! Given steps for group collaboration BDD scenarios.

use super::world::{CollaborationWorld, run_async};
use atelier::{
    group::services::{CreateGroupRequest, JoinGroupRequest},
    task::services::CreateTaskRequest,
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a group "{name}" owned by "{owner}""#)]
fn group_owned_by(
    world: &mut CollaborationWorld,
    name: String,
    owner: String,
) -> Result<(), eyre::Report> {
    let owner_id = world.actor(&owner)?;
    let group = run_async(
        world
            .groups
            .create_group(owner_id, CreateGroupRequest::new(name)),
    )
    .wrap_err("create scenario group")?;
    world.group = Some(group);
    Ok(())
}

#[given(r#"a registered user "{name}""#)]
fn registered_user(world: &mut CollaborationWorld, name: String) -> Result<(), eyre::Report> {
    world.actor(&name)?;
    Ok(())
}

#[given(r#""{name}" has joined the group"#)]
fn user_joined_group(world: &mut CollaborationWorld, name: String) -> Result<(), eyre::Report> {
    let member = world.actor(&name)?;
    let code = world.current_group()?.invite_code().as_str().to_owned();
    let joined = run_async(world.groups.join_group(member, JoinGroupRequest::new(code)))
        .wrap_err("join scenario group")?;
    world.group = Some(joined);
    Ok(())
}

#[given(r#""{name}" has created {count:u64} tasks in the group"#)]
fn user_created_group_tasks(
    world: &mut CollaborationWorld,
    name: String,
    count: u64,
) -> Result<(), eyre::Report> {
    let creator = world.actor(&name)?;
    let group_id = world.current_group()?.id().to_string();
    for index in 0..count {
        let request =
            CreateTaskRequest::new(format!("Chapter {index}")).in_group(group_id.clone());
        run_async(world.tasks.create_task(creator, request)).wrap_err("create group task")?;
    }
    Ok(())
}

#[given(r#""{name}" has created a private task "{title}""#)]
fn user_created_private_task(
    world: &mut CollaborationWorld,
    name: String,
    title: String,
) -> Result<(), eyre::Report> {
    let creator = world.actor(&name)?;
    run_async(
        world
            .tasks
            .create_task(creator, CreateTaskRequest::new(title)),
    )
    .wrap_err("create private task")?;
    Ok(())
}
