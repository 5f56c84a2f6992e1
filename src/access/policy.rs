//! Group and task authorization predicates.

use crate::{
    group::domain::{Group, GroupId},
    identity::domain::UserId,
    task::domain::{Task, TaskId},
};
use thiserror::Error;

/// Reason an authenticated actor was refused.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AccessDenied {
    /// The actor does not belong to the group.
    #[error("user {actor} is not a member of group {group}")]
    NotGroupMember {
        /// Refused actor.
        actor: UserId,
        /// Group the actor tried to reach.
        group: GroupId,
    },

    /// The operation is reserved to the group owner.
    #[error("user {actor} does not own group {group}")]
    NotGroupOwner {
        /// Refused actor.
        actor: UserId,
        /// Group the actor tried to change.
        group: GroupId,
    },

    /// The actor neither created the task nor belongs to its group.
    #[error("user {actor} may not access task {task}")]
    NotTaskCollaborator {
        /// Refused actor.
        actor: UserId,
        /// Task the actor tried to reach.
        task: TaskId,
    },
}

/// Returns `true` when `actor` owns `group`.
#[must_use]
pub fn is_owner(actor: UserId, group: &Group) -> bool {
    group.owner() == actor
}

/// Returns `true` when `actor` belongs to `group`.
#[must_use]
pub fn is_member(actor: UserId, group: &Group) -> bool {
    group.has_member(actor)
}

/// Returns `true` when `actor` created `task`.
#[must_use]
pub fn is_creator(actor: UserId, task: &Task) -> bool {
    task.created_by() == actor
}

/// Members may read a group.
///
/// # Errors
///
/// Returns [`AccessDenied::NotGroupMember`] for non-members.
pub fn authorize_group_read(actor: UserId, group: &Group) -> Result<(), AccessDenied> {
    require_member(actor, group)
}

/// Only the owner may rename a group.
///
/// # Errors
///
/// Returns [`AccessDenied::NotGroupOwner`] for anyone else.
pub fn authorize_group_rename(actor: UserId, group: &Group) -> Result<(), AccessDenied> {
    require_owner(actor, group)
}

/// Only the owner may remove members.
///
/// Whether the removal itself is valid is decided by the group aggregate.
///
/// # Errors
///
/// Returns [`AccessDenied::NotGroupOwner`] for anyone else.
pub fn authorize_member_removal(actor: UserId, group: &Group) -> Result<(), AccessDenied> {
    require_owner(actor, group)
}

/// Only members may leave a group.
///
/// # Errors
///
/// Returns [`AccessDenied::NotGroupMember`] for non-members.
pub fn authorize_group_leave(actor: UserId, group: &Group) -> Result<(), AccessDenied> {
    require_member(actor, group)
}

/// Only the owner may delete a group.
///
/// # Errors
///
/// Returns [`AccessDenied::NotGroupOwner`] for anyone else.
pub fn authorize_group_delete(actor: UserId, group: &Group) -> Result<(), AccessDenied> {
    require_owner(actor, group)
}

/// Decides whether `actor` may create a task in `group`.
///
/// Private tasks (`group` is `None`) are open to every authenticated actor.
///
/// # Errors
///
/// Returns [`AccessDenied::NotGroupMember`] when the target group does not
/// include the actor.
pub fn authorize_task_creation(actor: UserId, group: Option<&Group>) -> Result<(), AccessDenied> {
    group.map_or(Ok(()), |target| require_member(actor, target))
}

/// Decides whether `actor` may read a single task.
///
/// `group` is the group the task references, when it still exists.
///
/// # Errors
///
/// Returns [`AccessDenied::NotTaskCollaborator`] when the actor is neither
/// the creator nor a member of the task's group.
pub fn authorize_task_read(
    actor: UserId,
    task: &Task,
    group: Option<&Group>,
) -> Result<(), AccessDenied> {
    require_collaborator(actor, task, group)
}

/// Decides whether `actor` may update or delete a task.
///
/// The creator always may. Otherwise the actor must belong to the group
/// the task references. A dangling group reference leaves only the creator.
///
/// # Errors
///
/// Returns [`AccessDenied::NotTaskCollaborator`] when neither rule applies.
pub fn authorize_task_mutation(
    actor: UserId,
    task: &Task,
    group: Option<&Group>,
) -> Result<(), AccessDenied> {
    require_collaborator(actor, task, group)
}

/// Returns `true` when `task` belongs in the listing of `actor`.
///
/// `member_of` lists every group the actor belongs to. Private tasks are
/// listed for their creator only; group tasks for the group's members only.
#[must_use]
pub fn is_task_visible(actor: UserId, task: &Task, member_of: &[GroupId]) -> bool {
    match task.group_id() {
        None => is_creator(actor, task),
        Some(group) => member_of.contains(&group),
    }
}

fn require_member(actor: UserId, group: &Group) -> Result<(), AccessDenied> {
    if is_member(actor, group) {
        return Ok(());
    }
    Err(AccessDenied::NotGroupMember {
        actor,
        group: group.id(),
    })
}

fn require_owner(actor: UserId, group: &Group) -> Result<(), AccessDenied> {
    if is_owner(actor, group) {
        return Ok(());
    }
    Err(AccessDenied::NotGroupOwner {
        actor,
        group: group.id(),
    })
}

fn require_collaborator(
    actor: UserId,
    task: &Task,
    group: Option<&Group>,
) -> Result<(), AccessDenied> {
    if is_creator(actor, task) {
        return Ok(());
    }
    let shares_group = task.group_id().is_some_and(|task_group| {
        group.is_some_and(|loaded| loaded.id() == task_group && is_member(actor, loaded))
    });
    if shares_group {
        return Ok(());
    }
    Err(AccessDenied::NotTaskCollaborator {
        actor,
        task: task.id(),
    })
}
