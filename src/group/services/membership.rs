//! Group orchestration: creation, membership changes, and cascade delete.

use crate::{
    access,
    error::{Resource, ServiceError, ServiceResult},
    group::{
        domain::{Group, GroupDomainError, GroupId, GroupName, InviteCode},
        ports::{GroupRepository, GroupRepositoryError, InviteCodeGenerator},
    },
    identity::domain::UserId,
    task::ports::TaskRepository,
};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;

/// Number of generated invite codes tried before creation gives up.
pub const MAX_INVITE_CODE_ATTEMPTS: usize = 5;

/// Request payload for creating a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGroupRequest {
    name: String,
}

impl CreateGroupRequest {
    /// Creates a request for a group named `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Request payload for joining a group through its invite code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinGroupRequest {
    invite_code: String,
}

impl JoinGroupRequest {
    /// Creates a join request.
    #[must_use]
    pub fn new(invite_code: impl Into<String>) -> Self {
        Self {
            invite_code: invite_code.into(),
        }
    }
}

/// Request payload for renaming a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameGroupRequest {
    name: String,
}

impl RenameGroupRequest {
    /// Creates a rename request.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Outcome of a group deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupDeletion {
    /// Deleted group.
    pub group_id: GroupId,
    /// Number of tasks removed with the group.
    pub deleted_tasks: u64,
}

/// Group lifecycle and membership service.
#[derive(Clone)]
pub struct GroupService<G, T, I, C>
where
    G: GroupRepository,
    T: TaskRepository,
    I: InviteCodeGenerator,
    C: Clock + Send + Sync,
{
    groups: Arc<G>,
    tasks: Arc<T>,
    invite_codes: Arc<I>,
    clock: Arc<C>,
}

impl<G, T, I, C> GroupService<G, T, I, C>
where
    G: GroupRepository,
    T: TaskRepository,
    I: InviteCodeGenerator,
    C: Clock + Send + Sync,
{
    /// Creates a new group service.
    #[must_use]
    pub const fn new(groups: Arc<G>, tasks: Arc<T>, invite_codes: Arc<I>, clock: Arc<C>) -> Self {
        Self {
            groups,
            tasks,
            invite_codes,
            clock,
        }
    }

    /// Creates a group owned by `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] for a blank name and
    /// [`ServiceError::Storage`] when no free invite code was found or
    /// persistence fails.
    pub async fn create_group(
        &self,
        actor: UserId,
        request: CreateGroupRequest,
    ) -> ServiceResult<Group> {
        let name = GroupName::new(request.name)?;
        let invite_code = self.allocate_invite_code().await?;

        let group = Group::new(name, actor, invite_code, &*self.clock);
        self.groups.store(&group).await?;
        tracing::info!(group_id = %group.id(), owner = %actor, "group created");
        Ok(group)
    }

    /// Lists the groups `actor` belongs to, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] when the lookup fails.
    pub async fn list_groups(&self, actor: UserId) -> ServiceResult<Vec<Group>> {
        Ok(self.groups.list_for_member(actor).await?)
    }

    /// Returns a group to one of its members.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidIdentifier`], [`ServiceError::NotFound`],
    /// or [`ServiceError::Forbidden`] for non-members.
    pub async fn get_group(&self, actor: UserId, group_id: &str) -> ServiceResult<Group> {
        let group = self.load_group(GroupId::parse(group_id)?).await?;
        access::authorize_group_read(actor, &group)?;
        Ok(group)
    }

    /// Adds `actor` to the group using its invite code.
    ///
    /// Joining a group the actor already belongs to changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] for a blank code and
    /// [`ServiceError::NotFound`] for any other code no group uses,
    /// malformed ones included.
    pub async fn join_group(&self, actor: UserId, request: JoinGroupRequest) -> ServiceResult<Group> {
        let code = match InviteCode::new(request.invite_code) {
            Ok(code) => code,
            // No group can carry a malformed code.
            Err(GroupDomainError::InvalidInviteCode(raw)) => {
                return Err(ServiceError::NotFound(Resource::InviteCode(raw)));
            }
            Err(err) => return Err(err.into()),
        };
        let group = self
            .groups
            .find_by_invite_code(&code)
            .await?
            .ok_or_else(|| ServiceError::NotFound(Resource::InviteCode(code.to_string())))?;
        if group.has_member(actor) {
            return Ok(group);
        }

        let joined = group.with_member(actor, &*self.clock);
        self.groups.update(&joined).await?;
        tracing::info!(group_id = %joined.id(), user_id = %actor, "member joined group");
        Ok(joined)
    }

    /// Renames a group.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Forbidden`] unless the actor owns the group,
    /// and [`ServiceError::Validation`] for a blank name.
    pub async fn rename_group(
        &self,
        actor: UserId,
        group_id: &str,
        request: RenameGroupRequest,
    ) -> ServiceResult<Group> {
        let group = self.load_group(GroupId::parse(group_id)?).await?;
        access::authorize_group_rename(actor, &group)?;
        let name = GroupName::new(request.name)?;

        let renamed = group.renamed(name, &*self.clock);
        self.groups.update(&renamed).await?;
        tracing::info!(group_id = %renamed.id(), "group renamed");
        Ok(renamed)
    }

    /// Removes `member_id` from the group.
    ///
    /// Removing a user who is not a member succeeds without writing.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Forbidden`] unless the actor owns the group,
    /// and [`ServiceError::Validation`] when `member_id` names the owner.
    pub async fn remove_member(
        &self,
        actor: UserId,
        group_id: &str,
        member_id: &str,
    ) -> ServiceResult<Group> {
        let id = GroupId::parse(group_id)?;
        let member = UserId::parse(member_id)?;
        let group = self.load_group(id).await?;
        access::authorize_member_removal(actor, &group)?;

        let was_member = group.has_member(member);
        let updated = group.without_member(member, &*self.clock)?;
        if was_member {
            self.groups.update(&updated).await?;
            tracing::info!(group_id = %id, user_id = %member, "member removed from group");
        }
        Ok(updated)
    }

    /// Removes `actor` from a group they belong to.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Forbidden`] for non-members and
    /// [`ServiceError::Validation`] when the owner tries to leave.
    pub async fn leave_group(&self, actor: UserId, group_id: &str) -> ServiceResult<()> {
        let group = self.load_group(GroupId::parse(group_id)?).await?;
        access::authorize_group_leave(actor, &group)?;

        let updated = group.after_leave(actor, &*self.clock)?;
        self.groups.update(&updated).await?;
        tracing::info!(group_id = %updated.id(), user_id = %actor, "member left group");
        Ok(())
    }

    /// Deletes a group together with every task that references it.
    ///
    /// Tasks are deleted first and the group second, in two separate storage
    /// calls. If the second call fails the tasks stay deleted and the group
    /// survives.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Forbidden`] unless the actor owns the group,
    /// or [`ServiceError::Storage`] when either phase fails.
    pub async fn delete_group(&self, actor: UserId, group_id: &str) -> ServiceResult<GroupDeletion> {
        let group = self.load_group(GroupId::parse(group_id)?).await?;
        access::authorize_group_delete(actor, &group)?;
        let id = group.id();

        let deleted_tasks = self.tasks.delete_by_group(id).await?;
        self.groups.delete(id).await.inspect_err(|err| {
            tracing::warn!(
                group_id = %id,
                deleted_tasks,
                error = %err,
                "group tasks deleted but group deletion failed"
            );
        })?;

        tracing::info!(group_id = %id, deleted_tasks, "group deleted");
        Ok(GroupDeletion {
            group_id: id,
            deleted_tasks,
        })
    }

    async fn load_group(&self, id: GroupId) -> ServiceResult<Group> {
        self.groups
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(Resource::Group(id)))
    }

    async fn allocate_invite_code(&self) -> ServiceResult<InviteCode> {
        let mut attempt = 1;
        loop {
            let candidate = self.invite_codes.generate();
            if self.groups.find_by_invite_code(&candidate).await?.is_none() {
                return Ok(candidate);
            }
            if attempt >= MAX_INVITE_CODE_ATTEMPTS {
                return Err(ServiceError::storage(
                    GroupRepositoryError::DuplicateInviteCode(candidate),
                ));
            }
            tracing::debug!(attempt, "generated invite code already in use");
            attempt += 1;
        }
    }
}
