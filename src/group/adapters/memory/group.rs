//! In-memory group repository for tests and local runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::{
    group::{
        domain::{Group, GroupId, InviteCode},
        ports::{GroupRepository, GroupRepositoryError, GroupRepositoryResult},
    },
    identity::domain::UserId,
};

/// Thread-safe in-memory group repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGroupRepository {
    state: Arc<RwLock<InMemoryGroupState>>,
}

#[derive(Debug, Default)]
struct InMemoryGroupState {
    groups: HashMap<GroupId, Group>,
    invite_index: HashMap<InviteCode, GroupId>,
}

impl InMemoryGroupRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> GroupRepositoryError {
    GroupRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn store(&self, group: &Group) -> GroupRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.groups.contains_key(&group.id()) {
            return Err(GroupRepositoryError::DuplicateGroup(group.id()));
        }
        if state.invite_index.contains_key(group.invite_code()) {
            return Err(GroupRepositoryError::DuplicateInviteCode(
                group.invite_code().clone(),
            ));
        }

        state
            .invite_index
            .insert(group.invite_code().clone(), group.id());
        state.groups.insert(group.id(), group.clone());
        Ok(())
    }

    async fn update(&self, group: &Group) -> GroupRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let previous_code = state
            .groups
            .get(&group.id())
            .ok_or(GroupRepositoryError::NotFound(group.id()))?
            .invite_code()
            .clone();

        if previous_code != *group.invite_code() {
            if state.invite_index.contains_key(group.invite_code()) {
                return Err(GroupRepositoryError::DuplicateInviteCode(
                    group.invite_code().clone(),
                ));
            }
            state.invite_index.remove(&previous_code);
            state
                .invite_index
                .insert(group.invite_code().clone(), group.id());
        }
        state.groups.insert(group.id(), group.clone());
        Ok(())
    }

    async fn delete(&self, id: GroupId) -> GroupRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let removed = state
            .groups
            .remove(&id)
            .ok_or(GroupRepositoryError::NotFound(id))?;
        state.invite_index.remove(removed.invite_code());
        Ok(())
    }

    async fn find_by_id(&self, id: GroupId) -> GroupRepositoryResult<Option<Group>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.groups.get(&id).cloned())
    }

    async fn find_by_invite_code(
        &self,
        code: &InviteCode,
    ) -> GroupRepositoryResult<Option<Group>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .invite_index
            .get(code)
            .and_then(|id| state.groups.get(id))
            .cloned())
    }

    async fn list_for_member(&self, user: UserId) -> GroupRepositoryResult<Vec<Group>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut groups: Vec<Group> = state
            .groups
            .values()
            .filter(|group| group.has_member(user))
            .cloned()
            .collect();
        groups.sort_by_key(Group::created_at);
        Ok(groups)
    }
}
