//! Repository port for group persistence and membership lookup.

use crate::{
    group::domain::{Group, GroupId, InviteCode},
    identity::domain::UserId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for group repository operations.
pub type GroupRepositoryResult<T> = Result<T, GroupRepositoryError>;

/// Group persistence contract.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Stores a new group.
    ///
    /// # Errors
    ///
    /// Returns [`GroupRepositoryError::DuplicateGroup`] when the identifier
    /// exists or [`GroupRepositoryError::DuplicateInviteCode`] when another
    /// group already uses the invite code.
    async fn store(&self, group: &Group) -> GroupRepositoryResult<()>;

    /// Replaces the stored snapshot of an existing group (last write wins).
    ///
    /// # Errors
    ///
    /// Returns [`GroupRepositoryError::NotFound`] when the group does not
    /// exist.
    async fn update(&self, group: &Group) -> GroupRepositoryResult<()>;

    /// Deletes a group.
    ///
    /// # Errors
    ///
    /// Returns [`GroupRepositoryError::NotFound`] when the group does not
    /// exist.
    async fn delete(&self, id: GroupId) -> GroupRepositoryResult<()>;

    /// Finds a group by identifier.
    async fn find_by_id(&self, id: GroupId) -> GroupRepositoryResult<Option<Group>>;

    /// Finds the group using an invite code.
    async fn find_by_invite_code(&self, code: &InviteCode)
    -> GroupRepositoryResult<Option<Group>>;

    /// Returns every group `user` belongs to, oldest first.
    async fn list_for_member(&self, user: UserId) -> GroupRepositoryResult<Vec<Group>>;
}

/// Errors returned by group repository implementations.
#[derive(Debug, Clone, Error)]
pub enum GroupRepositoryError {
    /// A group with the same identifier already exists.
    #[error("duplicate group identifier: {0}")]
    DuplicateGroup(GroupId),

    /// Another group already uses the invite code.
    #[error("duplicate invite code: {0}")]
    DuplicateInviteCode(InviteCode),

    /// The group was not found.
    #[error("group not found: {0}")]
    NotFound(GroupId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl GroupRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
