//! Group aggregate root and membership transitions.
//!
//! Transitions consume the current snapshot and return the next one, so a
//! caller never observes a half-applied change. Every constructor and
//! transition keeps the owner inside the member set and the member set free
//! of duplicates.

use super::{GroupDomainError, GroupId, InviteCode};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use std::fmt;

/// Maximum group name length in characters, matching the `groups.name`
/// column.
pub const MAX_GROUP_NAME_LENGTH: usize = 255;

/// Trimmed, non-empty group name of at most [`MAX_GROUP_NAME_LENGTH`]
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct GroupName(String);

impl GroupName {
    /// Creates a validated group name.
    ///
    /// # Errors
    ///
    /// Returns [`GroupDomainError::EmptyGroupName`] when the value is blank
    /// and [`GroupDomainError::GroupNameTooLong`] when it exceeds the length
    /// limit.
    pub fn new(value: impl Into<String>) -> Result<Self, GroupDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GroupDomainError::EmptyGroupName);
        }
        let length = trimmed.chars().count();
        if length > MAX_GROUP_NAME_LENGTH {
            return Err(GroupDomainError::GroupNameTooLong(length));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Group aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    id: GroupId,
    name: GroupName,
    owner: UserId,
    members: Vec<UserId>,
    invite_code: InviteCode,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedGroupData {
    /// Persisted group identifier.
    pub id: GroupId,
    /// Persisted group name.
    pub name: GroupName,
    /// Persisted owner.
    pub owner: UserId,
    /// Persisted members in join order.
    pub members: Vec<UserId>,
    /// Persisted invite code.
    pub invite_code: InviteCode,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Group {
    /// Creates a group owned by `owner`, who becomes its first member.
    #[must_use]
    pub fn new(
        name: GroupName,
        owner: UserId,
        invite_code: InviteCode,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: GroupId::new(),
            name,
            owner,
            members: vec![owner],
            invite_code,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a group from persisted storage.
    ///
    /// Duplicate member entries are dropped and a missing owner is restored
    /// to the front of the member list.
    #[must_use]
    pub fn from_persisted(data: PersistedGroupData) -> Self {
        let mut members = Vec::with_capacity(data.members.len() + 1);
        if !data.members.contains(&data.owner) {
            members.push(data.owner);
        }
        for member in data.members {
            if !members.contains(&member) {
                members.push(member);
            }
        }

        Self {
            id: data.id,
            name: data.name,
            owner: data.owner,
            members,
            invite_code: data.invite_code,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the group identifier.
    #[must_use]
    pub const fn id(&self) -> GroupId {
        self.id
    }

    /// Returns the group name.
    #[must_use]
    pub const fn name(&self) -> &GroupName {
        &self.name
    }

    /// Returns the owner.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the members in join order; the owner is always included.
    #[must_use]
    pub fn members(&self) -> &[UserId] {
        &self.members
    }

    /// Returns the invite code.
    #[must_use]
    pub const fn invite_code(&self) -> &InviteCode {
        &self.invite_code
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when `user` belongs to the group.
    #[must_use]
    pub fn has_member(&self, user: UserId) -> bool {
        self.members.contains(&user)
    }

    /// Returns the group under a new name.
    #[must_use]
    pub fn renamed(self, name: GroupName, clock: &impl Clock) -> Self {
        Self {
            name,
            updated_at: clock.utc(),
            ..self
        }
    }

    /// Returns the group with `user` added to its members.
    ///
    /// Adding an existing member returns the snapshot unchanged.
    #[must_use]
    pub fn with_member(mut self, user: UserId, clock: &impl Clock) -> Self {
        if self.has_member(user) {
            return self;
        }
        self.members.push(user);
        self.updated_at = clock.utc();
        self
    }

    /// Returns the group with `user` removed from its members.
    ///
    /// Removing a user who is not a member returns the snapshot unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`GroupDomainError::OwnerRemoval`] when `user` is the owner.
    pub fn without_member(self, user: UserId, clock: &impl Clock) -> Result<Self, GroupDomainError> {
        if user == self.owner {
            return Err(GroupDomainError::OwnerRemoval(user));
        }
        Ok(self.drop_member(user, clock))
    }

    /// Returns the group after `user` leaves it.
    ///
    /// # Errors
    ///
    /// Returns [`GroupDomainError::OwnerCannotLeave`] when `user` is the owner.
    pub fn after_leave(self, user: UserId, clock: &impl Clock) -> Result<Self, GroupDomainError> {
        if user == self.owner {
            return Err(GroupDomainError::OwnerCannotLeave(user));
        }
        Ok(self.drop_member(user, clock))
    }

    fn drop_member(mut self, user: UserId, clock: &impl Clock) -> Self {
        if !self.has_member(user) {
            return self;
        }
        self.members.retain(|member| *member != user);
        self.updated_at = clock.utc();
        self
    }
}
