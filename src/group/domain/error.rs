//! Error types for group validation and membership rules.

use super::MAX_GROUP_NAME_LENGTH;
use crate::identity::domain::UserId;
use thiserror::Error;

/// Errors returned by group constructors and membership transitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GroupDomainError {
    /// The group name is empty after trimming.
    #[error("group name must not be empty")]
    EmptyGroupName,

    /// The group name exceeds the storage limit.
    #[error("group name has {0} characters, at most {max} are allowed", max = MAX_GROUP_NAME_LENGTH)]
    GroupNameTooLong(usize),

    /// The invite code is blank.
    #[error("invite code must not be empty")]
    EmptyInviteCode,

    /// The invite code is too long or contains non-alphanumeric characters.
    #[error("invalid invite code '{0}'")]
    InvalidInviteCode(String),

    /// The owner cannot be removed from the member set.
    #[error("the group owner {0} cannot be removed")]
    OwnerRemoval(UserId),

    /// The owner cannot leave; ownership transfer is not supported.
    #[error("the group owner {0} cannot leave the group; delete the group instead")]
    OwnerCannotLeave(UserId),
}
