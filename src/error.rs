//! Error taxonomy shared by every service operation.
//!
//! Domain and repository errors stay local to their bounded context. At the
//! service boundary they collapse into [`ServiceError`], whose variants are
//! the only outcomes a transport layer needs to distinguish.

use crate::{
    access::AccessDenied,
    group::{
        domain::{GroupDomainError, GroupId},
        ports::GroupRepositoryError,
    },
    identity::{
        domain::{IdentityDomainError, UserId},
        ports::{IdentityError, UserRepositoryError},
    },
    task::{
        domain::{TaskDomainError, TaskId},
        ports::TaskRepositoryError,
    },
};
use std::{fmt, sync::Arc};
use thiserror::Error;

/// Status reported by the transport layer after a successful creation.
pub const SUCCESS_CREATED: u16 = 201;

/// Status reported by the transport layer after a successful read, update,
/// or deletion.
pub const SUCCESS_OK: u16 = 200;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error returned when an identifier string is not well formed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid identifier: '{0}'")]
pub struct InvalidIdentifierError(pub String);

/// Entity named by a [`ServiceError::NotFound`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// A registered user.
    User(UserId),
    /// A group.
    Group(GroupId),
    /// A task.
    Task(TaskId),
    /// A group looked up through an invite code, as the caller supplied it.
    InviteCode(String),
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(id) => write!(f, "user {id}"),
            Self::Group(id) => write!(f, "group {id}"),
            Self::Task(id) => write!(f, "task {id}"),
            Self::InviteCode(code) => write!(f, "invite code {code}"),
        }
    }
}

/// Business-rule violations reported as validation failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationFailure {
    /// A group rule was violated.
    #[error(transparent)]
    Group(#[from] GroupDomainError),
    /// A task rule was violated.
    #[error(transparent)]
    Task(#[from] TaskDomainError),
    /// An account rule was violated.
    #[error(transparent)]
    Identity(#[from] IdentityDomainError),
}

/// Outcome of a rejected service operation.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// An identifier was malformed; no storage access took place.
    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidIdentifierError),

    /// The identity proof was missing or invalid.
    #[error("authentication failed: {0}")]
    Unauthenticated(#[from] IdentityError),

    /// A referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(Resource),

    /// The actor is authenticated but not permitted to act.
    #[error("forbidden: {0}")]
    Forbidden(#[from] AccessDenied),

    /// A business rule rejected the request.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationFailure),

    /// The storage collaborator failed. Never retried.
    #[error("storage failure: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl ServiceError {
    /// Wraps a storage failure.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }

    /// Returns the transport status code the boundary layer must report.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidIdentifier(_) | Self::Validation(_) => 400,
            Self::Unauthenticated(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Storage(_) => 500,
        }
    }
}

impl From<GroupDomainError> for ServiceError {
    fn from(err: GroupDomainError) -> Self {
        Self::Validation(err.into())
    }
}

impl From<TaskDomainError> for ServiceError {
    fn from(err: TaskDomainError) -> Self {
        Self::Validation(err.into())
    }
}

impl From<IdentityDomainError> for ServiceError {
    fn from(err: IdentityDomainError) -> Self {
        Self::Validation(err.into())
    }
}

impl From<GroupRepositoryError> for ServiceError {
    fn from(err: GroupRepositoryError) -> Self {
        match err {
            GroupRepositoryError::NotFound(id) => Self::NotFound(Resource::Group(id)),
            GroupRepositoryError::Persistence(inner) => Self::Storage(inner),
            other @ (GroupRepositoryError::DuplicateGroup(_)
            | GroupRepositoryError::DuplicateInviteCode(_)) => Self::storage(other),
        }
    }
}

impl From<TaskRepositoryError> for ServiceError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(Resource::Task(id)),
            TaskRepositoryError::Persistence(inner) => Self::Storage(inner),
            other @ TaskRepositoryError::DuplicateTask(_) => Self::storage(other),
        }
    }
}

impl From<UserRepositoryError> for ServiceError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::DuplicateDisplayName(name) => {
                IdentityDomainError::DisplayNameTaken(name.into_inner()).into()
            }
            UserRepositoryError::Persistence(inner) => Self::Storage(inner),
            other @ UserRepositoryError::DuplicateUser(_) => Self::storage(other),
        }
    }
}
