//! Error types for account validation.

use super::MAX_DISPLAY_NAME_LENGTH;
use thiserror::Error;

/// Errors returned while constructing account values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The display name is empty after trimming.
    #[error("display name must not be empty")]
    EmptyDisplayName,

    /// The display name exceeds the storage limit.
    #[error("display name has {0} characters, at most {max} are allowed", max = MAX_DISPLAY_NAME_LENGTH)]
    DisplayNameTooLong(usize),

    /// The password is empty.
    #[error("password must not be empty")]
    EmptyPassword,

    /// Another account already uses the display name.
    #[error("display name '{0}' is already taken")]
    DisplayNameTaken(String),
}
