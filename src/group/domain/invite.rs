//! Invite codes used to join a group without prior membership.

use super::GroupDomainError;
use serde::Serialize;
use std::fmt;

/// Maximum invite code length, matching the `groups.invite_code` column.
pub const MAX_INVITE_CODE_LENGTH: usize = 64;

/// Lowercase ASCII alphanumeric code, unique across all groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct InviteCode(String);

impl InviteCode {
    /// Validates a code received from a user.
    ///
    /// Surrounding whitespace is dropped and letters are lowercased.
    ///
    /// # Errors
    ///
    /// Returns [`GroupDomainError::EmptyInviteCode`] when the code is blank
    /// and [`GroupDomainError::InvalidInviteCode`] when it is longer than
    /// [`MAX_INVITE_CODE_LENGTH`] or contains anything other than ASCII
    /// letters and digits.
    pub fn new(value: impl Into<String>) -> Result<Self, GroupDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GroupDomainError::EmptyInviteCode);
        }
        let well_formed = trimmed.len() <= MAX_INVITE_CODE_LENGTH
            && trimmed.chars().all(|ch| ch.is_ascii_alphanumeric());
        if !well_formed {
            return Err(GroupDomainError::InvalidInviteCode(raw));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Wraps a code produced by a generator that only emits lowercase ASCII
    /// alphanumerics.
    pub(crate) const fn from_generated(value: String) -> Self {
        Self(value)
    }

    /// Returns the code as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InviteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
