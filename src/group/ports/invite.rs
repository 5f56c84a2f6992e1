//! Invite code generation port.

use crate::group::domain::InviteCode;

/// Produces candidate invite codes for new groups.
///
/// Generators need not guarantee uniqueness; the group service checks each
/// candidate against storage.
pub trait InviteCodeGenerator: Send + Sync {
    /// Returns a fresh candidate code.
    fn generate(&self) -> InviteCode;
}
