//! Credential hashing port.

use crate::identity::domain::{CredentialHash, Password};

/// Produces and checks credential hashes.
pub trait CredentialHasher: Send + Sync {
    /// Hashes a password with a fresh salt.
    fn hash(&self, password: &Password) -> CredentialHash;

    /// Returns `true` when the password matches the stored hash.
    ///
    /// Unreadable hashes never match.
    fn verify(&self, password: &Password, hash: &CredentialHash) -> bool;
}
