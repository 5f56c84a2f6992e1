//! Port contracts for accounts and identity proofs.

pub mod credentials;
pub mod identity;
pub mod repository;

pub use credentials::CredentialHasher;
pub use identity::{IdentityError, IdentityProvider, IssuedToken};
pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
