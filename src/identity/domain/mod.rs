//! Domain model for registered users.

mod error;
mod ids;
mod user;

pub use error::IdentityDomainError;
pub use ids::UserId;
pub use user::{
    CredentialHash, DisplayName, MAX_DISPLAY_NAME_LENGTH, Password, PersistedUserData, User,
};
