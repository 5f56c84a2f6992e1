//! Adapter implementations for account and identity ports.

pub mod memory;
pub mod postgres;

mod credentials;
mod token;

pub use credentials::Pbkdf2CredentialHasher;
pub use token::JwtIdentityProvider;
