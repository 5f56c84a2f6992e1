//! Identity provider port: issues and verifies bearer tokens.

use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Signed token returned after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedToken {
    /// Opaque bearer token.
    pub token: String,
    /// Instant after which the token is rejected.
    pub expires_at: DateTime<Utc>,
}

/// Reasons an identity proof was not accepted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// No token was presented.
    #[error("missing identity token")]
    MissingToken,

    /// The token failed verification or has expired.
    #[error("invalid identity token: {0}")]
    InvalidToken(String),

    /// The presented credentials do not match a registered user.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A token could not be produced.
    #[error("identity token could not be issued: {0}")]
    Issue(String),
}

/// Issues and verifies opaque signed identity tokens.
pub trait IdentityProvider: Send + Sync {
    /// Issues a token naming `user` as the actor.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Issue`] when signing fails.
    fn issue(&self, user: UserId) -> Result<IssuedToken, IdentityError>;

    /// Verifies a token and returns the actor it names.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidToken`] when the signature, expiry, or
    /// embedded identifier is not acceptable.
    fn verify(&self, token: &str) -> Result<UserId, IdentityError>;
}
