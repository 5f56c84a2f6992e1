//! Service layer for account registration and authentication.

use crate::{
    error::{Resource, ServiceError, ServiceResult},
    identity::{
        domain::{CredentialHash, DisplayName, Password, User, UserId},
        ports::{CredentialHasher, IdentityError, IdentityProvider, IssuedToken, UserRepository},
    },
};
use mockable::Clock;
use std::sync::Arc;

const BEARER_PREFIXES: [&str; 2] = ["Bearer ", "bearer "];

/// Request payload for registering an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    display_name: String,
    password: String,
}

impl RegisterRequest {
    /// Creates a registration request.
    #[must_use]
    pub fn new(display_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            password: password.into(),
        }
    }
}

/// Request payload for logging in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    display_name: String,
    password: String,
}

impl LoginRequest {
    /// Creates a login request.
    #[must_use]
    pub fn new(display_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            password: password.into(),
        }
    }
}

/// Account registration and authentication service.
#[derive(Clone)]
pub struct AccountService<R, I, H, C>
where
    R: UserRepository,
    I: IdentityProvider,
    H: CredentialHasher,
    C: Clock + Send + Sync,
{
    users: Arc<R>,
    identity: Arc<I>,
    hasher: Arc<H>,
    clock: Arc<C>,
    placeholder_hash: CredentialHash,
}

impl<R, I, H, C> AccountService<R, I, H, C>
where
    R: UserRepository,
    I: IdentityProvider,
    H: CredentialHasher,
    C: Clock + Send + Sync,
{
    /// Creates a new account service.
    #[must_use]
    pub fn new(users: Arc<R>, identity: Arc<I>, hasher: Arc<H>, clock: Arc<C>) -> Self {
        let placeholder_hash = hasher.hash(&Password::placeholder());
        Self {
            users,
            identity,
            hasher,
            clock,
            placeholder_hash,
        }
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] when a field is empty or the
    /// display name is taken, or [`ServiceError::Storage`] when persistence
    /// fails.
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<User> {
        let RegisterRequest {
            display_name,
            password,
        } = request;
        let name = DisplayName::new(display_name)?;
        let secret = Password::new(password)?;

        let user = User::register(name, self.hasher.hash(&secret), &*self.clock);
        self.users.store(&user).await?;
        tracing::info!(user_id = %user.id(), "user registered");
        Ok(user)
    }

    /// Exchanges credentials for a signed identity token.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unauthenticated`] when the display name is
    /// unknown or the password does not match.
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<IssuedToken> {
        let LoginRequest {
            display_name,
            password,
        } = request;
        let (Ok(name), Ok(secret)) = (DisplayName::new(display_name), Password::new(password))
        else {
            return Err(IdentityError::InvalidCredentials.into());
        };

        // Every attempt runs exactly one verification; unknown names use the
        // placeholder hash.
        let found = self.users.find_by_display_name(&name).await?;
        let stored = found
            .as_ref()
            .map_or(&self.placeholder_hash, User::credential_hash);
        let verified = self.hasher.verify(&secret, stored);
        let user = found
            .filter(|_| verified)
            .ok_or(IdentityError::InvalidCredentials)?;

        let token = self.identity.issue(user.id())?;
        tracing::debug!(user_id = %user.id(), "identity token issued");
        Ok(token)
    }

    /// Verifies the `Authorization` header value and returns the actor.
    ///
    /// Accepts `Bearer <token>` or a bare token.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unauthenticated`] when the header is missing,
    /// empty, or carries an invalid token.
    pub fn authenticate(&self, authorization: Option<&str>) -> ServiceResult<UserId> {
        let header = authorization.unwrap_or_default().trim_start();
        let token = BEARER_PREFIXES
            .iter()
            .find_map(|prefix| header.strip_prefix(prefix))
            .unwrap_or(header)
            .trim();
        if token.is_empty() {
            return Err(IdentityError::MissingToken.into());
        }
        Ok(self.identity.verify(token)?)
    }

    /// Returns the account of the authenticated actor.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] when the actor has no account.
    pub async fn current_user(&self, actor: UserId) -> ServiceResult<User> {
        self.users
            .find_by_id(actor)
            .await?
            .ok_or(ServiceError::NotFound(Resource::User(actor)))
    }
}
