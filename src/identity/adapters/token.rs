//! HS256 JSON Web Token identity provider.

use crate::{
    config::AppConfig,
    identity::{
        domain::UserId,
        ports::{IdentityError, IdentityProvider, IssuedToken},
    },
};
use chrono::TimeDelta;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Actor identifier.
    sub: String,
    /// Issued-at unix seconds.
    iat: i64,
    /// Expiration unix seconds.
    exp: i64,
}

/// Identity provider issuing HS256-signed tokens that carry the actor id.
#[derive(Clone)]
pub struct JwtIdentityProvider<C>
where
    C: Clock + Send + Sync,
{
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: TimeDelta,
    clock: Arc<C>,
}

impl<C> JwtIdentityProvider<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a provider signing with `secret` and issuing tokens valid for
    /// `ttl`.
    #[must_use]
    pub fn new(secret: &str, ttl: TimeDelta, clock: Arc<C>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
            clock,
        }
    }

    /// Creates a provider from application configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig, clock: Arc<C>) -> Self {
        let ttl = TimeDelta::try_days(config.token_ttl_days).unwrap_or(TimeDelta::MAX);
        Self::new(&config.jwt_secret, ttl, clock)
    }
}

impl<C> IdentityProvider for JwtIdentityProvider<C>
where
    C: Clock + Send + Sync,
{
    fn issue(&self, user: UserId) -> Result<IssuedToken, IdentityError> {
        let issued_at = self.clock.utc();
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| IdentityError::Issue("token expiry out of range".to_owned()))?;
        let claims = Claims {
            sub: user.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|err| IdentityError::Issue(err.to_string()))?;
        Ok(IssuedToken { token, expires_at })
    }

    fn verify(&self, token: &str) -> Result<UserId, IdentityError> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(IdentityError::MissingToken);
        }
        let data =
            jsonwebtoken::decode::<Claims>(trimmed, &self.decoding_key, &Validation::default())
                .map_err(|err| IdentityError::InvalidToken(err.to_string()))?;
        UserId::parse(&data.claims.sub).map_err(|err| IdentityError::InvalidToken(err.to_string()))
    }
}
