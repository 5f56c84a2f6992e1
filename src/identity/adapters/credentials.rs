//! PBKDF2-HMAC-SHA256 credential hasher.
//!
//! Hashes are encoded as `pbkdf2:<iterations>:<hex salt>:<hex hash>` so the
//! iteration count can be raised without invalidating stored credentials.

use crate::{
    config::AppConfig,
    identity::{
        domain::{CredentialHash, Password},
        ports::CredentialHasher,
    },
};
use rand::RngCore;
use sha2::Sha256;

const SCHEME: &str = "pbkdf2";
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

/// Salted PBKDF2 credential hasher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pbkdf2CredentialHasher {
    iterations: u32,
}

impl Pbkdf2CredentialHasher {
    /// Creates a hasher using `iterations` rounds for new hashes.
    #[must_use]
    pub const fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    /// Creates a hasher from application configuration.
    #[must_use]
    pub const fn from_config(config: &AppConfig) -> Self {
        Self::new(config.password_hash_iterations)
    }
}

impl CredentialHasher for Pbkdf2CredentialHasher {
    fn hash(&self, password: &Password) -> CredentialHash {
        let mut salt = [0_u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        let mut digest = [0_u8; HASH_LEN];
        pbkdf2::pbkdf2_hmac::<Sha256>(password.expose(), &salt, self.iterations, &mut digest);

        CredentialHash::new(format!(
            "{SCHEME}:{}:{}:{}",
            self.iterations,
            hex::encode(salt),
            hex::encode(digest)
        ))
    }

    fn verify(&self, password: &Password, hash: &CredentialHash) -> bool {
        let Some((iterations, salt, expected)) = decode(hash) else {
            return false;
        };
        let mut actual = vec![0_u8; expected.len()];
        pbkdf2::pbkdf2_hmac::<Sha256>(password.expose(), &salt, iterations, &mut actual);
        constant_time_eq(&actual, &expected)
    }
}

fn decode(hash: &CredentialHash) -> Option<(u32, Vec<u8>, Vec<u8>)> {
    let mut parts = hash.as_str().split(':');
    let (Some(SCHEME), Some(iterations), Some(salt), Some(expected), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return None;
    };

    let rounds = iterations.parse::<u32>().ok().filter(|rounds| *rounds > 0)?;
    let salt_bytes = hex::decode(salt).ok()?;
    let expected_bytes = hex::decode(expected).ok().filter(|bytes| !bytes.is_empty())?;
    Some((rounds, salt_bytes, expected_bytes))
}

fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .fold(0_u8, |diff, (a, b)| diff | (a ^ b))
            == 0
}
