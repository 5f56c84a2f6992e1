//! Random invite code generator.

use crate::{
    config::{AppConfig, DEFAULT_INVITE_CODE_LENGTH},
    group::{domain::InviteCode, ports::InviteCodeGenerator},
};
use rand::{Rng, distributions::Alphanumeric};

/// Generates lowercase alphanumeric codes from the thread-local RNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomInviteCodeGenerator {
    length: usize,
}

impl RandomInviteCodeGenerator {
    /// Creates a generator producing codes of `length` characters.
    ///
    /// A zero length falls back to the default length.
    #[must_use]
    pub const fn new(length: usize) -> Self {
        if length == 0 {
            return Self {
                length: DEFAULT_INVITE_CODE_LENGTH,
            };
        }
        Self { length }
    }

    /// Creates a generator from application configuration.
    #[must_use]
    pub const fn from_config(config: &AppConfig) -> Self {
        Self::new(config.invite_code_length)
    }
}

impl Default for RandomInviteCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_INVITE_CODE_LENGTH)
    }
}

impl InviteCodeGenerator for RandomInviteCodeGenerator {
    fn generate(&self) -> InviteCode {
        let code: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(|byte| char::from(byte).to_ascii_lowercase())
            .collect();
        InviteCode::from_generated(code)
    }
}
