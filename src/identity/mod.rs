//! Accounts and identity proofs.
//!
//! Users register with a display name and password, log in to obtain a
//! signed bearer token, and present that token on every later request. The
//! rest of the crate only ever sees the verified [`domain::UserId`] that the
//! token carries.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
