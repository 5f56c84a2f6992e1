//! Groups, membership, and invite codes.
//!
//! A group has one owner who is always a member, a duplicate-free member
//! set, and a unique invite code that lets other users join. Deleting a
//! group also deletes every task that references it. The module follows
//! hexagonal architecture:
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
