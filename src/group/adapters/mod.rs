//! Adapter implementations for group ports.

pub mod memory;
pub mod postgres;

mod invite;

pub use invite::RandomInviteCodeGenerator;
