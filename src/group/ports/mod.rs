//! Port contracts for group management.

pub mod invite;
pub mod repository;

pub use invite::InviteCodeGenerator;
pub use repository::{GroupRepository, GroupRepositoryError, GroupRepositoryResult};
