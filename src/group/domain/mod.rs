//! Domain model for groups and membership.

mod error;
mod group;
mod ids;
mod invite;

pub use error::GroupDomainError;
pub use group::{Group, GroupName, MAX_GROUP_NAME_LENGTH, PersistedGroupData};
pub use ids::GroupId;
pub use invite::{InviteCode, MAX_INVITE_CODE_LENGTH};
