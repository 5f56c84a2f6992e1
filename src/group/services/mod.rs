//! Application services for group lifecycle and membership.

mod membership;

pub use membership::{
    CreateGroupRequest, GroupDeletion, GroupService, JoinGroupRequest, MAX_INVITE_CODE_ATTEMPTS,
    RenameGroupRequest,
};
