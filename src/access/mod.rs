//! Permission decisions for group and task operations.
//!
//! Every predicate here is synchronous and side-effect free. Callers load
//! the relevant snapshots first, ask for a decision, and only then mutate
//! storage. A refusal is reported as an [`AccessDenied`] reason that the
//! service layer surfaces as `Forbidden`.

mod policy;

pub use policy::{
    AccessDenied, authorize_group_delete, authorize_group_leave, authorize_group_read,
    authorize_group_rename, authorize_member_removal, authorize_task_creation,
    authorize_task_mutation, authorize_task_read, is_creator, is_member, is_owner,
    is_task_visible,
};
