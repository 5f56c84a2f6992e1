//! Application services for task creation, listing, and updates.

mod requests;
mod task;

pub use requests::{CreateTaskRequest, UpdateTaskRequest};
pub use task::TaskService;
