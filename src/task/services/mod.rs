//! Application services for the task tree engine.

mod requests;
mod tree;

pub use requests::{AssigneeUpdate, CreateTaskRequest, UpdateTaskRequest};
pub use tree::{Missing, TaskTreeError, TaskTreeResult, TaskTreeService};
