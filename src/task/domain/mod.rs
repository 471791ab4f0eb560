//! Domain model for the task tree engine.
//!
//! Tasks form strict trees: each node has at most one parent, fixed at
//! creation. The domain covers the stored node, owned trees with the
//! recursive completion check, the assignment eligibility rule, and the
//! populated read views returned to callers.

mod assignment;
mod error;
mod ids;
mod limits;
mod node;
mod task;
mod tree;

pub use assignment::{AssignmentError, SkillNameLookup, missing_skill_ids, validate_assignment};
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{TaskId, TaskTitle};
pub use limits::TreeLimits;
pub use node::{AssigneeView, DanglingReference, ParentRef, ReferenceIndex, TaskNode};
pub use task::{PersistedTaskData, Task, TaskStatus};
pub use tree::{HAS_INCOMPLETE_SUBTASKS_SUFFIX, PreOrder, TaskTree};
