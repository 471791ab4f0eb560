//! Owned task trees and the recursive completion check.

use super::{Task, TaskId};
use std::collections::{HashMap, HashSet};

/// Suffix appended to a descendant that is blocked by its own subtasks.
pub const HAS_INCOMPLETE_SUBTASKS_SUFFIX: &str = "(has incomplete subtasks)";

/// A task together with its full descendant subtree.
///
/// Used both for subtrees loaded from storage and for new trees prepared
/// for atomic insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTree {
    task: Task,
    subtasks: Vec<TaskTree>,
}

impl TaskTree {
    /// Creates a tree node from a task and its already-built children.
    #[must_use]
    pub const fn new(task: Task, subtasks: Vec<Self>) -> Self {
        Self { task, subtasks }
    }

    /// Creates a tree with no subtasks.
    #[must_use]
    pub const fn leaf(task: Task) -> Self {
        Self::new(task, Vec::new())
    }

    /// Rebuilds a tree from a root and a flat list of its descendants.
    ///
    /// Children keep the relative order in which they appear in
    /// `descendants`. Records whose parent is not reachable from `root` are
    /// ignored.
    #[must_use]
    pub fn assemble(root: Task, descendants: Vec<Task>) -> Self {
        let mut children_by_parent: HashMap<TaskId, Vec<Task>> = HashMap::new();
        for task in descendants {
            if let Some(parent_id) = task.parent_id() {
                children_by_parent.entry(parent_id).or_default().push(task);
            }
        }
        build_subtree(root, &mut children_by_parent)
    }

    /// Rebuilds every tree contained in a flat list of tasks.
    ///
    /// A task whose parent is absent from `tasks` becomes a root. Roots and
    /// siblings keep the relative order in which they appear in `tasks`.
    #[must_use]
    pub fn assemble_forest(tasks: Vec<Task>) -> Vec<Self> {
        let present: HashSet<TaskId> = tasks.iter().map(Task::id).collect();
        let mut roots = Vec::new();
        let mut children_by_parent: HashMap<TaskId, Vec<Task>> = HashMap::new();
        for task in tasks {
            match task.parent_id() {
                Some(parent_id) if present.contains(&parent_id) => {
                    children_by_parent.entry(parent_id).or_default().push(task);
                }
                _ => roots.push(task),
            }
        }
        roots
            .into_iter()
            .map(|root| build_subtree(root, &mut children_by_parent))
            .collect()
    }

    /// Returns the task at the root of this tree.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the direct subtasks.
    #[must_use]
    pub fn subtasks(&self) -> &[Self] {
        &self.subtasks
    }

    /// Consumes the tree, returning the root task and its subtrees.
    #[must_use]
    pub fn into_parts(self) -> (Task, Vec<Self>) {
        (self.task, self.subtasks)
    }

    /// Iterates every task in the tree in pre-order, root first.
    ///
    /// Parents are always yielded before their children, which is the order
    /// storage needs for foreign keys.
    #[must_use]
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Returns the number of tasks in the tree, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Returns the number of levels in the tree; a leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .subtasks
            .iter()
            .map(Self::depth)
            .max()
            .unwrap_or_default()
    }

    /// Lists the titles of every descendant blocking completion of the root.
    ///
    /// A descendant is listed when its own status is not done. A descendant
    /// that has incomplete descendants of its own is listed a second time
    /// with the [`HAS_INCOMPLETE_SUBTASKS_SUFFIX`] annotation, followed by
    /// the entries collected beneath it. An empty result means the root may
    /// be marked done.
    #[must_use]
    pub fn incomplete_descendants(&self) -> Vec<String> {
        let mut blocking = Vec::new();
        collect_incomplete(self, &mut blocking);
        blocking
    }
}

fn build_subtree(task: Task, children_by_parent: &mut HashMap<TaskId, Vec<Task>>) -> TaskTree {
    let children = children_by_parent.remove(&task.id()).unwrap_or_default();
    let subtasks = children
        .into_iter()
        .map(|child| build_subtree(child, children_by_parent))
        .collect();
    TaskTree::new(task, subtasks)
}

fn collect_incomplete(tree: &TaskTree, blocking: &mut Vec<String>) {
    for subtask in &tree.subtasks {
        let title = subtask.task.title().as_str();
        if !subtask.task.status().is_done() {
            blocking.push(title.to_owned());
        }

        let mut nested = Vec::new();
        collect_incomplete(subtask, &mut nested);
        if !nested.is_empty() {
            blocking.push(format!("{title} {HAS_INCOMPLETE_SUBTASKS_SUFFIX}"));
            blocking.append(&mut nested);
        }
    }
}

impl<'a> IntoIterator for &'a TaskTree {
    type Item = &'a Task;
    type IntoIter = PreOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order iterator over the tasks of a [`TaskTree`].
#[derive(Debug)]
pub struct PreOrder<'a> {
    stack: Vec<&'a TaskTree>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Task;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.stack.pop()?;
        self.stack.extend(tree.subtasks.iter().rev());
        Some(&tree.task)
    }
}
