//! In-memory repository for task tree tests.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::developer::domain::DeveloperId;
use crate::task::{
    domain::{Task, TaskId, TaskTree},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Every stored node carries an insertion sequence so that sibling order and
/// ties between equal creation timestamps resolve the same way the
/// `PostgreSQL` adapter resolves them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, StoredTask>,
    next_seq: u64,
}

#[derive(Debug, Clone)]
struct StoredTask {
    task: Task,
    seq: u64,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

impl InMemoryTaskState {
    fn children_by_parent(&self) -> HashMap<TaskId, Vec<&StoredTask>> {
        let mut children: HashMap<TaskId, Vec<&StoredTask>> = HashMap::new();
        for stored in self.tasks.values() {
            if let Some(parent_id) = stored.task.parent_id() {
                children.entry(parent_id).or_default().push(stored);
            }
        }
        for siblings in children.values_mut() {
            siblings.sort_by_key(|stored| stored.seq);
        }
        children
    }

    fn subtree(
        &self,
        root: &StoredTask,
        children: &HashMap<TaskId, Vec<&StoredTask>>,
    ) -> TaskTree {
        let mut descendants: Vec<&StoredTask> = Vec::new();
        let mut pending = vec![root.task.id()];
        while let Some(parent_id) = pending.pop() {
            for child in children.get(&parent_id).into_iter().flatten() {
                pending.push(child.task.id());
                descendants.push(child);
            }
        }
        descendants.sort_by_key(|stored| stored.seq);
        TaskTree::assemble(
            root.task.clone(),
            descendants.into_iter().map(|stored| stored.task.clone()).collect(),
        )
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store_tree(&self, tree: &TaskTree) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;

        if let Some(parent_id) = tree.task().parent_id()
            && !state.tasks.contains_key(&parent_id)
        {
            return Err(TaskRepositoryError::NotFound(parent_id));
        }
        if let Some(duplicate) = tree.iter().find(|task| state.tasks.contains_key(&task.id())) {
            return Err(TaskRepositoryError::DuplicateTask(duplicate.id()));
        }

        for task in tree.iter() {
            let seq = state.next_seq;
            state.next_seq += 1;
            state.tasks.insert(
                task.id(),
                StoredTask {
                    task: task.clone(),
                    seq,
                },
            );
        }
        Ok(())
    }

    async fn update_node(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        stored.task = task.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.get(&id).map(|stored| stored.task.clone()))
    }

    async fn load_subtree(&self, id: TaskId) -> TaskRepositoryResult<Option<TaskTree>> {
        let state = self.state.read().map_err(poisoned)?;
        let Some(root) = state.tasks.get(&id) else {
            return Ok(None);
        };
        let children = state.children_by_parent();
        Ok(Some(state.subtree(root, &children)))
    }

    async fn list_top_level(&self) -> TaskRepositoryResult<Vec<TaskTree>> {
        let state = self.state.read().map_err(poisoned)?;
        let children = state.children_by_parent();
        let mut roots: Vec<&StoredTask> = state
            .tasks
            .values()
            .filter(|stored| stored.task.is_top_level())
            .collect();
        roots.sort_by_key(|stored| (Reverse(stored.task.created_at()), Reverse(stored.seq)));
        Ok(roots
            .into_iter()
            .map(|root| state.subtree(root, &children))
            .collect())
    }

    async fn find_by_assignee(&self, developer: DeveloperId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut assigned: Vec<&StoredTask> = state
            .tasks
            .values()
            .filter(|stored| stored.task.assigned_developer_id() == Some(developer))
            .collect();
        assigned.sort_by_key(|stored| stored.seq);
        Ok(assigned
            .into_iter()
            .map(|stored| stored.task.clone())
            .collect())
    }
}
