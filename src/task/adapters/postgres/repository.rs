//! `PostgreSQL` repository implementation for task tree storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow, TaskSkillRow},
    schema::{task_skills, tasks},
};
use crate::config::PgPool;
use crate::developer::domain::DeveloperId;
use crate::skill::domain::SkillId;
use crate::task::{
    domain::{PersistedTaskData, Task, TaskId, TaskStatus, TaskTitle, TaskTree},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};

const SUBTREE_QUERY: &str = concat!(
    "WITH RECURSIVE subtree AS (",
    "SELECT id, title, status, parent_id, assigned_developer_id, created_at, updated_at, seq ",
    "FROM tasks WHERE id = $1 ",
    "UNION ALL ",
    "SELECT t.id, t.title, t.status, t.parent_id, t.assigned_developer_id, t.created_at, ",
    "t.updated_at, t.seq FROM tasks t INNER JOIN subtree s ON t.parent_id = s.id",
    ") ",
    "SELECT id, title, status, parent_id, assigned_developer_id, created_at, updated_at ",
    "FROM subtree ORDER BY seq",
);

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store_tree(&self, tree: &TaskTree) -> TaskRepositoryResult<()> {
        let parent_id = tree.task().parent_id();
        let rows: Vec<(TaskId, NewTaskRow)> =
            tree.iter().map(|task| (task.id(), to_new_row(task))).collect();
        let skill_rows: Vec<TaskSkillRow> = tree.iter().flat_map(skill_rows_of).collect();

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                if let Some(parent) = parent_id {
                    let exists = tasks::table
                        .filter(tasks::id.eq(parent.into_inner()))
                        .count()
                        .get_result::<i64>(tx)?;
                    if exists == 0 {
                        return Err(TaskRepositoryError::NotFound(parent));
                    }
                }

                // One statement per node keeps `seq` in pre-order.
                for (task_id, row) in &rows {
                    diesel::insert_into(tasks::table)
                        .values(row)
                        .execute(tx)
                        .map_err(|err| match err {
                            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                                TaskRepositoryError::DuplicateTask(*task_id)
                            }
                            _ => TaskRepositoryError::persistence(err),
                        })?;
                }
                if !skill_rows.is_empty() {
                    diesel::insert_into(task_skills::table)
                        .values(&skill_rows)
                        .execute(tx)?;
                }
                Ok(())
            })
        })
        .await
    }

    async fn update_node(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = TaskChangeset {
            title: task.title().as_str().to_owned(),
            status: task.status().as_str().to_owned(),
            assigned_developer_id: task.assigned_developer_id().map(DeveloperId::into_inner),
            updated_at: task.updated_at(),
        };
        let skill_rows = skill_rows_of(task);

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                let updated = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                    .set(&changeset)
                    .execute(tx)?;
                if updated == 0 {
                    return Err(TaskRepositoryError::NotFound(task_id));
                }

                diesel::delete(
                    task_skills::table.filter(task_skills::task_id.eq(task_id.into_inner())),
                )
                .execute(tx)?;
                if !skill_rows.is_empty() {
                    diesel::insert_into(task_skills::table)
                        .values(&skill_rows)
                        .execute(tx)?;
                }
                Ok(())
            })
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            Ok(attach_skills(connection, rows)?.into_iter().next())
        })
        .await
    }

    async fn load_subtree(&self, id: TaskId) -> TaskRepositoryResult<Option<TaskTree>> {
        self.run_blocking(move |connection| {
            let rows = diesel::sql_query(SUBTREE_QUERY)
                .bind::<diesel::sql_types::Uuid, _>(id.into_inner())
                .load::<TaskRow>(connection)?;
            let mut loaded = attach_skills(connection, rows)?;
            let Some(root_index) = loaded.iter().position(|task| task.id() == id) else {
                return Ok(None);
            };
            let root = loaded.remove(root_index);
            Ok(Some(TaskTree::assemble(root, loaded)))
        })
        .await
    }

    async fn list_top_level(&self) -> TaskRepositoryResult<Vec<TaskTree>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .order(tasks::seq.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            let mut trees = TaskTree::assemble_forest(attach_skills(connection, rows)?);
            trees.reverse();
            trees.sort_by_key(|tree| Reverse(tree.task().created_at()));
            Ok(trees)
        })
        .await
    }

    async fn find_by_assignee(&self, developer: DeveloperId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::assigned_developer_id.eq(developer.into_inner()))
                .order(tasks::seq.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            attach_skills(connection, rows)
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        parent_id: task.parent_id().map(TaskId::into_inner),
        assigned_developer_id: task.assigned_developer_id().map(DeveloperId::into_inner),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn skill_rows_of(task: &Task) -> Vec<TaskSkillRow> {
    task.required_skill_ids()
        .iter()
        .map(|skill_id| TaskSkillRow {
            task_id: task.id().into_inner(),
            skill_id: skill_id.into_inner(),
        })
        .collect()
}

/// Loads skill links for the given rows and rebuilds domain tasks,
/// preserving row order.
fn attach_skills(
    connection: &mut PgConnection,
    rows: Vec<TaskRow>,
) -> TaskRepositoryResult<Vec<Task>> {
    let ids: Vec<uuid::Uuid> = rows.iter().map(|row| row.id).collect();
    let links = task_skills::table
        .filter(task_skills::task_id.eq_any(&ids))
        .select(TaskSkillRow::as_select())
        .load::<TaskSkillRow>(connection)?;

    let mut skills_by_task: HashMap<uuid::Uuid, BTreeSet<SkillId>> = HashMap::new();
    for link in links {
        skills_by_task
            .entry(link.task_id)
            .or_default()
            .insert(SkillId::from_uuid(link.skill_id));
    }

    rows.into_iter()
        .map(|row| {
            let required_skill_ids = skills_by_task.remove(&row.id).unwrap_or_default();
            row_to_task(row, required_skill_ids)
        })
        .collect()
}

fn row_to_task(row: TaskRow, required_skill_ids: BTreeSet<SkillId>) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title: persisted_title,
        status: persisted_status,
        parent_id,
        assigned_developer_id,
        created_at,
        updated_at,
        ..
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TaskRepositoryError::invalid_persisted_data)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::invalid_persisted_data)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        status,
        parent_id: parent_id.map(TaskId::from_uuid),
        required_skill_ids,
        assigned_developer_id: assigned_developer_id.map(DeveloperId::from_uuid),
        created_at,
        updated_at,
    }))
}
