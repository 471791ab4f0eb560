//! Task tree service behaviour against `PostgreSQL`.

use super::helpers::{BoxError, PgBoard, pg_board};
use taskforge::skill::domain::SkillId;
use taskforge::task::{
    domain::TaskStatus,
    services::{CreateTaskRequest, TaskTreeError, UpdateTaskRequest},
};

async fn skill(board: &PgBoard, name: &str) -> Result<SkillId, BoxError> {
    Ok(board.catalog.register(name).await?.id())
}

#[tokio::test(flavor = "multi_thread")]
async fn created_tree_round_trips_fully_populated() -> Result<(), BoxError> {
    let Some(board) = pg_board()? else {
        return Ok(());
    };
    let frontend = skill(&board, "Frontend").await?;
    let css = skill(&board, "CSS").await?;
    let dev = board.roster.register("Ada", &[frontend, css]).await?.developer.id();

    let created = board
        .tasks
        .create(
            CreateTaskRequest::new("Build login form", [frontend]).with_subtasks([
                CreateTaskRequest::new("Style form", [frontend, css]).with_assignee(dev),
                CreateTaskRequest::new("Wire submit", [frontend])
                    .with_subtask(CreateTaskRequest::new("Validate", [frontend])),
            ]),
        )
        .await?;

    let fetched = board.tasks.get(created.id).await?;
    assert_eq!(fetched, created);
    let titles: Vec<&str> = fetched.subtasks.iter().map(|node| node.title.as_str()).collect();
    assert_eq!(titles, ["Style form", "Wire submit"]);
    let style = fetched.subtasks.first().ok_or("missing subtask")?;
    let assignee = style.assigned_developer.as_ref().ok_or("missing assignee")?;
    assert_eq!(assignee.name.as_str(), "Ada");
    assert_eq!(assignee.skills.len(), 2);
    assert_eq!(fetched.node_count(), 4);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_creation_leaves_no_rows() -> Result<(), BoxError> {
    let Some(board) = pg_board()? else {
        return Ok(());
    };
    let frontend = skill(&board, "Frontend").await?;
    let css = skill(&board, "CSS").await?;
    let dev = board.roster.register("Ada", &[frontend]).await?.developer.id();

    let result = board
        .tasks
        .create(
            CreateTaskRequest::new("Build login form", [frontend])
                .with_subtask(CreateTaskRequest::new("Style form", [css]).with_assignee(dev)),
        )
        .await;

    assert!(matches!(result, Err(TaskTreeError::IneligibleAssignment { .. })));
    assert!(board.tasks.list_top_level().await?.is_empty());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn listing_is_newest_first_with_nested_subtasks() -> Result<(), BoxError> {
    let Some(board) = pg_board()? else {
        return Ok(());
    };
    let backend = skill(&board, "Backend").await?;
    for title in ["Older", "Newer"] {
        board
            .tasks
            .create(
                CreateTaskRequest::new(title, [backend])
                    .with_subtask(CreateTaskRequest::new(format!("{title} child"), [backend])),
            )
            .await?;
    }

    let listed = board.tasks.list_top_level().await?;

    let titles: Vec<&str> = listed.iter().map(|node| node.title.as_str()).collect();
    assert_eq!(titles, ["Newer", "Older"]);
    assert!(listed.iter().all(|node| node.subtasks.len() == 1));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_completion_and_reassignment_persist_nothing() -> Result<(), BoxError> {
    let Some(board) = pg_board()? else {
        return Ok(());
    };
    let frontend = skill(&board, "Frontend").await?;
    let backend = skill(&board, "Backend").await?;
    let dev = board.roster.register("Ada", &[frontend]).await?.developer.id();
    let created = board
        .tasks
        .create(
            CreateTaskRequest::new("Landing page", [frontend])
                .with_assignee(dev)
                .with_subtask(
                    CreateTaskRequest::new("Hero image", [frontend])
                        .with_status(TaskStatus::InProgress),
                ),
        )
        .await?;

    let done = board
        .tasks
        .update(created.id, UpdateTaskRequest::new().with_status(TaskStatus::Done))
        .await;
    let widened = board
        .tasks
        .update(
            created.id,
            UpdateTaskRequest::new().with_required_skill_ids([frontend, backend]),
        )
        .await;

    assert!(matches!(done, Err(TaskTreeError::IncompleteSubtasks { .. })));
    assert!(matches!(widened, Err(TaskTreeError::IneligibleAssignment { .. })));
    assert_eq!(board.tasks.get(created.id).await?, created);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_skills_and_assignee() -> Result<(), BoxError> {
    let Some(board) = pg_board()? else {
        return Ok(());
    };
    let backend = skill(&board, "Backend").await?;
    let database = skill(&board, "Database").await?;
    let dev = board
        .roster
        .register("Bob", &[backend, database])
        .await?
        .developer
        .id();
    let created = board
        .tasks
        .create(CreateTaskRequest::new("Schema", [backend]))
        .await?;

    let updated = board
        .tasks
        .update(
            created.id,
            UpdateTaskRequest::new()
                .with_title("Schema v2")
                .with_required_skill_ids([database])
                .with_assignee(dev),
        )
        .await?;

    assert_eq!(updated.title.as_str(), "Schema v2");
    let names: Vec<&str> = updated
        .required_skills
        .iter()
        .map(|skill| skill.name().as_str())
        .collect();
    assert_eq!(names, ["Database"]);
    let profile = board.roster.get_by_id(dev).await?;
    assert_eq!(profile.assigned_tasks.len(), 1);
    Ok(())
}
