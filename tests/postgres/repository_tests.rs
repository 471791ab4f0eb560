//! Task repository contracts checked directly against `PostgreSQL`.

use super::helpers::{BoxError, pg_board};
use mockable::DefaultClock;
use taskforge::task::{
    domain::{Task, TaskId, TaskTitle, TaskTree},
    ports::{TaskRepository, TaskRepositoryError},
};

fn task(title: &str, parent: Option<TaskId>) -> Result<Task, BoxError> {
    Ok(Task::new(TaskTitle::new(title)?, [], parent, &DefaultClock))
}

#[tokio::test(flavor = "multi_thread")]
async fn storing_a_tree_twice_is_a_duplicate() -> Result<(), BoxError> {
    let Some(board) = pg_board()? else {
        return Ok(());
    };
    let tree = TaskTree::leaf(task("Once", None)?);

    board.task_repository.store_tree(&tree).await?;
    let again = board.task_repository.store_tree(&tree).await;

    assert!(matches!(again, Err(TaskRepositoryError::DuplicateTask(_))));
    assert_eq!(board.task_repository.list_top_level().await?.len(), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn subtree_under_missing_parent_is_rejected() -> Result<(), BoxError> {
    let Some(board) = pg_board()? else {
        return Ok(());
    };
    let ghost = TaskId::new();
    let tree = TaskTree::leaf(task("Stray", Some(ghost))?);

    let result = board.task_repository.store_tree(&tree).await;

    assert!(matches!(result, Err(TaskRepositoryError::NotFound(id)) if id == ghost));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn updating_an_unknown_task_is_not_found() -> Result<(), BoxError> {
    let Some(board) = pg_board()? else {
        return Ok(());
    };
    let stray = task("Never stored", None)?;

    let result = board.task_repository.update_node(&stray).await;

    assert!(matches!(result, Err(TaskRepositoryError::NotFound(id)) if id == stray.id()));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn subtree_loads_in_creation_order() -> Result<(), BoxError> {
    let Some(board) = pg_board()? else {
        return Ok(());
    };
    let root = task("Root", None)?;
    let first = task("First", Some(root.id()))?;
    let nested = task("Nested", Some(first.id()))?;
    let second = task("Second", Some(root.id()))?;
    let tree = TaskTree::new(
        root.clone(),
        vec![
            TaskTree::new(first.clone(), vec![TaskTree::leaf(nested)]),
            TaskTree::leaf(second),
        ],
    );
    board.task_repository.store_tree(&tree).await?;

    let loaded = board
        .task_repository
        .load_subtree(root.id())
        .await?
        .ok_or("stored tree should load")?;
    let titles: Vec<&str> = loaded.iter().map(|node| node.title().as_str()).collect();
    assert_eq!(titles, ["Root", "First", "Nested", "Second"]);

    let branch = board
        .task_repository
        .load_subtree(first.id())
        .await?
        .ok_or("branch should load")?;
    assert_eq!(branch.node_count(), 2);
    Ok(())
}
