//! Developer profiles and the tasks assigned to them.

use super::helpers::{Board, board};
use rstest::rstest;
use taskforge::developer::{domain::DeveloperId, services::DeveloperRosterError};
use taskforge::task::services::{CreateTaskRequest, UpdateTaskRequest};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn profile_lists_assigned_tasks_in_creation_order(board: Board) {
    let backend = board.skill("Backend").await;
    let dev = board.developer("Ada", &[backend]).await;
    let first = board
        .tasks
        .create(CreateTaskRequest::new("API", [backend]).with_assignee(dev))
        .await
        .expect("create task");
    board
        .tasks
        .create(
            CreateTaskRequest::new("Release", [backend])
                .with_subtask(CreateTaskRequest::new("Deploy", [backend]).with_assignee(dev)),
        )
        .await
        .expect("create tree");

    let profile = board.roster.get_by_id(dev).await.expect("profile");
    let titles: Vec<&str> = profile
        .assigned_tasks
        .iter()
        .map(|task| task.title.as_str())
        .collect();
    assert_eq!(titles, ["API", "Deploy"]);

    board
        .tasks
        .update(first.id, UpdateTaskRequest::new().clearing_assignee())
        .await
        .expect("unassign");
    let refreshed = board.roster.get_by_id(dev).await.expect("profile");
    assert_eq!(refreshed.assigned_tasks.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn roster_is_ordered_by_name_with_sorted_skills(board: Board) {
    let frontend = board.skill("Frontend").await;
    let backend = board.skill("Backend").await;
    board.developer("Zed", &[frontend]).await;
    board.developer("Ada", &[frontend, backend]).await;

    let roster = board.roster.list_all().await.expect("roster");

    let names: Vec<&str> = roster
        .iter()
        .map(|profile| profile.developer.name().as_str())
        .collect();
    assert_eq!(names, ["Ada", "Zed"]);
    let ada_skills: Vec<&str> = roster
        .first()
        .map(|profile| profile.skills.iter().map(|skill| skill.name().as_str()).collect())
        .unwrap_or_default();
    assert_eq!(ada_skills, ["Backend", "Frontend"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_developer_is_not_found(board: Board) {
    let missing = DeveloperId::new();
    let err = board.roster.get_by_id(missing).await.expect_err("unknown");
    assert!(matches!(err, DeveloperRosterError::NotFound(id) if id == missing));
    assert_eq!(err.to_string(), format!("Developer with ID {missing} not found"));
}
