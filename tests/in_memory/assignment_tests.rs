//! Skill eligibility enforced on both creation and update.

use super::helpers::{Board, board};
use rstest::rstest;
use taskforge::developer::domain::DeveloperId;
use taskforge::task::services::{CreateTaskRequest, Missing, TaskTreeError, UpdateTaskRequest};

fn missing_names(err: &TaskTreeError) -> Vec<String> {
    match err {
        TaskTreeError::IneligibleAssignment { missing_skills, .. } => {
            missing_skills.iter().map(ToString::to_string).collect()
        }
        other => panic!("expected ineligible assignment, got {other:?}"),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assigning_backend_only_developer_to_database_work_fails(board: Board) {
    let backend = board.skill("Backend").await;
    let database = board.skill("Database").await;
    let dev = board.developer("Bob", &[backend]).await;
    let task = board
        .tasks
        .create(CreateTaskRequest::new("Schema", [backend]))
        .await
        .expect("create task");

    let err = board
        .tasks
        .update(
            task.id,
            UpdateTaskRequest::new()
                .with_required_skill_ids([backend, database])
                .with_assignee(dev),
        )
        .await
        .expect_err("Bob lacks Database");

    assert_eq!(missing_names(&err), ["Database"]);
    assert!(err.to_string().starts_with("Developer \"Bob\" does not have"));
    let refetched = board.tasks.get(task.id).await.expect("refetch");
    assert!(refetched.assigned_developer.is_none());
    assert_eq!(refetched.required_skill_ids(), task.required_skill_ids());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn widening_skills_under_an_assignee_is_rejected(board: Board) {
    let frontend = board.skill("Frontend").await;
    let backend = board.skill("Backend").await;
    let dev = board.developer("Ada", &[frontend]).await;
    let task = board
        .tasks
        .create(CreateTaskRequest::new("Landing page", [frontend]).with_assignee(dev))
        .await
        .expect("create task");

    let err = board
        .tasks
        .update(
            task.id,
            UpdateTaskRequest::new().with_required_skill_ids([frontend, backend]),
        )
        .await
        .expect_err("Ada lacks Backend");

    assert_eq!(missing_names(&err), ["Backend"]);
    let refetched = board.tasks.get(task.id).await.expect("refetch");
    assert_eq!(
        refetched.assigned_developer.as_ref().map(|view| view.id),
        Some(dev)
    );
    assert_eq!(refetched.required_skill_ids(), task.required_skill_ids());
}

#[rstest]
#[case::exact(&["Backend"], true)]
#[case::superset(&["Backend", "Database", "Frontend"], true)]
#[case::partial(&["Database"], false)]
#[case::none(&[], false)]
#[tokio::test(flavor = "multi_thread")]
async fn eligibility_is_the_subset_rule_on_create_and_update(
    board: Board,
    #[case] held: &[&str],
    #[case] eligible: bool,
) {
    let mut catalog = Vec::new();
    for name in ["Backend", "Database", "Frontend"] {
        catalog.push((name, board.skill(name).await));
    }
    let skill_of = |name: &str| {
        catalog
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, id)| *id)
            .expect("catalogued skill")
    };
    let held_ids: Vec<_> = held.iter().copied().map(skill_of).collect();
    let dev = board.developer("Casey", &held_ids).await;
    let required = [skill_of("Backend")];

    let created = board
        .tasks
        .create(CreateTaskRequest::new("On create", required).with_assignee(dev))
        .await;
    let open = board
        .tasks
        .create(CreateTaskRequest::new("On update", required))
        .await
        .expect("create unassigned");
    let updated = board
        .tasks
        .update(open.id, UpdateTaskRequest::new().with_assignee(dev))
        .await;

    assert_eq!(created.is_ok(), eligible);
    assert_eq!(updated.is_ok(), eligible);
    if !eligible {
        assert!(matches!(
            created,
            Err(TaskTreeError::IneligibleAssignment { .. })
        ));
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ineligible_subtask_assignee_aborts_the_whole_tree(board: Board) {
    let frontend = board.skill("Frontend").await;
    let css = board.skill("CSS").await;
    let dev = board.developer("Ada", &[frontend]).await;

    let result = board
        .tasks
        .create(
            CreateTaskRequest::new("Build login form", [frontend])
                .with_assignee(dev)
                .with_subtask(CreateTaskRequest::new("Style form", [frontend, css]).with_assignee(dev)),
        )
        .await;

    assert!(matches!(result, Err(TaskTreeError::IneligibleAssignment { .. })));
    assert!(board.tasks.list_top_level().await.expect("list").is_empty());
    let profile = board.roster.get_by_id(dev).await.expect("profile");
    assert!(profile.assigned_tasks.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_assignee_is_not_found(board: Board) {
    let backend = board.skill("Backend").await;
    let ghost = DeveloperId::new();

    let result = board
        .tasks
        .create(CreateTaskRequest::new("Orphan", [backend]).with_assignee(ghost))
        .await;

    assert!(matches!(
        result,
        Err(TaskTreeError::NotFound(Missing::Developer(id))) if id == ghost
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn clearing_the_assignee_skips_validation(board: Board) {
    let backend = board.skill("Backend").await;
    let database = board.skill("Database").await;
    let dev = board.developer("Bob", &[backend]).await;
    let task = board
        .tasks
        .create(CreateTaskRequest::new("Schema", [backend]).with_assignee(dev))
        .await
        .expect("create task");

    let updated = board
        .tasks
        .update(
            task.id,
            UpdateTaskRequest::new()
                .with_required_skill_ids([backend, database])
                .clearing_assignee(),
        )
        .await
        .expect("clear and widen");

    assert!(updated.assigned_developer.is_none());
    assert_eq!(updated.required_skills.len(), 2);
}
