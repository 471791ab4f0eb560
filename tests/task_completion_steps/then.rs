//! Then steps for task completion BDD scenarios.

use super::world::{TaskBoardWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use taskforge::task::{
    domain::{TaskNode, TaskStatus},
    services::TaskTreeError,
};

fn last_result(world: &TaskBoardWorld) -> Result<&Result<TaskNode, TaskTreeError>, eyre::Report> {
    world
        .last_update_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing update result"))
}

fn fetch(world: &TaskBoardWorld, title: &str) -> Result<TaskNode, eyre::Report> {
    let id = world.task_id(title)?;
    run_async(world.service.get(id)).wrap_err("refetch task")
}

#[then("the update succeeds")]
fn update_succeeds(world: &TaskBoardWorld) -> Result<(), eyre::Report> {
    if let Err(err) = last_result(world)? {
        return Err(eyre::eyre!("expected success, got {err}"));
    }
    Ok(())
}

#[then(r#"the update is rejected listing "{title}""#)]
fn rejected_listing(world: &TaskBoardWorld, title: String) -> Result<(), eyre::Report> {
    match last_result(world)? {
        Err(TaskTreeError::IncompleteSubtasks { incomplete, .. }) => {
            eyre::ensure!(
                incomplete.contains(&title),
                "expected {title:?} among {incomplete:?}"
            );
            Ok(())
        }
        other => Err(eyre::eyre!("expected IncompleteSubtasks error, got {other:?}")),
    }
}

#[then(r#"the update is rejected as ineligible missing "{skill}""#)]
fn rejected_as_ineligible(world: &TaskBoardWorld, skill: String) -> Result<(), eyre::Report> {
    match last_result(world)? {
        Err(TaskTreeError::IneligibleAssignment { missing_skills, .. }) => {
            eyre::ensure!(
                missing_skills.iter().any(|name| name.as_str() == skill),
                "expected {skill:?} among {missing_skills:?}"
            );
            Ok(())
        }
        other => Err(eyre::eyre!("expected IneligibleAssignment error, got {other:?}")),
    }
}

#[then(r#"the task "{title}" has status "{status}""#)]
fn task_has_status(world: &TaskBoardWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let node = fetch(world, &title)?;
    eyre::ensure!(
        node.status == expected,
        "expected status {}, found {}",
        expected.as_str(),
        node.status.as_str()
    );
    Ok(())
}

#[then(r#"the task "{title}" has no assignee"#)]
fn task_has_no_assignee(world: &TaskBoardWorld, title: String) -> Result<(), eyre::Report> {
    let node = fetch(world, &title)?;
    eyre::ensure!(
        node.assigned_developer.is_none(),
        "expected no assignee, found {:?}",
        node.assigned_developer
    );
    Ok(())
}

#[then(r#"the task "{title}" is still assigned to "{developer}""#)]
fn task_still_assigned(
    world: &TaskBoardWorld,
    title: String,
    developer: String,
) -> Result<(), eyre::Report> {
    let expected = world.developer_id(&developer)?;
    let node = fetch(world, &title)?;
    eyre::ensure!(
        node.assigned_developer.as_ref().map(|view| view.id) == Some(expected),
        "expected {developer} to remain assigned"
    );
    Ok(())
}
