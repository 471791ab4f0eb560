//! When steps for task completion BDD scenarios.

use super::world::{TaskBoardWorld, run_async};
use rstest_bdd_macros::when;
use taskforge::task::{domain::TaskStatus, services::UpdateTaskRequest};

#[when(r#"the task "{title}" is marked "{status}""#)]
fn task_marked(world: &mut TaskBoardWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?;
    let target = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let result = run_async(
        world
            .service
            .update(id, UpdateTaskRequest::new().with_status(target)),
    );
    world.last_update_result = Some(result);
    Ok(())
}

#[when(r#"the task "{title}" is updated to require "{skills}" and assigned to "{developer}""#)]
fn task_reassigned(
    world: &mut TaskBoardWorld,
    title: String,
    skills: String,
    developer: String,
) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?;
    let request = UpdateTaskRequest::new()
        .with_required_skill_ids(world.skill_ids(&skills)?)
        .with_assignee(world.developer_id(&developer)?);
    let result = run_async(world.service.update(id, request));
    world.last_update_result = Some(result);
    Ok(())
}

#[when(r#"the required skills of "{title}" change to "{skills}""#)]
fn task_skills_changed(
    world: &mut TaskBoardWorld,
    title: String,
    skills: String,
) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?;
    let request = UpdateTaskRequest::new().with_required_skill_ids(world.skill_ids(&skills)?);
    let result = run_async(world.service.update(id, request));
    world.last_update_result = Some(result);
    Ok(())
}
