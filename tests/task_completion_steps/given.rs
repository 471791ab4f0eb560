//! Given steps for task completion BDD scenarios.

use super::world::{TaskBoardWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskforge::task::{domain::TaskStatus, services::CreateTaskRequest};

#[given(r#"the skill "{name}" exists"#)]
fn skill_exists(world: &mut TaskBoardWorld, name: String) -> Result<(), eyre::Report> {
    let skill = run_async(world.catalog.register(name.clone())).wrap_err("register skill")?;
    world.skills.insert(name, skill.id());
    Ok(())
}

#[given(r#"a developer "{name}" with skill "{skills}""#)]
fn developer_with_skills(
    world: &mut TaskBoardWorld,
    name: String,
    skills: String,
) -> Result<(), eyre::Report> {
    let skill_ids = world.skill_ids(&skills)?;
    let profile = run_async(world.roster.register(name.clone(), &skill_ids))
        .wrap_err("register developer")?;
    world.developers.insert(name, profile.developer.id());
    Ok(())
}

#[given(r#"a task "{title}" requiring "{skills}""#)]
fn task_requiring(
    world: &mut TaskBoardWorld,
    title: String,
    skills: String,
) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(title, world.skill_ids(&skills)?);
    let created = run_async(world.service.create(request)).wrap_err("create task")?;
    world.remember(&created);
    Ok(())
}

#[given(r#"an assigned task "{title}" requiring "{skills}" for "{developer}""#)]
fn assigned_task_requiring(
    world: &mut TaskBoardWorld,
    title: String,
    skills: String,
    developer: String,
) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(title, world.skill_ids(&skills)?)
        .with_assignee(world.developer_id(&developer)?);
    let created = run_async(world.service.create(request)).wrap_err("create assigned task")?;
    world.remember(&created);
    Ok(())
}

#[given(
    r#"a parent task "{title}" requiring "{skills}" with a subtask "{subtask}" in status "{status}""#
)]
fn task_with_subtask(
    world: &mut TaskBoardWorld,
    title: String,
    skills: String,
    subtask: String,
    status: String,
) -> Result<(), eyre::Report> {
    let skill_ids = world.skill_ids(&skills)?;
    let subtask_status = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let request = CreateTaskRequest::new(title, skill_ids.clone())
        .with_subtask(CreateTaskRequest::new(subtask, skill_ids).with_status(subtask_status));
    let created = run_async(world.service.create(request)).wrap_err("create task tree")?;
    world.remember(&created);
    Ok(())
}
