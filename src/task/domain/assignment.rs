//! Skill-eligibility rule for linking developers to task nodes.
//!
//! A developer is eligible for a node when their skill set is a superset of
//! the node's required skills at the moment of assignment. The check is a
//! point-in-time one: later changes to either side do not unassign anyone.

use crate::developer::domain::{Developer, DeveloperName};
use crate::skill::domain::{Skill, SkillId, SkillName};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Resolves skill identifiers to display names.
pub trait SkillNameLookup {
    /// Returns the name of the skill, or `None` when it is not known.
    fn skill_name(&self, id: SkillId) -> Option<&SkillName>;
}

impl<S: std::hash::BuildHasher> SkillNameLookup for HashMap<SkillId, Skill, S> {
    fn skill_name(&self, id: SkillId) -> Option<&SkillName> {
        self.get(&id).map(Skill::name)
    }
}

/// Reasons an assignment is refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssignmentError {
    /// The developer lacks at least one required skill.
    #[error(
        "Developer \"{developer}\" does not have the required skill(s): {}. Task can only be assigned to a developer with all required skills.",
        join_names(.missing_skills)
    )]
    Ineligible {
        /// Display name of the rejected developer.
        developer: DeveloperName,
        /// Names of the missing skills, sorted.
        missing_skills: Vec<SkillName>,
    },

    /// A missing skill could not be named; storage references an unknown
    /// skill.
    #[error("required skill {0} is not in the catalog")]
    UnresolvedSkill(SkillId),
}

fn join_names(names: &[SkillName]) -> String {
    names
        .iter()
        .map(SkillName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Returns the required skills the developer does not hold.
#[must_use]
pub fn missing_skill_ids(
    developer: &Developer,
    required_skill_ids: &BTreeSet<SkillId>,
) -> BTreeSet<SkillId> {
    required_skill_ids
        .difference(developer.skill_ids())
        .copied()
        .collect()
}

/// Checks that `developer` holds every skill in `required_skill_ids`.
///
/// # Errors
///
/// Returns [`AssignmentError::Ineligible`] naming every missing skill, or
/// [`AssignmentError::UnresolvedSkill`] when a missing skill has no catalog
/// entry in `skills`.
pub fn validate_assignment(
    developer: &Developer,
    required_skill_ids: &BTreeSet<SkillId>,
    skills: &impl SkillNameLookup,
) -> Result<(), AssignmentError> {
    let missing = missing_skill_ids(developer, required_skill_ids);
    if missing.is_empty() {
        return Ok(());
    }

    let mut missing_skills = missing
        .into_iter()
        .map(|id| {
            skills
                .skill_name(id)
                .cloned()
                .ok_or(AssignmentError::UnresolvedSkill(id))
        })
        .collect::<Result<Vec<_>, _>>()?;
    missing_skills.sort();

    Err(AssignmentError::Ineligible {
        developer: developer.name().clone(),
        missing_skills,
    })
}
