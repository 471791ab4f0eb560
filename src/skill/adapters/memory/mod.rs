//! In-memory adapters for the skill catalog.

mod skill;

pub use skill::InMemorySkillRepository;
