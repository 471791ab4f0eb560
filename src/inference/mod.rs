//! Best-effort skill inference from task titles.
//!
//! When a task arrives without explicit skill requirements, a surrounding
//! layer may ask a language model which catalogued skills the title calls
//! for. Inference never fails loudly: adapters log problems and answer with
//! an empty list, and the task engine itself never consults this module.
//!
//! - Prompt rendering and response parsing in [`domain`]
//! - The [`ports::SkillInference`] contract in [`ports`]
//! - Disabled and Gemini-backed implementations in [`adapters`]
//! - The [`services::SkillResolver`] helper in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
