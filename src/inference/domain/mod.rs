//! Prompt construction and response parsing for skill inference.

mod parse;
mod prompt;

pub use parse::parse_skill_names;
pub use prompt::render_prompt;
