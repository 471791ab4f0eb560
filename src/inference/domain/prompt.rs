//! Analyser prompt rendered through `minijinja`.

use minijinja::{Environment, context};

const SKILL_PROMPT_TEMPLATE: &str = r#"You are a software project task analyzer. Your job is to identify which technical skills are required to complete a given task.

Available skills: {{ skills | join(", ") }}

Task description: "{{ title }}"

Instructions:
1. Analyze the task description carefully
2. Identify which of the available skills are needed to complete this task
3. Return ONLY the skill names from the available list, separated by commas
4. If multiple skills are needed, return all relevant ones
5. Use exact skill names as provided in the available skills list
6. Do not include any explanation, just the skill names

Example responses:
"Frontend"
"Frontend, Backend"
"Backend, Database"

Required skills for the given task:"#;

/// Renders the skill analyser prompt for a task title.
///
/// # Errors
///
/// Returns a [`minijinja::Error`] when template rendering fails.
///
/// # Examples
///
/// ```
/// use taskforge::inference::domain::render_prompt;
///
/// let skills = vec!["Frontend".to_owned(), "Backend".to_owned()];
/// let prompt = render_prompt("Build login form", &skills).expect("prompt renders");
/// assert!(prompt.contains("Available skills: Frontend, Backend"));
/// ```
pub fn render_prompt(title: &str, skills: &[String]) -> Result<String, minijinja::Error> {
    let env = Environment::new();
    env.render_str(SKILL_PROMPT_TEMPLATE, context! { title, skills })
}
