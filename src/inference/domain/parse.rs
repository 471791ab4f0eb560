//! Parsing of free-form model answers into catalogued skill names.

const LEADING_LABEL: &str = "required skill";
const SENTENCE_LABEL: &str = "the required skill";

/// Extracts known skill names from a model response.
///
/// The response is stripped of a leading "Required skill(s):" or "The
/// required skill(s) are:" label and of trailing sentence punctuation, then
/// split on commas, semicolons and newlines. Each candidate is matched
/// against `known` ignoring case, either exactly or when one name contains
/// the other. The first matching known name wins, and each appears at most
/// once in the result, in the order it was first mentioned.
///
/// # Examples
///
/// ```
/// use taskforge::inference::domain::parse_skill_names;
///
/// let known = vec!["Frontend".to_owned(), "Backend".to_owned(), "Database".to_owned()];
/// let names = parse_skill_names("Required skills: backend, Database.", &known);
/// assert_eq!(names, ["Backend", "Database"]);
/// ```
#[must_use]
pub fn parse_skill_names(response: &str, known: &[String]) -> Vec<String> {
    let cleaned = strip_labels(response.trim()).trim_end_matches(['.', '!', '?']);
    let known_lower: Vec<String> = known.iter().map(|name| name.to_lowercase()).collect();

    let mut matched: Vec<String> = Vec::new();
    for candidate in cleaned.split([',', ';', '\n']) {
        let wanted = candidate.trim().to_lowercase();
        if wanted.is_empty() {
            continue;
        }
        let hit = known_lower
            .iter()
            .position(|name| name.contains(&wanted) || wanted.contains(name.as_str()))
            .and_then(|index| known.get(index));
        if let Some(name) = hit
            && !matched.contains(name)
        {
            matched.push(name.clone());
        }
    }
    matched
}

fn strip_labels(text: &str) -> &str {
    let after_leading = strip_label(text, LEADING_LABEL).map_or(text, |rest| {
        let plural = rest.strip_prefix(['s', 'S']).unwrap_or(rest);
        plural.strip_prefix(':').unwrap_or(plural).trim_start()
    });
    strip_label(after_leading, SENTENCE_LABEL)
        .and_then(|rest| {
            let plural = rest.strip_prefix(['s', 'S']).unwrap_or(rest);
            strip_label(plural, " are").or_else(|| strip_label(plural, " is"))
        })
        .map_or(after_leading, |rest| {
            rest.strip_prefix(':').unwrap_or(rest).trim_start()
        })
}

fn strip_label<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    text.get(..label.len())
        .filter(|head| head.eq_ignore_ascii_case(label))
        .and_then(|_| text.get(label.len()..))
}
