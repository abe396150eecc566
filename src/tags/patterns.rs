// ABOUTME: Tag patterns recognised by the resolver and a helper to collect matches
// ABOUTME: Each tag is `{name}` or `{name:modifiers}` with the modifiers captured lazily

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    pub static ref CREATED_BY: Regex = Regex::new(r"\{created_by(:(.*?))?\}").unwrap();
    pub static ref WORKFLOW_TIMELINE: Regex =
        Regex::new(r"\{workflow_timeline(:(.*?))?\}").unwrap();
    pub static ref WORKFLOW_NOTE: Regex = Regex::new(r"\{workflow_note(:(.*?))?\}").unwrap();
    pub static ref ASSIGNEES: Regex = Regex::new(r"\{assignees(:(.*?))?\}").unwrap();
}

/// Tags handled directly by the resolver, with their accepted options.
pub const SUPPORTED_TAGS: &[(&str, &str)] = &[
    (
        "created_by",
        "{created_by:property} where property is roles, email, display_name, user_login, first_name, last_name or ID",
    ),
    ("workflow_timeline", "{workflow_timeline}"),
    (
        "workflow_note",
        "{workflow_note:step_id=N display_name=true display_date=true}",
    ),
    (
        "assignees",
        "{assignees:status=true user_email=true display_name=true}",
    ),
];

/// One occurrence of a tag in template text.
#[derive(Debug, Clone, PartialEq)]
pub struct TagMatch {
    pub full_tag: String,
    /// Text after the colon; `None` when the tag has no colon at all.
    pub modifiers: Option<String>,
}

/// Collect distinct tag occurrences in order of first appearance.
pub fn find_tags(pattern: &Regex, text: &str) -> Vec<TagMatch> {
    let mut matches: Vec<TagMatch> = Vec::new();

    for captures in pattern.captures_iter(text) {
        let full_tag = captures[0].to_string();
        if matches.iter().any(|m| m.full_tag == full_tag) {
            continue;
        }
        matches.push(TagMatch {
            full_tag,
            modifiers: captures.get(2).map(|m| m.as_str().to_string()),
        });
    }

    matches
}
