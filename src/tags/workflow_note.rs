// ABOUTME: Replacement of {workflow_note} tags with user-submitted notes
// ABOUTME: Filters notes by step and renders optional name/date headers above each value

use super::attributes::{AttrValue, Attributes};
use super::html::{esc_html, nl2br};
use super::patterns::{find_tags, WORKFLOW_NOTE};
use super::resolver::MergeTagResolver;
use crate::model::{Entry, Note};
use crate::services::WorkflowStep;

/// Which user-submitted notes a {workflow_note} tag selects.
#[derive(Debug, Clone, PartialEq)]
pub enum NoteFilter {
    /// No step given: the first user-submitted note in store order.
    FirstOnly,
    /// A step option that is present but falsy: every user-submitted note.
    All,
    Step(String),
}

impl From<&AttrValue> for NoteFilter {
    fn from(value: &AttrValue) -> Self {
        match value {
            AttrValue::Null => NoteFilter::FirstOnly,
            AttrValue::Text(step) if value.is_truthy() => NoteFilter::Step(step.clone()),
            _ => NoteFilter::All,
        }
    }
}

fn note_defaults() -> [(&'static str, AttrValue); 3] {
    [
        ("step_id", AttrValue::Null),
        ("display_name", AttrValue::Bool(false)),
        ("display_date", AttrValue::Bool(false)),
    ]
}

impl MergeTagResolver {
    pub fn replace_workflow_note(
        &self,
        text: &str,
        entry: &Entry,
        step: &dyn WorkflowStep,
    ) -> String {
        let tags = find_tags(&WORKFLOW_NOTE, text);
        if tags.is_empty() {
            return text.to_string();
        }

        let mut text = text.to_string();
        for tag in tags {
            let options = self.tag_options(tag.modifiers.as_deref(), &note_defaults());
            let filter = NoteFilter::from(options.get("step_id"));

            let notes = match entry.id {
                Some(entry_id) => self.user_notes(entry_id, &filter),
                None => Vec::new(),
            };

            let replacement = notes
                .iter()
                .map(|note| self.render_note(note, step, &options))
                .collect::<Vec<_>>()
                .join("<br>");

            text = text.replace(&tag.full_tag, &replacement);
        }

        text
    }

    /// User-submitted notes for an entry, in store order.
    pub fn user_notes(&self, entry_id: u64, filter: &NoteFilter) -> Vec<Note> {
        let mut user_notes = Vec::new();

        for note in self.notes.get_workflow_notes(entry_id, true) {
            if !note.user_submitted {
                continue;
            }
            if let NoteFilter::Step(step) = filter {
                if !note.step_id.matches(step) {
                    continue;
                }
            }

            user_notes.push(note);

            if *filter == NoteFilter::FirstOnly {
                break;
            }
        }

        user_notes
    }

    fn render_note(&self, note: &Note, step: &dyn WorkflowStep, options: &Attributes) -> String {
        let name = if options.flag("display_name") {
            note.assignee()
                .and_then(|key| step.assignee(key))
                .map(|assignee| assignee.display_name)
                .unwrap_or_default()
        } else {
            String::new()
        };

        let date = if options.flag("display_date") {
            self.dates.format_date(&note.date_created)
        } else {
            String::new()
        };

        let mut rendered = String::new();

        if !name.is_empty() || !date.is_empty() {
            let sep = if !name.is_empty() && !date.is_empty() {
                ": "
            } else {
                ""
            };
            rendered.push_str(&format!(
                "<div class=\"gravityflow-note-header\">{}{}{}</div>",
                esc_html(&name),
                sep,
                esc_html(&date)
            ));
        }

        rendered.push_str(&format!(
            "<div class=\"gravityflow-note-value\">{}</div>",
            nl2br(&esc_html(&note.value))
        ));

        rendered
    }
}
