// ABOUTME: Replacement of the {workflow_timeline} tag
// ABOUTME: Renders the full note history of an entry as dated HTML lines

use super::html::{esc_html, nl2br};
use super::patterns::WORKFLOW_TIMELINE;
use super::resolver::MergeTagResolver;
use crate::model::{Entry, Note, StepRef};

impl MergeTagResolver {
    /// Only the first timeline tag variant found is replaced; modifiers are ignored.
    pub fn replace_workflow_timeline(&self, text: &str, entry: &Entry) -> String {
        let Some(first) = WORKFLOW_TIMELINE.find(text) else {
            return text.to_string();
        };

        let full_tag = first.as_str().to_string();
        let timeline = self.timeline(entry);
        text.replace(&full_tag, &timeline)
    }

    pub fn timeline(&self, entry: &Entry) -> String {
        self.notes
            .get_notes(entry)
            .iter()
            .map(|note| {
                format!(
                    "<br>{}: {}<br>{}<br>",
                    esc_html(&self.dates.format_date(&note.date_created)),
                    esc_html(&self.timeline_display_name(note)),
                    nl2br(&esc_html(&note.value))
                )
            })
            .collect()
    }

    /// Who or what a timeline note is attributed to.
    pub fn timeline_display_name(&self, note: &Note) -> String {
        if let Some(key) = note.assignee() {
            return self
                .directory
                .assignee(key)
                .map(|assignee| assignee.display_name)
                .unwrap_or_else(|| key.to_string());
        }

        let step = match &note.step_id {
            StepRef::Id(id) => self.steps.step(*id),
            StepRef::Type(step_type) => self.steps.step_type(step_type),
        };

        step.map(|step| step.label())
            .unwrap_or_else(|| self.settings.workflow_label.clone())
    }
}
