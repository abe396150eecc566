// ABOUTME: Replacement of {assignees} tags with the current step's participants
// ABOUTME: One line per assignee with optional name, user email and status

use super::attributes::AttrValue;
use super::patterns::{find_tags, ASSIGNEES};
use super::resolver::MergeTagResolver;
use crate::model::Assignee;
use crate::services::WorkflowStep;

fn assignee_defaults() -> [(&'static str, AttrValue); 3] {
    [
        ("status", AttrValue::Bool(true)),
        ("user_email", AttrValue::Bool(true)),
        ("display_name", AttrValue::Bool(true)),
    ]
}

impl MergeTagResolver {
    pub fn replace_assignees(&self, text: &str, step: &dyn WorkflowStep) -> String {
        let tags = find_tags(&ASSIGNEES, text);
        if tags.is_empty() {
            return text.to_string();
        }

        let mut text = text.to_string();
        for tag in tags {
            let options = self.tag_options(tag.modifiers.as_deref(), &assignee_defaults());
            let show_status = options.flag("status");
            let show_email = options.flag("user_email");
            let show_name = options.flag("display_name");

            let lines: Vec<String> = step
                .assignees()
                .iter()
                .map(|assignee| self.assignee_line(assignee, show_name, show_email, show_status))
                .collect();

            text = text.replace(&tag.full_tag, &lines.join("\n"));
        }

        text
    }

    fn assignee_line(
        &self,
        assignee: &Assignee,
        show_name: bool,
        show_email: bool,
        show_status: bool,
    ) -> String {
        let mut line = String::new();

        if show_name {
            line.push_str(&assignee.display_name);
        }

        if show_email && assignee.is_user() {
            if !line.is_empty() {
                line.push_str(", ");
            }
            let email = assignee
                .user_id()
                .and_then(|id| self.directory.user(id))
                .map(|user| user.email)
                .unwrap_or_default();
            line.push_str(&email);
        }

        if show_status {
            line.push_str(&format!(" ({})", assignee.status));
        }

        line
    }
}
